use std::path::PathBuf;
use thiserror::Error;

/// Problems found in the connector configuration document. None of these
/// involve a network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Connector configuration not found at '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot read connector configuration '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Connector configuration '{}' is not valid JSON: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Missing value for field '{field}'")]
    MissingField { field: String },

    #[error("Field '{field}' still holds the placeholder value '{value}'; set the real credential before running")]
    PlaceholderCredential { field: String, value: String },

    #[error("database.hostname '{hostname}' is a loopback address and cannot be reached from inside the Connect runtime")]
    LoopbackHostname { hostname: String },
}
