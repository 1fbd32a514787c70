use crate::connect::hint::Hint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Connector '{name}' already exists and the existing-connector policy is 'fail'")]
    AlreadyExists { name: String },

    #[error("Failed to delete connector '{name}' (HTTP {code}): {body}")]
    DeleteFailed { name: String, code: u16, body: String },

    #[error("Failed to create connector '{name}' (HTTP {code}): {body}{}", render_hint(.hint))]
    CreateFailed {
        name: String,
        code: u16,
        body: String,
        hint: Option<Hint>,
    },

    #[error("Connector '{name}' is degraded: {root_cause}")]
    VerifyDegraded { name: String, root_cause: String },
}

fn render_hint(hint: &Option<Hint>) -> String {
    match hint {
        Some(hint) => format!("\nHint: {}", hint.advice()),
        None => String::new(),
    }
}
