use crate::error::dependency::DependencyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Broker at {bootstrap_servers} unavailable: {source}")]
    Unavailable {
        bootstrap_servers: String,
        #[source]
        source: DependencyError,
    },

    #[error("Failed to create topic '{topic}': {reason}")]
    CreateFailed { topic: String, reason: String },
}
