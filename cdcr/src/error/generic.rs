use crate::error::broker::BrokerError;
use crate::error::config::ConfigError;
use crate::error::connector::ConnectorError;
use crate::error::dependency::DependencyError;
use rdkafka::error::KafkaError;
use thiserror::Error;

pub type CdcrResult<T> = Result<T, CdcrError>;

#[derive(Debug, Error)]
pub enum CdcrError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error(transparent)]
    Broker(#[from] BrokerError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Kafka client error: {0}")]
    Kafka(#[from] KafkaError),

    #[error("I/O error: {0}")]
    StdIo(#[from] std::io::Error),

    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_transparent() {
        let err: CdcrError = ConfigError::MissingField {
            field: "config.database.hostname".to_string(),
        }
        .into();
        assert!(matches!(err, CdcrError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Missing value for field 'config.database.hostname'"
        );
    }

    #[test]
    fn test_dependency_error_converts() {
        let err: CdcrError = DependencyError::Unreachable {
            target: "db:1433".to_string(),
            reason: "no route".to_string(),
        }
        .into();
        assert!(matches!(err, CdcrError::Dependency(_)));
    }
}
