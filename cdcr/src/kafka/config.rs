use serde::{Deserialize, Serialize};

/// Broker address and the names of Kafka Connect's bookkeeping topics.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KafkaConfig {
    pub bootstrap_servers: String,
    pub config_topic: String,
    pub offset_topic: String,
    pub status_topic: String,
    pub operation_timeout_secs: u64,
}

impl KafkaConfig {
    pub fn new(
        bootstrap_servers: String,
        config_topic: String,
        offset_topic: String,
        status_topic: String,
    ) -> Self {
        KafkaConfig {
            bootstrap_servers,
            config_topic,
            offset_topic,
            status_topic,
            ..KafkaConfig::default()
        }
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        KafkaConfig {
            bootstrap_servers: "localhost:9092".to_string(),
            config_topic: "connect-configs".to_string(),
            offset_topic: "connect-offsets".to_string(),
            status_topic: "connect-status".to_string(),
            operation_timeout_secs: 10,
        }
    }
}
