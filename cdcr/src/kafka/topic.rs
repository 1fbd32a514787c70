use crate::connector::config::ConnectorConfig;
use crate::kafka::config::KafkaConfig;
use serde::{Deserialize, Serialize};

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Desired shape of one topic. Only creation is reconciled; an existing topic
/// that differs is reported, never altered.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TopicSpec {
    pub name: String,
    #[serde(default = "default_partitions")]
    pub partitions: i32,
    #[serde(default = "default_replication_factor")]
    pub replication_factor: i32,
    #[serde(default)]
    pub retention_ms: Option<i64>,
    #[serde(default)]
    pub compression: Option<String>,
    #[serde(default)]
    pub segment_ms: Option<i64>,
    #[serde(default)]
    pub cleanup_policy: Option<String>,
}

fn default_partitions() -> i32 {
    3
}

fn default_replication_factor() -> i32 {
    1
}

impl TopicSpec {
    /// A CDC change-event topic.
    pub fn data(name: &str) -> Self {
        TopicSpec {
            name: name.to_string(),
            partitions: default_partitions(),
            replication_factor: default_replication_factor(),
            retention_ms: Some(WEEK_MS),
            compression: Some("snappy".to_string()),
            segment_ms: Some(DAY_MS),
            cleanup_policy: None,
        }
    }

    /// A compacted bookkeeping topic as Kafka Connect expects them.
    pub fn compacted(name: &str, partitions: i32) -> Self {
        TopicSpec {
            name: name.to_string(),
            partitions,
            replication_factor: default_replication_factor(),
            retention_ms: None,
            compression: None,
            segment_ms: None,
            cleanup_policy: Some("compact".to_string()),
        }
    }

    /// Single-partition, never-expiring topic for schema history.
    pub fn schema_history(name: &str) -> Self {
        TopicSpec {
            name: name.to_string(),
            partitions: 1,
            replication_factor: default_replication_factor(),
            retention_ms: Some(-1),
            compression: None,
            segment_ms: None,
            cleanup_policy: Some("delete".to_string()),
        }
    }

    pub fn config_entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![];
        if let Some(retention_ms) = self.retention_ms {
            entries.push(("retention.ms", retention_ms.to_string()));
        }
        if let Some(compression) = &self.compression {
            entries.push(("compression.type", compression.clone()));
        }
        if let Some(segment_ms) = self.segment_ms {
            entries.push(("segment.ms", segment_ms.to_string()));
        }
        if let Some(cleanup_policy) = &self.cleanup_policy {
            entries.push(("cleanup.policy", cleanup_policy.clone()));
        }
        entries
    }
}

/// The fixed topic set for this pipeline: Connect's internal topics, the
/// schema history topic, and one change-event topic per captured table.
pub fn default_topics(kafka: &KafkaConfig, connector: Option<&ConnectorConfig>) -> Vec<TopicSpec> {
    let mut topics = vec![
        TopicSpec::compacted(&kafka.config_topic, 1),
        TopicSpec::compacted(&kafka.offset_topic, 25),
        TopicSpec::compacted(&kafka.status_topic, 5),
    ];

    let connector = match connector {
        Some(connector) => connector,
        None => return topics,
    };

    if let Some(history) = connector.schema_history_topic() {
        topics.push(TopicSpec::schema_history(&history));
    }

    if let Some(prefix) = connector.topic_prefix() {
        let databases = connector.database_names();
        for table in connector.captured_tables() {
            if databases.is_empty() {
                topics.push(TopicSpec::data(&format!("{}.{}", prefix, table)));
            }
            for database in &databases {
                topics.push(TopicSpec::data(&format!("{}.{}.{}", prefix, database, table)));
            }
        }
    }

    topics
}
