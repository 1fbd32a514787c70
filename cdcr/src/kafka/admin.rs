use crate::error::CdcrResult;
use crate::kafka::topic::TopicSpec;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicCreation {
    Created,
    AlreadyExists,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicDescription {
    pub name: String,
    pub partitions: i32,
    pub replication_factor: i32,
}

/// Topic administration against the broker.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TopicAdmin: Send + Sync {
    fn bootstrap_servers(&self) -> String;

    /// Create with if-not-exists semantics; a topic that is already there is
    /// reported as `AlreadyExists`, not as a failure.
    async fn create_topic(&self, spec: &TopicSpec) -> CdcrResult<TopicCreation>;

    async fn list_topics(&self) -> CdcrResult<Vec<TopicDescription>>;
}
