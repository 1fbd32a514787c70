use crate::error::CdcrResult;
use crate::kafka::admin::{TopicAdmin, TopicCreation, TopicDescription};
use crate::kafka::config::KafkaConfig;
use crate::kafka::topic::TopicSpec;
use async_trait::async_trait;
use log::debug;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::error::RDKafkaErrorCode;
use std::time::Duration;
use uuid::Uuid;

pub struct Kafka {
    pub config: KafkaConfig,
    pub admin: AdminClient<DefaultClientContext>,
}

impl Kafka {
    pub fn new(config: &KafkaConfig) -> CdcrResult<Self> {
        let mut admin_config = ClientConfig::new();
        admin_config.set("bootstrap.servers", &config.bootstrap_servers);
        let admin: AdminClient<DefaultClientContext> = admin_config.create()?;

        Ok(Kafka {
            config: config.clone(),
            admin,
        })
    }

    fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.config.operation_timeout_secs)
    }
}

fn fetch_topics(bootstrap_servers: &str, timeout: Duration) -> CdcrResult<Vec<TopicDescription>> {
    let mut config = ClientConfig::new();
    config.set("group.id", Uuid::new_v4().to_string());
    config.set("bootstrap.servers", bootstrap_servers);
    let consumer: BaseConsumer = config.create()?;

    let metadata = consumer.fetch_metadata(None, timeout)?;
    let topics = metadata
        .topics()
        .iter()
        .map(|topic| TopicDescription {
            name: topic.name().to_string(),
            partitions: topic.partitions().len() as i32,
            replication_factor: topic
                .partitions()
                .first()
                .map(|partition| partition.replicas().len() as i32)
                .unwrap_or(0),
        })
        .collect();
    Ok(topics)
}

#[async_trait]
impl TopicAdmin for Kafka {
    fn bootstrap_servers(&self) -> String {
        self.config.bootstrap_servers.clone()
    }

    async fn create_topic(&self, spec: &TopicSpec) -> CdcrResult<TopicCreation> {
        let entries = spec.config_entries();
        let mut topic = NewTopic::new(
            &spec.name,
            spec.partitions,
            TopicReplication::Fixed(spec.replication_factor),
        );
        for (key, value) in &entries {
            topic = topic.set(key, value.as_str());
        }

        let options = AdminOptions::new().operation_timeout(Some(self.operation_timeout()));
        let results = self.admin.create_topics(&[topic], &options).await?;
        debug!("Create topic '{}': {:?}", spec.name, results);

        let creation = match results.into_iter().next() {
            Some(Ok(_)) => TopicCreation::Created,
            Some(Err((_, RDKafkaErrorCode::TopicAlreadyExists))) => TopicCreation::AlreadyExists,
            Some(Err((_, code))) => TopicCreation::Failed(code.to_string()),
            None => TopicCreation::Failed("broker returned no result".to_string()),
        };
        Ok(creation)
    }

    async fn list_topics(&self) -> CdcrResult<Vec<TopicDescription>> {
        let bootstrap_servers = self.config.bootstrap_servers.clone();
        let timeout = self.operation_timeout();
        tokio::task::spawn_blocking(move || fetch_topics(&bootstrap_servers, timeout)).await?
    }
}
