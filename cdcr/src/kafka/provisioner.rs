use crate::error::broker::BrokerError;
use crate::error::CdcrResult;
use crate::kafka::admin::{TopicAdmin, TopicCreation, TopicDescription};
use crate::kafka::topic::TopicSpec;
use crate::probe::policy::ProbePolicy;
use crate::probe::readiness::{await_ready, Probe};
use async_trait::async_trait;
use log::{info, warn};
use std::fmt::{self, Display};

/// The broker is ready once it answers a metadata request.
pub struct BrokerProbe<'a> {
    admin: &'a dyn TopicAdmin,
}

impl<'a> BrokerProbe<'a> {
    pub fn new(admin: &'a dyn TopicAdmin) -> Self {
        BrokerProbe { admin }
    }
}

#[async_trait]
impl<'a> Probe for BrokerProbe<'a> {
    fn target(&self) -> String {
        format!("Kafka broker at {}", self.admin.bootstrap_servers())
    }

    async fn check(&self) -> Result<(), String> {
        self.admin
            .list_topics()
            .await
            .map(|_| ())
            .map_err(|err| err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicOutcome {
    Created,
    AlreadyExisted,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicEntry {
    pub spec: TopicSpec,
    pub outcome: TopicOutcome,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopicReport {
    pub entries: Vec<TopicEntry>,
    /// Cluster topic state after provisioning; empty if the listing failed.
    pub listing: Vec<TopicDescription>,
    /// Existing topics whose shape differs from the requested spec.
    pub mismatches: Vec<String>,
}

impl TopicReport {
    pub fn count(&self, outcome: &TopicOutcome) -> usize {
        self.entries
            .iter()
            .filter(|entry| {
                std::mem::discriminant(&entry.outcome) == std::mem::discriminant(outcome)
            })
            .count()
    }

    pub fn failures(&self) -> Vec<BrokerError> {
        self.entries
            .iter()
            .filter_map(|entry| match &entry.outcome {
                TopicOutcome::Failed(reason) => Some(BrokerError::CreateFailed {
                    topic: entry.spec.name.clone(),
                    reason: reason.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.count(&TopicOutcome::Failed(String::new())) > 0
    }
}

impl Display for TopicReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Topics: {} created, {} already existed, {} failed",
            self.count(&TopicOutcome::Created),
            self.count(&TopicOutcome::AlreadyExisted),
            self.count(&TopicOutcome::Failed(String::new())),
        )?;
        for entry in &self.entries {
            let outcome = match &entry.outcome {
                TopicOutcome::Created => "created".to_string(),
                TopicOutcome::AlreadyExisted => "already exists".to_string(),
                TopicOutcome::Failed(reason) => format!("FAILED: {}", reason),
            };
            writeln!(f, "  {:40} {}", entry.spec.name, outcome)?;
        }
        for mismatch in &self.mismatches {
            writeln!(f, "  warning: {}", mismatch)?;
        }
        if !self.listing.is_empty() {
            writeln!(f, "Cluster topics:")?;
            for topic in &self.listing {
                writeln!(
                    f,
                    "  {:40} partitions={} replication={}",
                    topic.name, topic.partitions, topic.replication_factor
                )?;
            }
        }
        Ok(())
    }
}

pub struct TopicProvisioner<'a> {
    admin: &'a dyn TopicAdmin,
    policy: ProbePolicy,
}

impl<'a> TopicProvisioner<'a> {
    pub fn new(admin: &'a dyn TopicAdmin, policy: ProbePolicy) -> Self {
        TopicProvisioner { admin, policy }
    }

    /// Wait for the broker, then create each topic that is missing. A failure
    /// on one topic is recorded and the rest are still attempted.
    pub async fn ensure_topics(&self, specs: &[TopicSpec]) -> CdcrResult<TopicReport> {
        let probe = BrokerProbe::new(self.admin);
        await_ready(&probe, &self.policy)
            .await
            .map_err(|source| BrokerError::Unavailable {
                bootstrap_servers: self.admin.bootstrap_servers(),
                source,
            })?;

        let mut report = TopicReport::default();
        for spec in specs {
            let outcome = match self.admin.create_topic(spec).await {
                Ok(TopicCreation::Created) => {
                    info!("Created topic '{}'", spec.name);
                    TopicOutcome::Created
                }
                Ok(TopicCreation::AlreadyExists) => {
                    info!("Topic '{}' already exists", spec.name);
                    TopicOutcome::AlreadyExisted
                }
                Ok(TopicCreation::Failed(reason)) => {
                    warn!("Failed to create topic '{}': {}", spec.name, reason);
                    TopicOutcome::Failed(reason)
                }
                Err(err) => {
                    warn!("Failed to create topic '{}': {}", spec.name, err);
                    TopicOutcome::Failed(err.to_string())
                }
            };
            report.entries.push(TopicEntry {
                spec: spec.clone(),
                outcome,
            });
        }

        match self.admin.list_topics().await {
            Ok(mut listing) => {
                listing.sort_by(|a, b| a.name.cmp(&b.name));
                report.mismatches = find_mismatches(&report.entries, &listing);
                report.listing = listing;
            }
            Err(err) => warn!("Could not list topics after provisioning: {}", err),
        }

        for mismatch in &report.mismatches {
            warn!("{}", mismatch);
        }

        Ok(report)
    }
}

fn find_mismatches(entries: &[TopicEntry], listing: &[TopicDescription]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| entry.outcome == TopicOutcome::AlreadyExisted)
        .filter_map(|entry| {
            let actual = listing.iter().find(|topic| topic.name == entry.spec.name)?;
            if actual.partitions == entry.spec.partitions
                && actual.replication_factor == entry.spec.replication_factor
            {
                return None;
            }
            Some(format!(
                "topic '{}' has partitions={} replication={} but partitions={} replication={} was requested; left unchanged",
                actual.name,
                actual.partitions,
                actual.replication_factor,
                entry.spec.partitions,
                entry.spec.replication_factor
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::dependency::DependencyError;
    use crate::error::CdcrError;
    use crate::kafka::admin::MockTopicAdmin;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn policy() -> ProbePolicy {
        ProbePolicy::new(3, Duration::from_secs(5))
    }

    /// An admin backed by an in-memory topic set, so repeated runs observe
    /// earlier creations.
    fn in_memory_admin(existing: &[&str]) -> MockTopicAdmin {
        let topics: Arc<Mutex<HashSet<String>>> =
            Arc::new(Mutex::new(existing.iter().map(|t| t.to_string()).collect()));
        let mut admin = MockTopicAdmin::new();
        admin
            .expect_bootstrap_servers()
            .return_const("kafka:29092".to_string());

        let created = topics.clone();
        admin.expect_create_topic().returning(move |spec| {
            if created.lock().unwrap().insert(spec.name.clone()) {
                Ok(TopicCreation::Created)
            } else {
                Ok(TopicCreation::AlreadyExists)
            }
        });

        let listed = topics;
        admin.expect_list_topics().returning(move || {
            Ok(listed
                .lock()
                .unwrap()
                .iter()
                .map(|name| TopicDescription {
                    name: name.clone(),
                    partitions: 3,
                    replication_factor: 1,
                })
                .collect())
        });
        admin
    }

    #[tokio::test]
    async fn test_second_run_is_a_no_op() {
        let admin = in_memory_admin(&[]);
        let provisioner = TopicProvisioner::new(&admin, policy());
        let specs = vec![TopicSpec::data("erp.dbo.orders"), TopicSpec::data("erp.dbo.customers")];

        let first = provisioner.ensure_topics(&specs).await.unwrap();
        assert_eq!(first.count(&TopicOutcome::Created), 2);
        assert!(!first.has_failures());

        let second = provisioner.ensure_topics(&specs).await.unwrap();
        assert_eq!(second.count(&TopicOutcome::Created), 0);
        assert_eq!(second.count(&TopicOutcome::AlreadyExisted), 2);
        assert!(second.failures().is_empty());
        assert!(second.mismatches.is_empty());
        assert_eq!(second.listing.len(), 2);
        assert_eq!(second.listing[0].name, "erp.dbo.customers");
    }

    #[tokio::test]
    async fn test_failure_is_isolated_per_topic() {
        let mut admin = MockTopicAdmin::new();
        admin
            .expect_bootstrap_servers()
            .return_const("kafka:29092".to_string());
        admin.expect_list_topics().returning(|| Ok(vec![]));
        admin.expect_create_topic().times(3).returning(|spec| {
            if spec.name == "bad" {
                Ok(TopicCreation::Failed("InvalidReplicationFactor".to_string()))
            } else {
                Ok(TopicCreation::Created)
            }
        });

        let provisioner = TopicProvisioner::new(&admin, policy());
        let specs = vec![TopicSpec::data("a"), TopicSpec::data("bad"), TopicSpec::data("c")];
        let report = provisioner.ensure_topics(&specs).await.unwrap();

        assert_eq!(report.count(&TopicOutcome::Created), 2);
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures[0].to_string(),
            "Failed to create topic 'bad': InvalidReplicationFactor"
        );
    }

    #[tokio::test]
    async fn test_existing_topic_shape_mismatch_is_reported() {
        let admin = in_memory_admin(&["connect-offsets"]);
        let provisioner = TopicProvisioner::new(&admin, policy());
        let report = provisioner
            .ensure_topics(&[TopicSpec::compacted("connect-offsets", 25)])
            .await
            .unwrap();

        assert_eq!(report.count(&TopicOutcome::AlreadyExisted), 1);
        assert_eq!(report.mismatches.len(), 1);
        assert!(report.mismatches[0].contains("partitions=3"));
        assert!(report.to_string().contains("warning: topic 'connect-offsets'"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_broker_is_broker_unavailable() {
        let mut admin = MockTopicAdmin::new();
        admin
            .expect_bootstrap_servers()
            .return_const("kafka:29092".to_string());
        admin.expect_list_topics().times(3).returning(|| {
            Err(CdcrError::Dependency(DependencyError::Unreachable {
                target: "kafka:29092".to_string(),
                reason: "all brokers down".to_string(),
            }))
        });
        admin.expect_create_topic().times(0);

        let provisioner = TopicProvisioner::new(&admin, policy());
        let err = provisioner
            .ensure_topics(&[TopicSpec::data("a")])
            .await
            .unwrap_err();
        match err {
            CdcrError::Broker(BrokerError::Unavailable {
                bootstrap_servers,
                source: DependencyError::Timeout { attempts_used, .. },
            }) => {
                assert_eq!(bootstrap_servers, "kafka:29092");
                assert_eq!(attempts_used, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
