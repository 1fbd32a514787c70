use crate::connect::policy::OnExists;
use crate::connect::reconciler::SettlePolicy;
use crate::kafka::config::KafkaConfig;
use crate::kafka::topic::TopicSpec;
use crate::probe::policy::ProbePolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment the pipeline is reconciled against. Every field has a default
/// so a settings file only needs the values that differ.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PipelineSettings {
    pub connect: ConnectSettings,
    pub kafka: KafkaConfig,
    pub probe: ProbeSettings,
    pub settle: SettleSettings,
    pub database: DatabaseSettings,
    pub runtime: RuntimeSettings,
    /// Explicit topic set; derived from the connector configuration when absent.
    pub topics: Option<Vec<TopicSpec>>,
    pub on_exists: OnExists,
    /// Treat a degraded connector after creation as a failure.
    pub require_healthy: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConnectSettings {
    pub url: String,
    /// Container running the Connect worker, for in-network diagnostics.
    pub container: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        ConnectSettings {
            url: "http://localhost:8083".to_string(),
            container: None,
            request_timeout_secs: 10,
        }
    }
}

impl ConnectSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProbeSettings {
    pub max_attempts: u32,
    pub interval_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        ProbeSettings {
            max_attempts: 30,
            interval_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

impl ProbeSettings {
    pub fn policy(&self) -> ProbePolicy {
        ProbePolicy::new(self.max_attempts, Duration::from_secs(self.interval_secs))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SettleSettings {
    pub delete_secs: u64,
    pub create_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for SettleSettings {
    fn default() -> Self {
        SettleSettings {
            delete_secs: 5,
            create_secs: 10,
            poll_interval_ms: 1000,
        }
    }
}

impl SettleSettings {
    pub fn policy(&self) -> SettlePolicy {
        SettlePolicy {
            delete_ceiling: Duration::from_secs(self.delete_secs),
            create_ceiling: Duration::from_secs(self.create_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProbeMode {
    /// `container` when a Connect container is configured, else `direct`.
    #[default]
    Auto,
    Direct,
    Container,
    Skip,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DatabaseSettings {
    pub probe: DatabaseProbeMode,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RuntimeSettings {
    /// `docker` or a compatible CLI.
    pub binary: String,
    pub log_lines: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        RuntimeSettings {
            binary: "docker".to_string(),
            log_lines: 20,
        }
    }
}
