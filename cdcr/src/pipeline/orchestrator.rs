use crate::connect::client::ConnectApi;
use crate::connect::liveness::ConnectLiveness;
use crate::connect::policy::ExistingPolicy;
use crate::connect::reconciler::ConnectorReconciler;
use crate::connector::config::ConnectorConfig;
use crate::connector::validator;
use crate::container::runtime::ContainerRuntime;
use crate::error::config::ConfigError;
use crate::error::connector::ConnectorError;
use crate::error::{CdcrError, CdcrResult};
use crate::kafka::admin::TopicAdmin;
use crate::kafka::provisioner::{TopicProvisioner, TopicReport};
use crate::kafka::topic::default_topics;
use crate::pipeline::settings::{DatabaseProbeMode, PipelineSettings};
use crate::probe::container::ContainerRouteProbe;
use crate::probe::readiness::await_ready;
use crate::probe::result::ProbeResult;
use crate::probe::tcp::TcpProbe;
use crate::report::outcome::ConnectorOutcome;
use crate::report::status::{summarize, DisplayReport};
use log::{info, warn};
use std::path::Path;

/// Everything one successful run observed, stage by stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub notes: Vec<String>,
    pub probes: Vec<ProbeResult>,
    pub topics: Option<TopicReport>,
    pub connector: ConnectorOutcome,
}

/// Drives the stages in order; each one gates the next. Holds no state of
/// its own beyond the settings and clients it was built with.
pub struct Orchestrator<'a> {
    settings: &'a PipelineSettings,
    connect: &'a dyn ConnectApi,
    admin: &'a dyn TopicAdmin,
    runtime: &'a dyn ContainerRuntime,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        settings: &'a PipelineSettings,
        connect: &'a dyn ConnectApi,
        admin: &'a dyn TopicAdmin,
        runtime: &'a dyn ContainerRuntime,
    ) -> Self {
        Orchestrator {
            settings,
            connect,
            admin,
            runtime,
        }
    }

    /// Topics, then the connector.
    pub async fn up(
        &self,
        config_path: &Path,
        policy: &dyn ExistingPolicy,
    ) -> CdcrResult<PipelineRun> {
        self.run(config_path, policy, true).await
    }

    /// The connector alone; topics are left to the Connect runtime.
    pub async fn setup_connector(
        &self,
        config_path: &Path,
        policy: &dyn ExistingPolicy,
    ) -> CdcrResult<PipelineRun> {
        self.run(config_path, policy, false).await
    }

    async fn run(
        &self,
        config_path: &Path,
        policy: &dyn ExistingPolicy,
        with_topics: bool,
    ) -> CdcrResult<PipelineRun> {
        let config = validator::validate(config_path)?;
        info!("Configuration '{}' is valid", config_path.display());

        let mut probes = vec![self.await_connect().await?];
        if let Some(result) = self.await_database(&config).await? {
            probes.push(result);
        }

        let topics = if with_topics {
            Some(self.provision_topics(Some(&config)).await?)
        } else {
            None
        };

        let connector = self.reconcile(&config, policy).await?;

        Ok(PipelineRun {
            notes: config.notes().to_vec(),
            probes,
            topics,
            connector,
        })
    }

    pub async fn await_connect(&self) -> CdcrResult<ProbeResult> {
        let probe = ConnectLiveness::new(self.connect, &self.settings.connect.url);
        Ok(await_ready(&probe, &self.settings.probe.policy()).await?)
    }

    /// Reachability of the source database, from wherever the settings say
    /// the check has to be made. `None` when the check is disabled.
    pub async fn await_database(
        &self,
        config: &ConnectorConfig,
    ) -> CdcrResult<Option<ProbeResult>> {
        let mode = match self.settings.database.probe {
            DatabaseProbeMode::Auto if self.settings.connect.container.is_some() => {
                DatabaseProbeMode::Container
            }
            DatabaseProbeMode::Auto => DatabaseProbeMode::Direct,
            mode => mode,
        };
        if mode == DatabaseProbeMode::Skip {
            info!("Database reachability check skipped");
            return Ok(None);
        }

        let hostname = config.hostname().unwrap_or_default();
        let port = config.database_port().ok_or_else(|| ConfigError::MissingField {
            field: "config.database.port".to_string(),
        })?;
        let policy = self.settings.probe.policy();

        let result = if mode == DatabaseProbeMode::Container {
            let container = self.settings.connect.container.as_deref().ok_or_else(|| {
                ConfigError::MissingField {
                    field: "connect.container".to_string(),
                }
            })?;
            ContainerRouteProbe::new(self.runtime, container, &hostname, port)
                .await_routable(&policy)
                .await?
        } else {
            let probe = TcpProbe::new(&hostname, port, self.settings.probe.connect_timeout());
            await_ready(&probe, &policy).await?
        };
        Ok(Some(result))
    }

    pub async fn provision_topics(
        &self,
        connector: Option<&ConnectorConfig>,
    ) -> CdcrResult<TopicReport> {
        let specs = match &self.settings.topics {
            Some(topics) => topics.clone(),
            None => default_topics(&self.settings.kafka, connector),
        };
        let provisioner = TopicProvisioner::new(self.admin, self.settings.probe.policy());
        provisioner.ensure_topics(&specs).await
    }

    pub async fn reconcile(
        &self,
        config: &ConnectorConfig,
        policy: &dyn ExistingPolicy,
    ) -> CdcrResult<ConnectorOutcome> {
        let reconciler = ConnectorReconciler::new(self.connect, self.settings.settle.policy());
        let outcome = match reconciler.reconcile(config, policy).await {
            Ok(reconciliation) => reconciliation.outcome,
            Err(err) => {
                if matches!(err, CdcrError::Connector(ConnectorError::CreateFailed { .. })) {
                    self.log_guidance().await;
                }
                return Err(err);
            }
        };

        if outcome.is_degraded() {
            self.log_guidance().await;
            if self.settings.require_healthy {
                return Err(ConnectorError::VerifyDegraded {
                    name: outcome.name.clone(),
                    root_cause: outcome.report.root_cause().unwrap_or_default(),
                }
                .into());
            }
        }

        Ok(outcome)
    }

    /// Live status of the configured connector.
    pub async fn status(&self, config_path: &Path) -> CdcrResult<DisplayReport> {
        let config = validator::validate(config_path)?;
        let reply = self.connect.connector_status(config.name()).await?;
        Ok(summarize(&reply.body))
    }

    async fn log_guidance(&self) {
        let container = match &self.settings.connect.container {
            Some(container) => container,
            None => return,
        };

        match self
            .runtime
            .recent_logs(container, self.settings.runtime.log_lines)
            .await
        {
            Ok(lines) => {
                warn!("Last {} log lines of '{}':", lines.len(), container);
                for line in lines {
                    warn!("  {}", line);
                }
            }
            Err(err) => warn!("Could not fetch logs of '{}': {}", container, err),
        }
    }
}
