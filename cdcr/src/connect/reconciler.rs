use crate::connect::client::{ConnectApi, HttpReply};
use crate::connect::hint::Hint;
use crate::connect::policy::{ExistingPolicy, OnExists};
use crate::connector::config::ConnectorConfig;
use crate::error::connector::ConnectorError;
use crate::error::CdcrResult;
use crate::report::outcome::{ConnectorOutcome, OutcomeKind};
use crate::report::status::{summarize, DisplayReport};
use log::{debug, info, warn};
use std::time::Duration;
use strum_macros::Display;
use tokio::time::{sleep, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconcileState {
    Absent,
    ExistsKeep,
    ExistsReplace,
    Creating,
    Verifying,
    Running,
    Degraded,
}

/// Ceilings for the waits after asynchronous remote operations. Each wait
/// polls every `poll_interval` and ends early once its condition holds.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlePolicy {
    pub delete_ceiling: Duration,
    pub create_ceiling: Duration,
    pub poll_interval: Duration,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        SettlePolicy {
            delete_ceiling: Duration::from_secs(5),
            create_ceiling: Duration::from_secs(10),
            poll_interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub outcome: ConnectorOutcome,
    /// States visited, in order.
    pub trail: Vec<ReconcileState>,
}

pub struct ConnectorReconciler<'a> {
    api: &'a dyn ConnectApi,
    settle: SettlePolicy,
}

impl<'a> ConnectorReconciler<'a> {
    pub fn new(api: &'a dyn ConnectApi, settle: SettlePolicy) -> Self {
        ConnectorReconciler { api, settle }
    }

    pub async fn exists(&self, name: &str) -> CdcrResult<bool> {
        let reply = self.api.connector_status(name).await?;
        Ok(is_present(name, &reply))
    }

    pub async fn reconcile(
        &self,
        config: &ConnectorConfig,
        policy: &dyn ExistingPolicy,
    ) -> CdcrResult<Reconciliation> {
        let name = config.name();
        let mut trail = vec![];

        let existing = self.api.connector_status(name).await?;
        if is_present(name, &existing) {
            let current = summarize(&existing.body);
            info!("Connector '{}' already exists (state {})", name, current.state());

            match policy.decide(name, &current).await? {
                OnExists::Keep => {
                    self.enter(&mut trail, ReconcileState::ExistsKeep, name);
                    return Ok(Reconciliation {
                        outcome: ConnectorOutcome::new(name, OutcomeKind::KeptExisting, current),
                        trail,
                    });
                }
                OnExists::Fail => {
                    return Err(ConnectorError::AlreadyExists {
                        name: name.to_string(),
                    }
                    .into());
                }
                OnExists::Replace => {
                    self.enter(&mut trail, ReconcileState::ExistsReplace, name);
                    self.delete(name).await?;
                }
            }
        } else {
            self.enter(&mut trail, ReconcileState::Absent, name);
        }

        self.enter(&mut trail, ReconcileState::Creating, name);
        self.create(config).await?;

        self.enter(&mut trail, ReconcileState::Verifying, name);
        let report = self.await_settled(name).await?;

        let kind = if report.healthy {
            self.enter(&mut trail, ReconcileState::Running, name);
            OutcomeKind::CreatedRunning
        } else {
            self.enter(&mut trail, ReconcileState::Degraded, name);
            warn!(
                "Connector '{}' is not healthy: {}",
                name,
                report.root_cause().unwrap_or_default()
            );
            OutcomeKind::CreatedDegraded
        };

        Ok(Reconciliation {
            outcome: ConnectorOutcome::new(name, kind, report),
            trail,
        })
    }

    /// Delete the connector and wait until Connect no longer reports it.
    pub async fn delete(&self, name: &str) -> CdcrResult<()> {
        info!("Deleting connector '{}'", name);
        let reply = self.api.delete_connector(name).await?;
        if !matches!(reply.code, 200 | 204) {
            return Err(ConnectorError::DeleteFailed {
                name: name.to_string(),
                code: reply.code,
                body: reply.body,
            }
            .into());
        }

        let deadline = Instant::now() + self.settle.delete_ceiling;
        loop {
            sleep(self.poll_step(deadline)).await;
            if !self.exists(name).await? {
                debug!("Connector '{}' is gone", name);
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!(
                    "Connector '{}' still visible {}s after delete; creating anyway",
                    name,
                    self.settle.delete_ceiling.as_secs()
                );
                return Ok(());
            }
        }
    }

    pub async fn create(&self, config: &ConnectorConfig) -> CdcrResult<()> {
        let name = config.name();
        info!("Creating connector '{}'", name);
        let reply = self.api.create_connector(config.raw()).await?;
        if matches!(reply.code, 200 | 201) {
            return Ok(());
        }

        let hint = Hint::classify(&reply.body);
        Err(ConnectorError::CreateFailed {
            name: name.to_string(),
            code: reply.code,
            body: reply.body,
            hint,
        }
        .into())
    }

    /// One live status reading.
    pub async fn verify(&self, name: &str) -> CdcrResult<DisplayReport> {
        let reply = self.api.connector_status(name).await?;
        Ok(summarize(&reply.body))
    }

    async fn await_settled(&self, name: &str) -> CdcrResult<DisplayReport> {
        let deadline = Instant::now() + self.settle.create_ceiling;
        loop {
            sleep(self.poll_step(deadline)).await;
            let report = self.verify(name).await?;
            if report.is_settled() || Instant::now() >= deadline {
                return Ok(report);
            }
        }
    }

    fn poll_step(&self, deadline: Instant) -> Duration {
        self.settle
            .poll_interval
            .min(deadline.saturating_duration_since(Instant::now()))
    }

    fn enter(&self, trail: &mut Vec<ReconcileState>, state: ReconcileState, name: &str) {
        debug!("Connector '{}' -> {}", name, state);
        trail.push(state);
    }
}

fn is_present(name: &str, reply: &HttpReply) -> bool {
    match reply.code {
        200 => true,
        404 => false,
        code => {
            warn!(
                "Unexpected HTTP {} checking connector '{}'; treating it as absent",
                code, name
            );
            false
        }
    }
}
