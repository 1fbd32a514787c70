use crate::container::runtime::ContainerRuntime;
use crate::error::dependency::DependencyError;
use crate::probe::policy::ProbePolicy;
use crate::probe::readiness::{await_ready, Probe};
use crate::probe::result::ProbeResult;
use async_trait::async_trait;
use log::info;

/// Reachability of `host:port` as seen from inside a running container, for
/// runtimes whose network namespace differs from the host's.
pub struct ContainerRouteProbe<'a> {
    runtime: &'a dyn ContainerRuntime,
    container: String,
    host: String,
    port: u16,
}

impl<'a> ContainerRouteProbe<'a> {
    pub fn new(
        runtime: &'a dyn ContainerRuntime,
        container: &str,
        host: &str,
        port: u16,
    ) -> Self {
        ContainerRouteProbe {
            runtime,
            container: container.to_string(),
            host: host.to_string(),
            port,
        }
    }

    /// Resolve the hostname inside the container. Returns the first address.
    pub async fn resolve(&self) -> Result<String, DependencyError> {
        let command = vec!["getent".to_string(), "hosts".to_string(), self.host.clone()];
        let unreachable = |reason: String| DependencyError::Unreachable {
            target: format!("{} (from container '{}')", self.host, self.container),
            reason,
        };

        let output = self
            .runtime
            .exec(&self.container, &command)
            .await
            .map_err(|err| unreachable(err.to_string()))?;

        let address = output
            .stdout
            .split_whitespace()
            .next()
            .map(|address| address.to_string());

        match address {
            Some(address) if output.success => {
                info!(
                    "{} resolves to {} inside container '{}'",
                    self.host, address, self.container
                );
                Ok(address)
            }
            _ => Err(unreachable(format!(
                "name does not resolve: {}",
                output.combined().trim()
            ))),
        }
    }

    /// Name resolution first, then a bounded wait on the port.
    pub async fn await_routable(
        &self,
        policy: &ProbePolicy,
    ) -> Result<ProbeResult, DependencyError> {
        self.resolve().await?;
        await_ready(self, policy).await
    }
}

#[async_trait]
impl<'a> Probe for ContainerRouteProbe<'a> {
    fn target(&self) -> String {
        format!("{}:{} (from container '{}')", self.host, self.port, self.container)
    }

    async fn check(&self) -> Result<(), String> {
        let command = vec![
            "nc".to_string(),
            "-zv".to_string(),
            "-w".to_string(),
            "5".to_string(),
            self.host.clone(),
            self.port.to_string(),
        ];
        let output = self
            .runtime
            .exec(&self.container, &command)
            .await
            .map_err(|err| err.to_string())?;

        let text = output.combined().to_lowercase();
        if output.success || text.contains("succeeded") || text.contains(" open") {
            Ok(())
        } else {
            Err(format!("port probe failed: {}", output.combined().trim()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::runtime::{ExecOutput, MockContainerRuntime};
    use std::time::Duration;

    #[tokio::test]
    async fn test_resolution_failure_is_unreachable() {
        let mut runtime = MockContainerRuntime::new();
        runtime
            .expect_exec()
            .times(1)
            .returning(|_, _| Ok(ExecOutput::new(false, "", "")));

        let probe = ContainerRouteProbe::new(&runtime, "connect", "host.docker.internal", 1433);
        let err = probe
            .await_routable(&ProbePolicy::new(3, Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DependencyError::Unreachable { .. }));
    }

    #[tokio::test]
    async fn test_resolved_and_open() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_exec().times(2).returning(|_, command| {
            if command[0] == "getent" {
                Ok(ExecOutput::new(true, "192.168.65.254  host.docker.internal\n", ""))
            } else {
                Ok(ExecOutput::new(
                    true,
                    "",
                    "Connection to host.docker.internal 1433 port [tcp/*] succeeded!",
                ))
            }
        });

        let probe = ContainerRouteProbe::new(&runtime, "connect", "host.docker.internal", 1433);
        assert_eq!(probe.resolve().await.unwrap(), "192.168.65.254");
        assert_eq!(probe.check().await, Ok(()));
    }

    #[tokio::test]
    async fn test_open_signal_counts_as_reachable() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_exec().returning(|_, _| {
            Ok(ExecOutput::new(
                false,
                "",
                "db [10.0.0.5] 5432 (postgresql) open",
            ))
        });
        let probe = ContainerRouteProbe::new(&runtime, "connect", "db", 5432);
        assert_eq!(probe.check().await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_port_times_out() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_exec().returning(|_, command| {
            if command[0] == "getent" {
                Ok(ExecOutput::new(true, "10.0.0.5 db\n", ""))
            } else {
                Ok(ExecOutput::new(false, "", "db [10.0.0.5] 1433: Connection refused"))
            }
        });

        let probe = ContainerRouteProbe::new(&runtime, "connect", "db", 1433);
        let err = probe
            .await_routable(&ProbePolicy::new(3, Duration::from_secs(5)))
            .await
            .unwrap_err();
        match err {
            DependencyError::Timeout {
                attempts_used,
                last_error,
                ..
            } => {
                assert_eq!(attempts_used, 3);
                assert!(last_error.unwrap().contains("Connection refused"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
