use crate::error::dependency::DependencyError;
use crate::probe::policy::ProbePolicy;
use crate::probe::result::ProbeResult;
use async_trait::async_trait;
use log::{debug, info};
#[cfg(test)]
use mockall::automock;
use tokio::time::sleep;

/// A single health check against one dependency.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Probe: Send + Sync {
    fn target(&self) -> String;

    async fn check(&self) -> Result<(), String>;
}

/// Poll `probe` until it reports healthy or the policy's attempt budget is
/// spent. Returns on the first healthy check.
pub async fn await_ready(
    probe: &dyn Probe,
    policy: &ProbePolicy,
) -> Result<ProbeResult, DependencyError> {
    let target = probe.target();
    let mut last_error = None;
    debug!(
        "Waiting up to {}s for {} ({} attempt(s), {}s apart)",
        policy.ceiling().as_secs(),
        target,
        policy.max_attempts,
        policy.interval.as_secs()
    );

    for attempt in 1..=policy.max_attempts {
        match probe.check().await {
            Ok(()) => {
                info!("{} is ready (attempt {}/{})", target, attempt, policy.max_attempts);
                return Ok(ProbeResult::new(target, true, attempt, last_error));
            }
            Err(err) => {
                info!(
                    "Waiting for {}... attempt {}/{}: {}",
                    target, attempt, policy.max_attempts, err
                );
                last_error = Some(err);
            }
        }

        if attempt < policy.max_attempts {
            sleep(policy.interval).await;
        }
    }

    Err(DependencyError::Timeout {
        target,
        attempts_used: policy.max_attempts,
        last_error,
    })
}
