use std::time::Duration;

/// Bounded polling budget: at most `max_attempts` checks, `interval` apart.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbePolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl ProbePolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        ProbePolicy {
            max_attempts,
            interval,
        }
    }

    /// Longest time a probe under this policy can block.
    pub fn ceiling(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for ProbePolicy {
    fn default() -> Self {
        ProbePolicy::new(30, Duration::from_secs(10))
    }
}
