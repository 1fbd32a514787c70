use crate::error::CdcrResult;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn new(success: bool, stdout: &str, stderr: &str) -> Self {
        ExecOutput {
            success,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr)
    }
}

/// Command execution and log access for named service containers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn exec(&self, container: &str, command: &[String]) -> CdcrResult<ExecOutput>;

    async fn recent_logs(&self, container: &str, lines: usize) -> CdcrResult<Vec<String>>;
}
