use crate::container::runtime::{ContainerRuntime, ExecOutput};
use crate::error::CdcrResult;
use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

/// Drives `docker` (or a CLI-compatible binary such as `podman`).
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new(binary: &str) -> Self {
        DockerCli {
            binary: binary.to_string(),
        }
    }

    async fn run(&self, args: &[String]) -> CdcrResult<ExecOutput> {
        debug!("Running {} {}", self.binary, args.join(" "));
        let output = Command::new(&self.binary).args(args).output().await?;
        Ok(ExecOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn exec(&self, container: &str, command: &[String]) -> CdcrResult<ExecOutput> {
        let mut args = vec!["exec".to_string(), container.to_string()];
        args.extend(command.iter().cloned());
        self.run(&args).await
    }

    async fn recent_logs(&self, container: &str, lines: usize) -> CdcrResult<Vec<String>> {
        let args = vec![
            "logs".to_string(),
            "--tail".to_string(),
            lines.to_string(),
            container.to_string(),
        ];
        let output = self.run(&args).await?;
        Ok(output.combined().lines().map(|line| line.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_an_error() {
        let cli = DockerCli::new("cdcr-no-such-container-binary");
        let result = cli.exec("connect", &["true".to_string()]).await;
        assert!(result.is_err());
    }
}
