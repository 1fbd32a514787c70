use crate::probe::readiness::Probe;
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Reachability of `host:port` from the machine running the reconciler.
pub struct TcpProbe {
    host: String,
    port: u16,
    connect_timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: &str, port: u16, connect_timeout: Duration) -> Self {
        TcpProbe {
            host: host.to_string(),
            port,
            connect_timeout,
        }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    async fn check(&self) -> Result<(), String> {
        let connect = TcpStream::connect((self.host.as_str(), self.port));
        match timeout(self.connect_timeout, connect).await {
            Ok(Ok(_stream)) => Ok(()),
            Ok(Err(err)) => Err(err.to_string()),
            Err(_) => Err(format!(
                "connect timed out after {}s",
                self.connect_timeout.as_secs()
            )),
        }
    }
}
