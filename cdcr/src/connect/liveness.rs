use crate::connect::client::ConnectApi;
use crate::probe::readiness::Probe;
use async_trait::async_trait;

/// Kafka Connect is live once `GET /` answers 200.
pub struct ConnectLiveness<'a> {
    api: &'a dyn ConnectApi,
    url: String,
}

impl<'a> ConnectLiveness<'a> {
    pub fn new(api: &'a dyn ConnectApi, url: &str) -> Self {
        ConnectLiveness {
            api,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl<'a> Probe for ConnectLiveness<'a> {
    fn target(&self) -> String {
        format!("Kafka Connect at {}", self.url)
    }

    async fn check(&self) -> Result<(), String> {
        match self.api.root().await {
            Ok(reply) if reply.code == 200 => Ok(()),
            Ok(reply) => Err(format!("HTTP {}", reply.code)),
            Err(err) => Err(err.to_string()),
        }
    }
}
