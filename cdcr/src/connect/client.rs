use crate::error::CdcrResult;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Status code and body of one Connect REST call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub code: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(code: u16, body: impl Into<String>) -> Self {
        HttpReply {
            code,
            body: body.into(),
        }
    }
}

/// The slice of the Kafka Connect REST API the reconciler drives. Transport
/// failures are errors; any HTTP status, including 4xx/5xx, is a reply.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectApi: Send + Sync {
    /// `GET /`
    async fn root(&self) -> CdcrResult<HttpReply>;

    /// `GET /connectors/{name}/status`
    async fn connector_status(&self, name: &str) -> CdcrResult<HttpReply>;

    /// `DELETE /connectors/{name}`
    async fn delete_connector(&self, name: &str) -> CdcrResult<HttpReply>;

    /// `POST /connectors` with the configuration document as body.
    async fn create_connector(&self, body: &str) -> CdcrResult<HttpReply>;
}
