use crate::connect::client::{ConnectApi, HttpReply};
use crate::error::CdcrResult;
use async_trait::async_trait;
use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use std::time::Duration;

pub struct RestConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestConnectClient {
    pub fn new(base_url: &str, timeout: Duration) -> CdcrResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(RestConnectClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> CdcrResult<HttpReply> {
        let response = request.send().await?;
        let code = response.status().as_u16();
        let body = response.text().await?;
        debug!("Connect replied HTTP {}: {}", code, body);
        Ok(HttpReply::new(code, body))
    }
}

#[async_trait]
impl ConnectApi for RestConnectClient {
    async fn root(&self) -> CdcrResult<HttpReply> {
        self.send(self.client.get(self.url("/"))).await
    }

    async fn connector_status(&self, name: &str) -> CdcrResult<HttpReply> {
        let url = self.url(&format!("/connectors/{}/status", name));
        self.send(self.client.get(url)).await
    }

    async fn delete_connector(&self, name: &str) -> CdcrResult<HttpReply> {
        let url = self.url(&format!("/connectors/{}", name));
        self.send(self.client.delete(url)).await
    }

    async fn create_connector(&self, body: &str) -> CdcrResult<HttpReply> {
        let request = self
            .client
            .post(self.url("/connectors"))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.send(request).await
    }
}
