use crate::core::errors::OstError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::instrument;

/// Raw HTTP capability the client is built on
///
/// Implementations only move bytes: they return the response body as text
/// whatever the HTTP status, because the envelope decides success. They must
/// be safe to call concurrently.
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Send a POST with `body` as the entity and return the response text
    async fn post(&self, url: &str, body: &str, content_type: &str) -> Result<String, OstError>;

    /// Send a GET to `url` (query string included) and return the response text
    async fn get(&self, url: &str) -> Result<String, OstError>;
}

/// Configuration for the bundled reqwest transport
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: crate::core::config::DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("ost-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

pub struct TransportBuilder {
    config: TransportConfig,
    client: Option<Client>,
}

impl TransportBuilder {
    pub fn new(config: TransportConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Reuse an existing connection pool instead of building one
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> Result<ReqwestTransport, OstError> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(Duration::from_secs(self.config.timeout_seconds))
                .user_agent(&self.config.user_agent)
                .build()?,
        };

        Ok(ReqwestTransport {
            client,
            config: self.config,
        })
    }
}

/// `NetworkProvider` over a pooled `reqwest::Client`; no automatic retries
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, OstError> {
        TransportBuilder::new(TransportConfig::default()).build()
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    #[instrument(skip(response), fields(status = %response.status()))]
    async fn read_body(response: Response) -> Result<String, OstError> {
        Ok(response.text().await?)
    }
}

#[async_trait]
impl NetworkProvider for ReqwestTransport {
    #[instrument(skip_all, fields(content_type = %content_type, body_len = body.len()))]
    async fn post(&self, url: &str, body: &str, content_type: &str) -> Result<String, OstError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body.to_string())
            .send()
            .await?;

        Self::read_body(response).await
    }

    // The URL carries credentials and the signature, so it stays out of the span.
    #[instrument(skip(self, url))]
    async fn get(&self, url: &str) -> Result<String, OstError> {
        let response = self.client.get(url).send().await?;
        Self::read_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.user_agent.starts_with("ost-client/"));
    }

    #[test]
    fn test_builder() {
        let transport = TransportBuilder::new(
            TransportConfig::default()
                .with_timeout(5)
                .with_user_agent("test-agent".to_string()),
        )
        .build()
        .unwrap();
        assert_eq!(transport.config().timeout_seconds, 5);
        assert_eq!(transport.config().user_agent, "test-agent");
    }

    #[test]
    fn test_shared_pool() {
        let pool = Client::new();
        let transport = TransportBuilder::new(TransportConfig::default())
            .with_client(pool)
            .build()
            .unwrap();
        assert_eq!(transport.config().timeout_seconds, 30);
        assert!(ReqwestTransport::new().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let transport =
            TransportBuilder::new(TransportConfig::default().with_timeout(2)).build().unwrap();
        let err = transport
            .get("http://127.0.0.1:9/users/?api_key=k")
            .await
            .unwrap_err();
        assert!(matches!(err, OstError::Transport(_)));
    }
}
