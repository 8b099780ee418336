use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::HttpCfg;
use crate::shared::errors::FetchError;

/// Source of raw pool-data responses
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    /// GET the endpoint and return the body of a successful response
    async fn fetch_body(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed source used by the running bot
pub struct HttpPoolDataSource {
    http_client: Client,
}

impl HttpPoolDataSource {
    pub fn new(cfg: &HttpCfg) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.clone())
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl PoolDataSource for HttpPoolDataSource {
    async fn fetch_body(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Fetching pool data");

        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
