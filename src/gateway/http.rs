//! HTTP search gateway backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header;
use url::Url;

use crate::candidate::Candidate;
use crate::config::GatewayConfig;
use crate::error::{MatchformError, Result};

use super::{SearchEndpoint, SearchGateway};

/// Gateway that issues `GET` requests against the player search API
#[derive(Debug, Clone)]
pub struct HttpSearchGateway {
    client: Client,
    base_url: Url,
}

impl HttpSearchGateway {
    /// Create a gateway using the transport's default timeouts
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a gateway with an optional overall request timeout
    pub fn with_timeout(base_url: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("matchform/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, base_url)
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client, base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(MatchformError::Config(format!(
                "gateway base URL '{base_url}' cannot be used as a base"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let base_url = Url::parse(&config.resolved_base_url())?;
        Self::with_timeout(base_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl SearchGateway for HttpSearchGateway {
    async fn search(&self, endpoint: &SearchEndpoint, query: &str) -> Result<Vec<Candidate>> {
        let url = endpoint.request_url(&self.base_url, query)?;
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MatchformError::Gateway {
                status,
                message: message.trim().to_string(),
            });
        }

        // The search API encodes an empty result set as `null` on some paths
        let body = response.bytes().await?;
        let candidates: Option<Vec<Candidate>> = serde_json::from_slice(&body)?;
        Ok(candidates.unwrap_or_default())
    }
}
