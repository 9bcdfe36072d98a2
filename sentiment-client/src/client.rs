//! Sentiment API client
//!
//! Provides methods for interacting with the sentiment REST API.

use async_trait::async_trait;
use reqwest::Client;
use sentiment_core::{
    DashboardError, DashboardResult, HealthReport, SentimentReport, Symbol, TransportError,
    TrendingReport,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::api::SentimentApi;

/// Default base URL (the sentiment server listens on port 8080 unless `PORT` is set)
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Configuration for the sentiment client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the sentiment server
    pub base_url: String,
    /// Per-request timeout; `None` waits for the transport to give up
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: None,
        }
    }
}

/// Sentiment API client
#[derive(Clone)]
pub struct SentimentClient {
    client: Client,
    base_url: Url,
}

impl SentimentClient {
    /// Create a client for `base_url` with no request timeout
    pub fn new(base_url: &str) -> DashboardResult<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    /// Create a client from a full configuration
    pub fn with_config(config: ClientConfig) -> DashboardResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DashboardError::config(format!("Invalid API base URL '{}': {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(DashboardError::config(format!(
                "API base URL must be an http(s) URL: {}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build `<base>/api/v1/<segments...>`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        resource: &str,
    ) -> Result<T, TransportError> {
        debug!("Fetching {} from: {}", resource, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::network(format!("Failed to fetch {}: {}", resource, e)))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(TransportError::status(
                resource,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::network(format!("Failed to read {}: {}", resource, e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| TransportError::parse(format!("Failed to parse {}: {}", resource, e)))
    }
}

#[async_trait]
impl SentimentApi for SentimentClient {
    #[instrument(skip(self))]
    async fn health(&self) -> Result<HealthReport, TransportError> {
        self.get_json(self.endpoint(&["health"]), "health status")
            .await
    }

    #[instrument(skip(self, symbol), fields(symbol = %symbol))]
    async fn sentiment(&self, symbol: &Symbol) -> Result<SentimentReport, TransportError> {
        let report: SentimentReport = self
            .get_json(
                self.endpoint(&["sentiment", symbol.as_str()]),
                "sentiment data",
            )
            .await?;

        debug!(
            "Received sentiment for {}: overall={:.3}, posts={}, tweets={}",
            report.symbol, report.overall_score, report.reddit_posts, report.tweets
        );
        Ok(report)
    }

    #[instrument(skip(self))]
    async fn trending(&self) -> Result<TrendingReport, TransportError> {
        self.get_json(self.endpoint(&["trending"]), "trending data")
            .await
    }
}
