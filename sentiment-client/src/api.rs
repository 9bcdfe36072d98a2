//! Transport-agnostic view of the sentiment API

use async_trait::async_trait;
use sentiment_core::{HealthReport, SentimentReport, Symbol, TransportError, TrendingReport};
use std::sync::Arc;

/// Read-only operations the dashboard needs from the sentiment API
///
/// The dashboard services only talk to this trait, so the HTTP client can be
/// swapped for an in-memory implementation in tests.
#[async_trait]
pub trait SentimentApi: Send + Sync {
    /// `GET /api/v1/health`
    async fn health(&self) -> Result<HealthReport, TransportError>;

    /// `GET /api/v1/sentiment/{symbol}`
    async fn sentiment(&self, symbol: &Symbol) -> Result<SentimentReport, TransportError>;

    /// `GET /api/v1/trending`
    async fn trending(&self) -> Result<TrendingReport, TransportError>;
}

#[async_trait]
impl<T: SentimentApi + ?Sized> SentimentApi for Arc<T> {
    async fn health(&self) -> Result<HealthReport, TransportError> {
        (**self).health().await
    }

    async fn sentiment(&self, symbol: &Symbol) -> Result<SentimentReport, TransportError> {
        (**self).sentiment(symbol).await
    }

    async fn trending(&self) -> Result<TrendingReport, TransportError> {
        (**self).trending().await
    }
}
