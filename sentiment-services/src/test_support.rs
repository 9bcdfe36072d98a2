//! In-memory sentiment API for unit tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use sentiment_client::SentimentApi;
use sentiment_core::{HealthReport, SentimentReport, Symbol, TransportError, TrendingReport};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned responses keyed by symbol, with call counters
#[derive(Default)]
pub struct FakeApi {
    health: Option<Result<HealthReport, TransportError>>,
    sentiment: HashMap<String, Result<SentimentReport, TransportError>>,
    delays: HashMap<String, Duration>,
    health_calls: AtomicUsize,
    sentiment_calls: AtomicUsize,
}

impl FakeApi {
    pub fn with_health(mut self, response: Result<HealthReport, TransportError>) -> Self {
        self.health = Some(response);
        self
    }

    pub fn with_sentiment(
        mut self,
        symbol: &str,
        response: Result<SentimentReport, TransportError>,
    ) -> Self {
        self.sentiment.insert(symbol.to_string(), response);
        self
    }

    pub fn with_delay(mut self, symbol: &str, delay: Duration) -> Self {
        self.delays.insert(symbol.to_string(), delay);
        self
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn sentiment_calls(&self) -> usize {
        self.sentiment_calls.load(Ordering::SeqCst)
    }
}

fn unconfigured() -> TransportError {
    TransportError::network("no response configured")
}

#[async_trait]
impl SentimentApi for FakeApi {
    async fn health(&self) -> Result<HealthReport, TransportError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.health.clone().unwrap_or_else(|| Err(unconfigured()))
    }

    async fn sentiment(&self, symbol: &Symbol) -> Result<SentimentReport, TransportError> {
        self.sentiment_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(symbol.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.sentiment
            .get(symbol.as_str())
            .cloned()
            .unwrap_or_else(|| Err(unconfigured()))
    }

    async fn trending(&self) -> Result<TrendingReport, TransportError> {
        Err(unconfigured())
    }
}

/// Report stamped at 2024-01-01T00:00:00Z
pub fn report(
    symbol: &str,
    overall: f64,
    reddit: f64,
    twitter: f64,
    reddit_posts: u64,
    tweets: u64,
) -> SentimentReport {
    SentimentReport {
        symbol: symbol.to_string(),
        overall_score: overall,
        reddit_score: reddit,
        twitter_score: twitter,
        reddit_posts,
        tweets,
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        twitter_error: None,
    }
}
