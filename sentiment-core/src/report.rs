//! Sentiment payloads returned by the sentiment API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::DataSource;

/// Aggregate sentiment for one symbol
///
/// Received from `/api/v1/sentiment/{symbol}` and never mutated locally.
/// The server leaves out the Twitter fields when it runs without Twitter
/// credentials, so every score and count defaults to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub symbol: String,
    /// Weighted mean of all sources, in [-1, 1]
    #[serde(default)]
    pub overall_score: f64,
    #[serde(default)]
    pub reddit_score: f64,
    #[serde(default)]
    pub twitter_score: f64,
    #[serde(default)]
    pub reddit_posts: u64,
    #[serde(default)]
    pub tweets: u64,
    /// When the server generated the report
    pub timestamp: DateTime<Utc>,
    /// Set by the server when Twitter is enabled but the fetch failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_error: Option<String>,
}

impl SentimentReport {
    /// Sub-score for a single source
    pub fn score_for(&self, source: DataSource) -> f64 {
        match source {
            DataSource::Reddit => self.reddit_score,
            DataSource::Twitter => self.twitter_score,
        }
    }

    /// Number of items backing a single source's score
    pub fn count_for(&self, source: DataSource) -> u64 {
        match source {
            DataSource::Reddit => self.reddit_posts,
            DataSource::Twitter => self.tweets,
        }
    }

    /// Number of items backing the overall score
    pub fn total_items(&self) -> u64 {
        self.reddit_posts + self.tweets
    }
}

/// One row of the trending list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub symbol: String,
    pub score: f64,
    pub posts: u64,
}

/// Response of `/api/v1/trending`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingReport {
    /// The server encodes an empty list as `null`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub trending: Vec<TrendingEntry>,
    pub timestamp: DateTime<Utc>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
