//! Sentiment API client for the Crypto Sentiment Dashboard
//!
//! This crate provides an HTTP client for the sentiment API consumed by the
//! dashboard: the health check used for capability discovery, per-symbol
//! sentiment reports and the trending list.

pub mod api;
pub mod client;

pub use api::SentimentApi;
pub use client::{ClientConfig, SentimentClient, DEFAULT_API_BASE};
