//! Core types for the Crypto Sentiment Dashboard
//!
//! This crate defines the shared data structures used across the dashboard,
//! including sentiment reports received from the sentiment API, the health
//! payload used for capability discovery, symbol normalization and the
//! error taxonomy.

pub mod error;
pub mod health;
pub mod report;
pub mod source;
pub mod symbol;

pub use error::{DashboardError, DashboardResult, TransportError, ValidationError};
pub use health::{CapabilityFlags, HealthReport, ServiceFlags};
pub use report::{SentimentReport, TrendingEntry, TrendingReport};
pub use source::DataSource;
pub use symbol::Symbol;
