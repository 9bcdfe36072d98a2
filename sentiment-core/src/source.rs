//! Social data sources backing a sentiment report

use serde::{Deserialize, Serialize};
use std::fmt;

/// Data sources aggregated by the sentiment API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Reddit posts - always collected
    Reddit,
    /// Twitter/X posts - only when the server has credentials
    Twitter,
}

impl DataSource {
    pub const ALL: [DataSource; 2] = [DataSource::Reddit, DataSource::Twitter];

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DataSource::Reddit => "Reddit",
            DataSource::Twitter => "Twitter",
        }
    }

    /// Plural noun for the items counted from this source
    pub fn unit(&self) -> &'static str {
        match self {
            DataSource::Reddit => "posts",
            DataSource::Twitter => "tweets",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
