//! Health payload and the capability flags derived from it

use serde::{Deserialize, Serialize};

use crate::DataSource;

/// Per-service availability reported by `/api/v1/health`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceFlags {
    #[serde(default)]
    pub twitter: Option<bool>,
}

/// Response of `/api/v1/health`
///
/// Older servers only answer `{"status": "healthy"}`, so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub services: Option<ServiceFlags>,
}

impl HealthReport {
    /// The advertised Twitter flag, if the server sent one
    pub fn twitter_flag(&self) -> Option<bool> {
        self.services.as_ref().and_then(|s| s.twitter)
    }
}

/// Optional data sources available for this session
///
/// Resolved once at startup and passed by value to every renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityFlags {
    pub twitter_enabled: bool,
}

impl CapabilityFlags {
    pub fn new(twitter_enabled: bool) -> Self {
        Self { twitter_enabled }
    }

    /// Everything optional switched off
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, source: DataSource) -> bool {
        match source {
            DataSource::Reddit => true,
            DataSource::Twitter => self.twitter_enabled,
        }
    }

    /// Sources to render, in display order
    pub fn enabled_sources(&self) -> Vec<DataSource> {
        DataSource::ALL
            .into_iter()
            .filter(|s| self.is_enabled(*s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_with_services() {
        let json = r#"{"status": "healthy", "services": {"twitter": true}}"#;
        let health: HealthReport = serde_json::from_str(json).unwrap();
        assert_eq!(health.twitter_flag(), Some(true));
    }

    #[test]
    fn test_health_without_services() {
        let json = r#"{"status": "healthy"}"#;
        let health: HealthReport = serde_json::from_str(json).unwrap();
        assert_eq!(health.twitter_flag(), None);
    }

    #[test]
    fn test_enabled_sources() {
        assert_eq!(
            CapabilityFlags::disabled().enabled_sources(),
            vec![DataSource::Reddit]
        );
        assert_eq!(
            CapabilityFlags::new(true).enabled_sources(),
            vec![DataSource::Reddit, DataSource::Twitter]
        );
    }
}
