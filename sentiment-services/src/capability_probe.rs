//! Capability Probe
//!
//! Asks the sentiment API once, at startup, which optional data sources it
//! has enabled. The probe is best-effort: any failure means "disabled".

use sentiment_client::SentimentApi;
use sentiment_core::{CapabilityFlags, TransportError};
use thiserror::Error;
use tracing::{info, warn};

/// Reasons the probe could not determine the capabilities
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("health check failed: {0}")]
    Transport(#[from] TransportError),

    #[error("health response has no services.twitter flag")]
    MissingFlag,
}

/// Query `/api/v1/health` and read the advertised flags
pub async fn try_probe_capabilities(api: &dyn SentimentApi) -> Result<CapabilityFlags, ProbeError> {
    let health = api.health().await?;
    let twitter = health.twitter_flag().ok_or(ProbeError::MissingFlag)?;
    Ok(CapabilityFlags::new(twitter))
}

/// Resolve the session's capability flags, degrading to disabled on failure
///
/// Never retries and never surfaces an error to the user.
pub async fn probe_capabilities(api: &dyn SentimentApi) -> CapabilityFlags {
    match try_probe_capabilities(api).await {
        Ok(flags) => {
            info!("Twitter data source enabled: {}", flags.twitter_enabled);
            flags
        }
        Err(e) => {
            warn!("Capability probe failed, assuming Twitter is disabled: {}", e);
            CapabilityFlags::disabled()
        }
    }
}
