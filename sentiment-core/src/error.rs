//! Error types for the dashboard

use thiserror::Error;

/// Input rejected locally, before any network call is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid cryptocurrency symbol.")]
    EmptySymbol,
}

/// Failure talking to the sentiment API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("Failed to fetch {resource}: {reason}")]
    Status {
        resource: String,
        status: u16,
        reason: String,
    },

    /// The body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),
}

impl TransportError {
    pub fn network(msg: impl Into<String>) -> Self {
        TransportError::Network(msg.into())
    }

    pub fn status(resource: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        TransportError::Status {
            resource: resource.into(),
            status,
            reason: reason.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        TransportError::Parse(msg.into())
    }

    /// HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Dashboard-wide error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl DashboardError {
    pub fn config(msg: impl Into<String>) -> Self {
        DashboardError::Config(msg.into())
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Render(err.to_string())
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
