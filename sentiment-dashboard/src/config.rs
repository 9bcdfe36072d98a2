//! Command line and environment configuration
//!
//! Every flag falls back to an environment variable, which may itself come
//! from `.env.local` (loaded before parsing).

use clap::{Parser, Subcommand};
use sentiment_client::{ClientConfig, DEFAULT_API_BASE};
use sentiment_services::{LabelRule, ViewKind};
use std::time::Duration;

/// Terminal dashboard for crypto social-media sentiment
#[derive(Debug, Parser)]
#[command(name = "sentiment-dashboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the sentiment API
    #[arg(long, env = "SENTIMENT_API_URL", default_value = DEFAULT_API_BASE, global = true)]
    pub api_url: String,

    /// Layout: panels or plain
    #[arg(long, env = "SENTIMENT_VIEW", default_value = "panels", global = true)]
    pub view: ViewKind,

    /// Score labelling: zero, dead-zone or dead-zone:<threshold>
    #[arg(long, env = "SENTIMENT_LABEL_RULE", default_value = "dead-zone", global = true)]
    pub label_rule: LabelRule,

    /// Symbol analysed when the dashboard opens
    #[arg(short, long, env = "SENTIMENT_SYMBOL", default_value = "BTC", global = true)]
    pub symbol: String,

    /// Request timeout in seconds (unset: wait for the transport)
    #[arg(long, env = "SENTIMENT_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive dashboard (default)
    Watch,

    /// Analyse one symbol and exit
    Show {
        /// Symbol to analyse, e.g. BTC
        #[arg(value_name = "SYMBOL")]
        target: String,
    },

    /// List trending symbols and exit
    Trending,
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub client: ClientConfig,
    pub view: ViewKind,
    pub label_rule: LabelRule,
    pub initial_symbol: String,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SENTIMENT_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Watch)
    }

    pub fn dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        let timeout = match self.timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(DashboardConfig {
            client: ClientConfig {
                base_url: self.api_url.clone(),
                timeout,
            },
            view: self.view,
            label_rule: self.label_rule,
            initial_symbol: self.symbol.clone(),
        })
    }
}
