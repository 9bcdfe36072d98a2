//! Crypto Sentiment Dashboard
//!
//! Terminal front end for the sentiment API: analyse a symbol once, list
//! trending symbols, or keep an interactive dashboard open.

mod app;
mod config;

use std::io;
use std::sync::Arc;

use clap::Parser;
use sentiment_client::{SentimentApi, SentimentClient};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::app::Dashboard;
use crate::config::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Logs go to stderr so they never interleave with the rendered view
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,sentiment_dashboard=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.dashboard_config()?;

    let client = SentimentClient::with_config(config.client.clone())?;
    info!("Using sentiment API at {}", client.base_url());
    let api: Arc<dyn SentimentApi> = Arc::new(client);

    let mut out = io::stdout();
    let mut fallback = io::stderr();

    match cli.command() {
        Command::Watch => {
            let mut dashboard = Dashboard::start(api, &config).await;
            let input = BufReader::new(tokio::io::stdin());
            dashboard.run(input, &mut out, &mut fallback).await?;
            info!("Closed dashboard on {}", dashboard.controller().state().symbol);
        }
        Command::Show { target } => {
            app::show_once(api, &config, &target, &mut out, &mut fallback).await?;
        }
        Command::Trending => {
            app::trending_once(api, &config, &mut out).await?;
        }
    }

    Ok(())
}
