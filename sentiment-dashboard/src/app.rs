//! Dashboard event loop
//!
//! A single task owns the [`ViewController`]. User input arrives line by
//! line; fetches run as spawned tasks and report back over a channel, so
//! the UI state is never touched from more than one place.

use std::io::Write;
use std::sync::Arc;

use sentiment_client::SentimentApi;
use sentiment_core::{DashboardResult, TransportError, TrendingReport};
use sentiment_services::{
    probe_capabilities, render_or_fallback, render_trending, run_fetch, FetchCompletion,
    FetchOutcome, FetchTicket, RenderContext, ViewController, ViewKind,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;

const HELP: &str = "\
Type a symbol (e.g. BTC) and press Enter to analyse it.
  /analyze   re-run the analysis for the current symbol
  /trending  show trending symbols
  /help      show this help
  /quit      exit";

const FRAME_SEPARATOR: &str = "========================================";

/// Completion delivered back to the event loop
#[derive(Debug)]
pub enum AppEvent {
    Sentiment(FetchCompletion),
    Trending(Result<TrendingReport, TransportError>),
}

/// What a line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputAction {
    Quit,
    Analyze,
    Trending,
    Help,
    Symbol(String),
}

fn parse_input(line: &str) -> InputAction {
    match line.trim().to_lowercase().as_str() {
        "/quit" | "/q" | "/exit" => InputAction::Quit,
        "/analyze" | "/a" => InputAction::Analyze,
        "/trending" | "/t" => InputAction::Trending,
        "/help" | "/h" | "/?" => InputAction::Help,
        _ => InputAction::Symbol(line.to_string()),
    }
}

enum Step {
    Input(std::io::Result<Option<String>>),
    Event(AppEvent),
    Closed,
}

/// Interactive dashboard session
pub struct Dashboard {
    api: Arc<dyn SentimentApi>,
    controller: ViewController,
    ctx: RenderContext,
    view: ViewKind,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<AppEvent>>,
    in_flight: usize,
}

impl Dashboard {
    /// Probe capabilities once and build the session
    pub async fn start(api: Arc<dyn SentimentApi>, config: &DashboardConfig) -> Self {
        let capabilities = probe_capabilities(api.as_ref()).await;
        let ctx = RenderContext::new(capabilities, config.label_rule);
        Self::new(api, ctx, config.view, &config.initial_symbol)
    }

    pub fn new(
        api: Arc<dyn SentimentApi>,
        ctx: RenderContext,
        view: ViewKind,
        initial_symbol: &str,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            controller: ViewController::new(initial_symbol),
            ctx,
            view,
            events_tx,
            events_rx: Some(events_rx),
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let completion = run_fetch(api.as_ref(), ticket).await;
            if tx.send(AppEvent::Sentiment(completion)).is_err() {
                debug!("Dashboard closed before sentiment response arrived");
            }
        });
    }

    fn dispatch_trending(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let result = api.trending().await;
            if tx.send(AppEvent::Trending(result)).is_err() {
                debug!("Dashboard closed before trending response arrived");
            }
        });
    }

    /// Dispatch a fetch for the current symbol (the "Analyze" action)
    fn analyze(&mut self) {
        if let Ok(ticket) = self.controller.begin_fetch() {
            self.dispatch(ticket);
        }
    }

    fn render(&self, out: &mut dyn Write, fallback: &mut dyn Write) -> DashboardResult<()> {
        writeln!(out, "{}", FRAME_SEPARATOR)?;
        render_or_fallback(&self.view, self.controller.state(), &self.ctx, out, fallback)
    }

    fn render_trending(
        &self,
        result: Result<TrendingReport, TransportError>,
        out: &mut dyn Write,
    ) -> DashboardResult<()> {
        writeln!(out, "{}", FRAME_SEPARATOR)?;
        match result {
            Ok(report) => render_trending(&report, &self.ctx, out)?,
            Err(e) => {
                warn!("Error fetching trending symbols: {}", e);
                writeln!(out, "Error")?;
                writeln!(out, "{}", e)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Run until `/quit`, or until input ends and every request has settled
    pub async fn run<R>(
        &mut self,
        input: R,
        out: &mut dyn Write,
        fallback: &mut dyn Write,
    ) -> DashboardResult<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let Some(mut events_rx) = self.events_rx.take() else {
            warn!("Dashboard session already ran");
            return Ok(());
        };
        let mut lines = input.lines();
        let mut input_open = true;

        info!(
            "Dashboard started (view: {}, twitter: {})",
            self.view, self.ctx.capabilities.twitter_enabled
        );

        self.analyze();
        self.render(out, fallback)?;

        loop {
            if !input_open && self.in_flight == 0 {
                break;
            }

            let step = tokio::select! {
                line = lines.next_line(), if input_open => Step::Input(line),
                Some(event) = events_rx.recv() => Step::Event(event),
                else => Step::Closed,
            };

            match step {
                Step::Input(Ok(Some(line))) => match parse_input(&line) {
                    InputAction::Quit => break,
                    InputAction::Help => {
                        writeln!(out, "{}", HELP)?;
                        continue;
                    }
                    InputAction::Trending => {
                        self.dispatch_trending();
                        continue;
                    }
                    InputAction::Analyze => {
                        if self.controller.state().loading {
                            debug!("Analysis already in progress");
                            continue;
                        }
                        self.analyze();
                    }
                    InputAction::Symbol(raw) => {
                        if let Ok(ticket) = self.controller.submit(&raw) {
                            self.dispatch(ticket);
                        }
                    }
                },
                Step::Input(Ok(None)) => {
                    debug!("Input closed, waiting for {} request(s)", self.in_flight);
                    input_open = false;
                    continue;
                }
                Step::Input(Err(e)) => {
                    warn!("Failed to read input: {}", e);
                    input_open = false;
                    continue;
                }
                Step::Event(AppEvent::Sentiment(completion)) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if self.controller.complete_fetch(completion) == FetchOutcome::Stale {
                        continue;
                    }
                }
                Step::Event(AppEvent::Trending(result)) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    self.render_trending(result, out)?;
                    continue;
                }
                Step::Closed => break,
            }

            self.render(out, fallback)?;
        }

        info!("Dashboard stopped");
        Ok(())
    }
}

/// Analyse one symbol, render it once and return
pub async fn show_once(
    api: Arc<dyn SentimentApi>,
    config: &DashboardConfig,
    symbol: &str,
    out: &mut dyn Write,
    fallback: &mut dyn Write,
) -> DashboardResult<()> {
    let capabilities = probe_capabilities(api.as_ref()).await;
    let ctx = RenderContext::new(capabilities, config.label_rule);
    let mut controller = ViewController::new(symbol);

    if let Err(e) = controller.refresh(api.as_ref()).await {
        debug!("Nothing fetched: {}", e);
    }

    render_or_fallback(&config.view, controller.state(), &ctx, out, fallback)
}

/// Fetch the trending list, render it once and return
pub async fn trending_once(
    api: Arc<dyn SentimentApi>,
    config: &DashboardConfig,
    out: &mut dyn Write,
) -> DashboardResult<()> {
    let report = api.trending().await?;
    let ctx = RenderContext::new(Default::default(), config.label_rule);
    render_trending(&report, &ctx, out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use sentiment_core::{CapabilityFlags, HealthReport, SentimentReport, ServiceFlags, Symbol};
    use sentiment_services::LabelRule;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct StubApi {
        twitter: Option<bool>,
        trending_fails: bool,
        sentiment_calls: AtomicUsize,
    }

    #[async_trait]
    impl SentimentApi for StubApi {
        async fn health(&self) -> Result<HealthReport, TransportError> {
            Ok(HealthReport {
                status: Some("healthy".to_string()),
                services: Some(ServiceFlags {
                    twitter: self.twitter,
                }),
            })
        }

        async fn sentiment(&self, symbol: &Symbol) -> Result<SentimentReport, TransportError> {
            self.sentiment_calls.fetch_add(1, Ordering::SeqCst);
            match symbol.as_str() {
                "BTC" => {
                    // Slow enough that a later request overtakes it
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok(report("BTC", 0.25, 0.3, 0.1, 120, 45))
                }
                "ETH" => Ok(report("ETH", -0.4, -0.4, 0.0, 10, 0)),
                _ => Err(TransportError::status("sentiment data", 500, "Internal Server Error")),
            }
        }

        async fn trending(&self) -> Result<TrendingReport, TransportError> {
            if self.trending_fails {
                return Err(TransportError::status("trending symbols", 500, "Internal Server Error"));
            }
            Ok(TrendingReport {
                trending: Vec::new(),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            })
        }
    }

    fn report(symbol: &str, overall: f64, reddit: f64, twitter: f64, posts: u64, tweets: u64) -> SentimentReport {
        SentimentReport {
            symbol: symbol.to_string(),
            overall_score: overall,
            reddit_score: reddit,
            twitter_score: twitter,
            reddit_posts: posts,
            tweets,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            twitter_error: None,
        }
    }

    fn config(view: ViewKind) -> DashboardConfig {
        DashboardConfig {
            client: Default::default(),
            view,
            label_rule: LabelRule::Zero,
            initial_symbol: "BTC".to_string(),
        }
    }

    async fn run_session(api: Arc<StubApi>, view: ViewKind, input: &'static str) -> (Dashboard, String) {
        let mut dashboard = Dashboard::start(api, &config(view)).await;
        let mut out = Vec::new();
        let mut fallback = Vec::new();

        dashboard
            .run(input.as_bytes(), &mut out, &mut fallback)
            .await
            .unwrap();

        assert!(fallback.is_empty());
        (dashboard, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("/quit"), InputAction::Quit);
        assert_eq!(parse_input(" /A "), InputAction::Analyze);
        assert_eq!(parse_input("/trending"), InputAction::Trending);
        assert_eq!(parse_input("eth"), InputAction::Symbol("eth".to_string()));
        assert_eq!(parse_input(""), InputAction::Symbol(String::new()));
    }

    #[tokio::test]
    async fn test_initial_symbol_is_fetched_on_start() {
        let api = Arc::new(StubApi {
            twitter: Some(true),
            ..StubApi::default()
        });
        let (dashboard, text) = run_session(api.clone(), ViewKind::Panels, "").await;

        assert_eq!(api.sentiment_calls.load(Ordering::SeqCst), 1);
        assert!(text.contains("[ Overall Sentiment ]\n  25.0%\n"));
        assert!(text.contains("[ Twitter Sentiment ]\n  10.0%\n  Based on 45 tweets\n"));
        assert!(!dashboard.controller().state().loading);
    }

    #[tokio::test]
    async fn test_newer_symbol_wins_over_slow_response() {
        let api = Arc::new(StubApi::default());
        let (dashboard, _) = run_session(api.clone(), ViewKind::Plain, "eth\n").await;

        let state = dashboard.controller().state();
        assert_eq!(state.symbol, "ETH");
        assert_eq!(state.last_report.as_ref().map(|r| r.symbol.as_str()), Some("ETH"));
        assert!(!state.loading);
        assert_eq!(api.sentiment_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_input_shows_validation_without_request() {
        let api = Arc::new(StubApi::default());
        let (_, text) = run_session(api.clone(), ViewKind::Plain, "   \n").await;

        assert!(text.contains("Please enter a valid cryptocurrency symbol.\n"));
        assert_eq!(api.sentiment_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_rendered_in_plain_view() {
        let api = Arc::new(StubApi::default());
        let (dashboard, text) = run_session(api, ViewKind::Plain, "xyz\n").await;

        assert!(text.ends_with("Error fetching data. Please try again.\n"));
        assert!(!dashboard.controller().state().loading);
    }

    #[tokio::test]
    async fn test_twitter_hidden_when_probe_says_disabled() {
        let api = Arc::new(StubApi {
            twitter: Some(false),
            ..StubApi::default()
        });
        let (_, text) = run_session(api, ViewKind::Plain, "").await;

        assert!(text.contains("Reddit Score: 30.0% (120 posts)\n"));
        assert!(!text.contains("Twitter Score"));
    }

    #[tokio::test]
    async fn test_trending_command() {
        let api = Arc::new(StubApi::default());
        let (_, text) = run_session(api, ViewKind::Panels, "/trending\n").await;

        assert!(text.contains("Trending\n  No trending symbols right now.\n"));
    }

    #[tokio::test]
    async fn test_blank_input_during_slow_fetch_still_shows_result() {
        let api = Arc::new(StubApi::default());
        let (dashboard, text) = run_session(api.clone(), ViewKind::Plain, "   \n").await;

        let state = dashboard.controller().state();
        assert!(state.validation.is_none());
        assert_eq!(state.symbol, "");
        assert!(text.contains("Please enter a valid cryptocurrency symbol.\n"));
        assert!(text.ends_with("BTC: 25.0% 📈 Bullish\nReddit Score: 30.0% (120 posts)\n"));
        assert_eq!(api.sentiment_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_trending_error_is_rendered() {
        let api = Arc::new(StubApi {
            trending_fails: true,
            ..StubApi::default()
        });
        let (_, text) = run_session(api, ViewKind::Panels, "/trending\n").await;

        assert!(text.contains("Error\nFailed to fetch trending symbols: Internal Server Error\n"));
    }

    #[tokio::test]
    async fn test_show_once() {
        let api: Arc<dyn SentimentApi> = Arc::new(StubApi {
            twitter: Some(true),
            ..StubApi::default()
        });
        let mut out = Vec::new();
        let mut fallback = Vec::new();

        show_once(api, &config(ViewKind::Plain), "btc", &mut out, &mut fallback)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "BTC: 25.0% 📈 Bullish\nReddit Score: 30.0% (120 posts)\nTwitter Score: 10.0% (45 tweets)\n"
        );
    }

    #[test]
    fn test_context_defaults_to_disabled_capabilities() {
        let ctx = RenderContext::new(Default::default(), LabelRule::Zero);
        assert_eq!(ctx.capabilities, CapabilityFlags::disabled());
    }
}
