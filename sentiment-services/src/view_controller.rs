//! View Controller
//!
//! Owns the dashboard's UI state and drives the sentiment fetch workflow:
//!
//! ```text
//! Idle -> Loading -> (Success | Failed) -> Idle
//! ```
//!
//! Every dispatched fetch gets a [`RequestId`]. Completions are applied only
//! when they belong to the most recent dispatch, so a slow response for an
//! old symbol can never overwrite the result of a newer one.

use sentiment_client::SentimentApi;
use sentiment_core::{SentimentReport, Symbol, TransportError, ValidationError};
use tracing::{debug, info, warn};

/// Identity of a dispatched fetch, strictly increasing per controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// A fetch that has been dispatched and must be reported back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: RequestId,
    pub symbol: Symbol,
}

/// Settlement of a [`FetchTicket`]
#[derive(Debug, Clone)]
pub struct FetchCompletion {
    pub id: RequestId,
    pub symbol: Symbol,
    pub result: Result<SentimentReport, TransportError>,
}

/// What [`ViewController::complete_fetch`] did with a completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Report stored, error cleared
    Succeeded,
    /// Error stored, previous report kept
    Failed,
    /// A newer fetch was dispatched since; state untouched
    Stale,
}

/// Where the current fetch cycle stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Success,
    Failed,
}

/// Ephemeral state behind the dashboard views
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Current input, always upper-cased
    pub symbol: String,
    /// True between dispatch and settlement of the latest fetch
    pub loading: bool,
    /// Message from the last failed fetch
    pub error: Option<String>,
    /// Last successfully fetched report, replaced wholesale
    pub last_report: Option<SentimentReport>,
    /// Inline message for input rejected before dispatch
    pub validation: Option<String>,
}

impl UiState {
    pub fn phase(&self) -> FetchPhase {
        if self.loading {
            FetchPhase::Loading
        } else if self.error.is_some() {
            FetchPhase::Failed
        } else if self.last_report.is_some() {
            FetchPhase::Success
        } else {
            FetchPhase::Idle
        }
    }
}

/// Single owner of [`UiState`]
///
/// All mutation happens through `&mut self`, so the state is only ever
/// touched from the task that owns the controller.
#[derive(Debug, Default)]
pub struct ViewController {
    state: UiState,
    next_id: u64,
    latest: Option<RequestId>,
}

impl ViewController {
    pub fn new(initial_symbol: &str) -> Self {
        let mut controller = Self::default();
        controller.set_symbol_input(initial_symbol);
        controller
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Most recently dispatched request, if any
    pub fn latest_request(&self) -> Option<RequestId> {
        self.latest
    }

    /// Record a keystroke-level change of the symbol input
    pub fn set_symbol_input(&mut self, raw: &str) {
        self.state.symbol = Symbol::normalize(raw);
    }

    /// Replace the symbol input and dispatch a fetch for it
    pub fn submit(&mut self, raw: &str) -> Result<FetchTicket, ValidationError> {
        self.set_symbol_input(raw.trim());
        self.begin_fetch()
    }

    /// Dispatch a fetch for the current symbol
    ///
    /// Blank input is rejected here, before any request exists.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket, ValidationError> {
        let symbol = match Symbol::parse(&self.state.symbol) {
            Ok(symbol) => symbol,
            Err(e) => {
                debug!("Rejected symbol input {:?}: {}", self.state.symbol, e);
                self.state.validation = Some(e.to_string());
                return Err(e);
            }
        };

        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.latest = Some(id);

        self.state.symbol = symbol.to_string();
        self.state.validation = None;
        self.state.error = None;
        self.state.loading = true;

        info!("Fetching sentiment for: {} (request #{})", symbol, id.0);
        Ok(FetchTicket { id, symbol })
    }

    /// Apply a settled fetch if it is still the latest one
    pub fn complete_fetch(&mut self, completion: FetchCompletion) -> FetchOutcome {
        if self.latest != Some(completion.id) {
            debug!(
                "Discarding stale response for {} (request #{}, latest #{:?})",
                completion.symbol,
                completion.id.0,
                self.latest.map(|id| id.0)
            );
            return FetchOutcome::Stale;
        }

        self.state.loading = false;
        self.state.validation = None;

        match completion.result {
            Ok(report) => {
                debug!(
                    "Applied sentiment for {}: overall={:.3}",
                    report.symbol, report.overall_score
                );
                self.state.error = None;
                self.state.last_report = Some(report);
                FetchOutcome::Succeeded
            }
            Err(e) => {
                warn!("Error fetching sentiment for {}: {}", completion.symbol, e);
                self.state.error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Dispatch, await and apply a fetch for the current symbol in one go
    pub async fn refresh(&mut self, api: &dyn SentimentApi) -> Result<FetchOutcome, ValidationError> {
        let ticket = self.begin_fetch()?;
        let completion = run_fetch(api, ticket).await;
        Ok(self.complete_fetch(completion))
    }
}

/// Perform the request described by `ticket`
pub async fn run_fetch(api: &dyn SentimentApi, ticket: FetchTicket) -> FetchCompletion {
    let result = api.sentiment(&ticket.symbol).await;
    FetchCompletion {
        id: ticket.id,
        symbol: ticket.symbol,
        result,
    }
}
