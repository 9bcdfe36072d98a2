//! Dashboard services for the Crypto Sentiment Dashboard
//!
//! This crate sits between the sentiment API client and the terminal:
//! it discovers optional data sources, drives the fetch workflow for the
//! selected symbol and turns sentiment payloads into rendered views.

pub mod capability_probe;
pub mod display;
pub mod view_controller;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;

pub use capability_probe::{probe_capabilities, try_probe_capabilities, ProbeError};
pub use display::{format_percentage, LabelRule, ScoreDisplay, SentimentLabel};
pub use view_controller::{
    run_fetch, FetchCompletion, FetchOutcome, FetchPhase, FetchTicket, RequestId, UiState,
    ViewController,
};
pub use views::{
    render_or_fallback, render_trending, PanelView, PlainView, RenderContext, View, ViewKind,
};
