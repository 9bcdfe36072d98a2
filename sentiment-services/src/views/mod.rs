//! Views rendering [`UiState`] to a text target

mod panel;
mod plain;
mod trending;

pub use panel::PanelView;
pub use plain::PlainView;
pub use trending::render_trending;

use sentiment_core::{CapabilityFlags, DashboardError, DashboardResult};
use std::fmt;
use std::io::{self, Write};
use tracing::error;

use crate::display::LabelRule;
use crate::view_controller::UiState;

/// Read-only settings shared by every view for the whole session
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderContext {
    pub capabilities: CapabilityFlags,
    pub label_rule: LabelRule,
}

impl RenderContext {
    pub fn new(capabilities: CapabilityFlags, label_rule: LabelRule) -> Self {
        Self {
            capabilities,
            label_rule,
        }
    }
}

/// Something that can draw the dashboard
pub trait View {
    fn render(&self, state: &UiState, ctx: &RenderContext, out: &mut dyn Write) -> io::Result<()>;
}

/// Available dashboard layouts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewKind {
    /// Overall, Reddit and Twitter panels
    #[default]
    Panels,
    /// Single compact result block
    Plain,
}

impl View for ViewKind {
    fn render(&self, state: &UiState, ctx: &RenderContext, out: &mut dyn Write) -> io::Result<()> {
        match self {
            ViewKind::Panels => PanelView.render(state, ctx, out),
            ViewKind::Plain => PlainView.render(state, ctx, out),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Panels => f.write_str("panels"),
            ViewKind::Plain => f.write_str("plain"),
        }
    }
}

impl std::str::FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "panels" | "panel" | "components" => Ok(ViewKind::Panels),
            "plain" | "simple" => Ok(ViewKind::Plain),
            _ => Err(format!("Unknown view: {}", s)),
        }
    }
}

/// Render `state`, replacing the whole view with a plain error line on failure
///
/// A failed render is unrecoverable for the session: the message goes to
/// `fallback` and the error is handed back to the caller.
pub fn render_or_fallback(
    view: &dyn View,
    state: &UiState,
    ctx: &RenderContext,
    out: &mut dyn Write,
    fallback: &mut dyn Write,
) -> DashboardResult<()> {
    let result = view.render(state, ctx, out).and_then(|_| out.flush());

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Error rendering dashboard: {}", e);
            writeln!(fallback, "Error loading application: {}", e)?;
            Err(DashboardError::from(e))
        }
    }
}

#[cfg(test)]
pub(crate) fn render_to_string(view: &dyn View, state: &UiState, ctx: &RenderContext) -> String {
    let mut buf = Vec::new();
    view.render(state, ctx, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}
