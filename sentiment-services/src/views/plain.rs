//! Plain view: a single result block, one message at a time

use sentiment_core::DataSource;
use std::io::{self, Write};

use super::{RenderContext, View};
use crate::display::{format_percentage, ScoreDisplay};
use crate::view_controller::UiState;

/// Generic message shown instead of the transport error text
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data. Please try again.";

/// Shows exactly one of: validation message, progress, error, or result
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainView;

impl View for PlainView {
    fn render(&self, state: &UiState, ctx: &RenderContext, out: &mut dyn Write) -> io::Result<()> {
        if let Some(message) = &state.validation {
            return writeln!(out, "{}", message);
        }
        if state.loading {
            return writeln!(out, "Analyzing...");
        }
        if state.error.is_some() {
            return writeln!(out, "{}", FETCH_ERROR_MESSAGE);
        }
        let Some(report) = &state.last_report else {
            return Ok(());
        };

        let overall = ScoreDisplay::new(report.overall_score, ctx.label_rule);
        writeln!(
            out,
            "{}: {} {} {}",
            report.symbol.to_uppercase(),
            overall.percentage,
            overall.label.icon(),
            overall.label
        )?;

        for source in ctx.capabilities.enabled_sources() {
            writeln!(
                out,
                "{} Score: {} ({} {})",
                source,
                format_percentage(report.score_for(source)),
                report.count_for(source),
                source.unit()
            )?;
        }

        if ctx.capabilities.is_enabled(DataSource::Twitter) {
            if let Some(err) = &report.twitter_error {
                writeln!(out, "({})", err)?;
            }
        }

        Ok(())
    }
}
