//! Panel view: one card per score, in the style of the component dashboard

use chrono::Local;
use sentiment_core::{DataSource, SentimentReport};
use std::io::{self, Write};

use super::{RenderContext, View};
use crate::display::ScoreDisplay;
use crate::view_controller::UiState;

const RULE: &str = "----------------------------------------";

/// Header, status line, overall panel, per-source panels and footer
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelView;

impl PanelView {
    fn write_panel(out: &mut dyn Write, title: &str, display: &ScoreDisplay) -> io::Result<()> {
        writeln!(out, "[ {} ]", title)?;
        writeln!(out, "  {}", display.percentage)?;
        if let Some(caption) = &display.caption {
            writeln!(out, "  {}", caption)?;
        }
        writeln!(out, "  {}", display.label)?;
        writeln!(out)
    }

    fn write_report(
        out: &mut dyn Write,
        report: &SentimentReport,
        ctx: &RenderContext,
    ) -> io::Result<()> {
        // The overall score is weighted over every source the server used
        Self::write_panel(
            out,
            "Overall Sentiment",
            &ScoreDisplay::with_count(report.overall_score, report.total_items(), ctx.label_rule),
        )?;

        for source in ctx.capabilities.enabled_sources() {
            let title = format!("{} Sentiment", source);
            let display = ScoreDisplay::for_source(
                report.score_for(source),
                report.count_for(source),
                source,
                ctx.label_rule,
            );
            Self::write_panel(out, &title, &display)?;

            if source == DataSource::Twitter {
                if let Some(err) = &report.twitter_error {
                    writeln!(out, "  ({})", err)?;
                    writeln!(out)?;
                }
            }
        }

        writeln!(
            out,
            "Last updated: {}",
            report
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
        )
    }
}

impl View for PanelView {
    fn render(&self, state: &UiState, ctx: &RenderContext, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Crypto Sentiment Analyzer")?;
        writeln!(out, "Analyze social media sentiment for cryptocurrencies")?;
        writeln!(out, "{}", RULE)?;

        let action = if state.loading { "Analyzing..." } else { "Analyze" };
        let symbol = if state.symbol.is_empty() {
            "e.g., BTC"
        } else {
            state.symbol.as_str()
        };
        writeln!(out, "Symbol: {:<10} [{}]", symbol, action)?;
        writeln!(out)?;

        if let Some(message) = &state.validation {
            writeln!(out, "Error")?;
            writeln!(out, "{}", message)?;
            writeln!(out)?;
        } else if let Some(message) = &state.error {
            writeln!(out, "Error")?;
            writeln!(out, "{}", message)?;
            writeln!(out)?;
        }

        if let Some(report) = &state.last_report {
            Self::write_report(out, report, ctx)?;
        }

        Ok(())
    }
}
