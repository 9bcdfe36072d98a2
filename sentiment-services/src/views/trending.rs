//! Trending list rendering

use chrono::Local;
use sentiment_core::TrendingReport;
use std::io::{self, Write};

use super::RenderContext;
use crate::display::ScoreDisplay;

/// Render the trending symbols, one row each
pub fn render_trending(
    report: &TrendingReport,
    ctx: &RenderContext,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "Trending")?;

    if report.trending.is_empty() {
        writeln!(out, "  No trending symbols right now.")?;
    }

    for entry in &report.trending {
        let display = ScoreDisplay::new(entry.score, ctx.label_rule);
        writeln!(
            out,
            "  {:<6} {:>7}  {:<8} ({} posts)",
            entry.symbol, display.percentage, display.label, entry.posts
        )?;
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
