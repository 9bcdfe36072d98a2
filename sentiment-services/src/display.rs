//! Sentiment Display
//!
//! Pure formatting of sentiment scores: percentages, qualitative labels and
//! source-count captions. Nothing here touches state or performs I/O.

use sentiment_core::DataSource;
use std::fmt;

/// Half-width of the neutral band used by [`LabelRule::default`]
pub const DEFAULT_DEAD_ZONE: f64 = 0.1;

/// Qualitative reading of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "Bullish",
            SentimentLabel::Bearish => "Bearish",
            SentimentLabel::Neutral => "Neutral",
        }
    }

    /// Trend marker shown next to the label in the plain view
    pub fn icon(&self) -> &'static str {
        match self {
            SentimentLabel::Bullish => "📈",
            SentimentLabel::Bearish => "📉",
            SentimentLabel::Neutral => "↔️",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Threshold rule mapping a score to a [`SentimentLabel`]
///
/// A single rule is chosen per session and shared by every view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelRule {
    /// `> 0` Bullish, `< 0` Bearish, exactly zero Neutral
    Zero,
    /// `> t` Bullish, `< -t` Bearish, Neutral inside `[-t, t]`
    DeadZone(f64),
}

impl Default for LabelRule {
    fn default() -> Self {
        LabelRule::DeadZone(DEFAULT_DEAD_ZONE)
    }
}

impl LabelRule {
    pub fn classify(&self, score: f64) -> SentimentLabel {
        let threshold = match self {
            LabelRule::Zero => 0.0,
            LabelRule::DeadZone(t) => t.abs(),
        };

        if score > threshold {
            SentimentLabel::Bullish
        } else if score < -threshold {
            SentimentLabel::Bearish
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for LabelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelRule::Zero => f.write_str("zero"),
            LabelRule::DeadZone(t) => write!(f, "dead-zone({})", t),
        }
    }
}

impl std::str::FromStr for LabelRule {
    type Err = String;

    /// Accepts `zero`, `dead-zone` (default band) or `dead-zone:<t>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "zero" | "strict" => return Ok(LabelRule::Zero),
            "dead-zone" | "deadzone" | "dead_zone" => return Ok(LabelRule::default()),
            _ => {}
        }

        let band = lower
            .strip_prefix("dead-zone:")
            .or_else(|| lower.strip_prefix("deadzone:"))
            .ok_or_else(|| format!("Unknown label rule: {}", s))?;

        match band.parse::<f64>() {
            Ok(t) if (0.0..1.0).contains(&t) => Ok(LabelRule::DeadZone(t)),
            _ => Err(format!("Dead-zone threshold must be in [0, 1): {}", band)),
        }
    }
}

/// Score as a percentage with one decimal place, e.g. `0.25` -> `25.0%`
pub fn format_percentage(score: f64) -> String {
    let pct = score * 100.0;
    // Avoid printing "-0.0%" for an exact negative zero
    let pct = if pct == 0.0 { 0.0 } else { pct };
    format!("{:.1}%", pct)
}

/// `Based on N posts` / `Based on N tweets`
pub fn count_caption(count: u64, unit: &str) -> String {
    format!("Based on {} {}", count, unit)
}

/// Everything needed to draw one score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDisplay {
    pub percentage: String,
    pub label: SentimentLabel,
    pub caption: Option<String>,
}

impl ScoreDisplay {
    /// Score without a count caption
    pub fn new(score: f64, rule: LabelRule) -> Self {
        Self {
            percentage: format_percentage(score),
            label: rule.classify(score),
            caption: None,
        }
    }

    /// Score backed by a single source's items
    pub fn for_source(score: f64, count: u64, source: DataSource, rule: LabelRule) -> Self {
        Self {
            caption: Some(count_caption(count, source.unit())),
            ..Self::new(score, rule)
        }
    }

    /// Score backed by items from several sources (counted as posts)
    pub fn with_count(score: f64, count: u64, rule: LabelRule) -> Self {
        Self {
            caption: Some(count_caption(count, DataSource::Reddit.unit())),
            ..Self::new(score, rule)
        }
    }
}
