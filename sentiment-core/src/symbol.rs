//! Cryptocurrency symbol normalization

use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;

/// A validated, upper-cased ticker such as `BTC`
///
/// Can only be built through [`Symbol::parse`], so a `Symbol` is never empty
/// and never carries surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Canonicalize raw user input as it is typed
    pub fn normalize(raw: &str) -> String {
        raw.to_uppercase()
    }

    /// Trim, upper-case and reject empty input
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Symbol(Self::normalize(trimmed)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Symbol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::parse(s)
    }
}
