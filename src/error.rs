//! Crate-level error types.

use std::fmt;

/// Errors produced by the evergreen crate.
///
/// Nothing in the per-frame path returns an error; these cover construction
/// inputs and option presets only.
#[derive(Debug)]
pub enum EvergreenError {
    /// A particle count below zero was supplied.
    NegativeCount(i64),
    /// Layout or motion parameters are outside their valid range.
    InvalidOptions(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for EvergreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCount(n) => {
                write!(f, "particle count must not be negative (got {n})")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for EvergreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EvergreenError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
