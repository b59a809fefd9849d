//! Error types for trade line parsing
//!
//! Every variant carries the 1-based line number and the offending value so
//! the display text can be logged as-is when a line is skipped.

use thiserror::Error;

/// Reasons a split input line is rejected
///
/// These errors are recoverable: the processor logs them as warnings and
/// moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineFormatError {
    /// The line did not split into exactly three fields
    #[error("Line {line} malformed. Only {count} field(s) found.")]
    WrongFieldCount { line: usize, count: usize },

    /// The currency pair is not exactly six characters
    #[error("Trade currencies on line {line} malformed: '{value}'")]
    MalformedCurrencyPair { line: usize, value: String },

    /// The amount is not a base-10 integer
    #[error("Trade amount on line {line} not a valid integer: '{value}'")]
    InvalidAmount { line: usize, value: String },

    /// The price is not a decimal number
    #[error("Trade price on line {line} not a valid decimal: '{value}'")]
    InvalidPrice { line: usize, value: String },
}

/// Failures when extracting a trade from fields that skipped validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Missing field at index {0}")]
    MissingField(usize),

    #[error("Amount is not an integer: '{0}'")]
    InvalidAmount(String),

    #[error("Price is not a decimal: '{0}'")]
    InvalidPrice(String),
}

impl LineFormatError {
    /// Line number the error was reported for
    pub fn line(&self) -> usize {
        match self {
            LineFormatError::WrongFieldCount { line, .. }
            | LineFormatError::MalformedCurrencyPair { line, .. }
            | LineFormatError::InvalidAmount { line, .. }
            | LineFormatError::InvalidPrice { line, .. } => *line,
        }
    }

    /// Returns true if the line shape itself was wrong (field count)
    pub fn is_structural(&self) -> bool {
        matches!(self, LineFormatError::WrongFieldCount { .. })
    }

    /// Returns true if one of the numeric fields failed to parse
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            LineFormatError::InvalidAmount { .. } | LineFormatError::InvalidPrice { .. }
        )
    }
}
