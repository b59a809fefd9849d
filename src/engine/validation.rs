//! Trade line validation
//!
//! A line is split on `,` and checked field by field. Checks run in a fixed
//! order and stop at the first failure, so a line with several defects always
//! reports the earliest one (field count before currency pair, and so on).

use crate::logging::TradeLog;

use super::errors::LineFormatError;

/// Number of fields in a well-formed trade line
pub const FIELD_COUNT: usize = 3;

/// Length of a currency pair such as `EURUSD`
pub const CURRENCY_PAIR_LENGTH: usize = 6;

// ============================================================================
// Field Parsers
// ============================================================================

/// Parse a base-10 integer amount (optional sign, surrounding whitespace allowed)
///
/// Integers of any length are accepted; the value is returned as `f64`, so
/// amounts beyond 2^53 are rounded to the nearest representable value.
pub(crate) fn parse_amount(value: &str) -> Option<f64> {
    let value = value.trim();
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Parse a decimal price (surrounding whitespace allowed)
pub(crate) fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

// ============================================================================
// Individual Validation Functions
// ============================================================================

fn validate_field_count(fields: &[&str], line: usize) -> Result<(), LineFormatError> {
    if fields.len() != FIELD_COUNT {
        return Err(LineFormatError::WrongFieldCount {
            line,
            count: fields.len(),
        });
    }
    Ok(())
}

/// Length only: any six characters are accepted as a pair
fn validate_currency_pair(value: &str, line: usize) -> Result<(), LineFormatError> {
    if value.chars().count() != CURRENCY_PAIR_LENGTH {
        return Err(LineFormatError::MalformedCurrencyPair {
            line,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn validate_amount(value: &str, line: usize) -> Result<(), LineFormatError> {
    match parse_amount(value) {
        Some(_) => Ok(()),
        None => Err(LineFormatError::InvalidAmount {
            line,
            value: value.to_string(),
        }),
    }
}

fn validate_price(value: &str, line: usize) -> Result<(), LineFormatError> {
    match parse_price(value) {
        Some(_) => Ok(()),
        None => Err(LineFormatError::InvalidPrice {
            line,
            value: value.to_string(),
        }),
    }
}

// ============================================================================
// Composite Validation
// ============================================================================

/// Validate a split trade line
///
/// # Validations Performed
/// 1. Exactly three fields
/// 2. Currency pair is six characters
/// 3. Amount parses as an integer
/// 4. Price parses as a decimal
///
/// # Returns
/// * `Ok(())` if every check passes
/// * `Err(LineFormatError)` for the first check that failed
pub fn validate_fields(fields: &[&str], line: usize) -> Result<(), LineFormatError> {
    validate_field_count(fields, line)?;
    validate_currency_pair(fields[0], line)?;
    validate_amount(fields[1], line)?;
    validate_price(fields[2], line)?;
    Ok(())
}

/// Validate a split trade line, logging a warning when it is rejected
///
/// Nothing is logged for a valid line.
pub fn is_valid(fields: &[&str], line: usize, log: &dyn TradeLog) -> bool {
    match validate_fields(fields, line) {
        Ok(()) => true,
        Err(e) => {
            log.warn(&e.to_string());
            false
        }
    }
}
