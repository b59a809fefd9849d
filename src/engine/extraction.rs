//! Conversion of validated trade lines into `Trade` values

use crate::models::Trade;

use super::errors::ExtractionError;
use super::validation::{parse_amount, parse_price};

/// Units per lot: an amount of 100000 is one lot
pub const LOT_SIZE: f64 = 100_000.0;

/// Length of a single currency code inside a pair
const CURRENCY_CODE_LENGTH: usize = 3;

/// Build a trade from a line that already passed `validate_fields`
///
/// The fields are not re-validated. Input that would not have passed
/// validation fails with the first parse error hit, never with a silently
/// wrong trade.
pub fn extract_trade(fields: &[&str]) -> Result<Trade, ExtractionError> {
    let pair = field(fields, 0)?;
    let amount = field(fields, 1)?;
    let price = field(fields, 2)?;

    let amount =
        parse_amount(amount).ok_or_else(|| ExtractionError::InvalidAmount(amount.to_string()))?;
    let price =
        parse_price(price).ok_or_else(|| ExtractionError::InvalidPrice(price.to_string()))?;

    let (source, destination) = split_currency_pair(pair);

    Ok(Trade::new(source, destination, amount / LOT_SIZE, price))
}

fn field<'a>(fields: &[&'a str], index: usize) -> Result<&'a str, ExtractionError> {
    fields
        .get(index)
        .copied()
        .ok_or(ExtractionError::MissingField(index))
}

/// Split `EURUSD` into `("EUR", "USD")` on a character boundary
fn split_currency_pair(pair: &str) -> (&str, &str) {
    let boundary = pair
        .char_indices()
        .nth(CURRENCY_CODE_LENGTH)
        .map(|(index, _)| index)
        .unwrap_or(pair.len());

    pair.split_at(boundary)
}
