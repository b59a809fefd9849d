//! Typed stored procedure calls
//!
//! Procedure names and parameter lists are fixed here; values are always
//! bound as parameters, never formatted into the SQL text.

use crate::models::Trade;

/// `insert_trade(source, destination, lots, price)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertTradeCall<'a> {
    pub source_currency: &'a str,
    pub destination_currency: &'a str,
    pub lots: f64,
    pub price: f64,
}

impl<'a> InsertTradeCall<'a> {
    pub const PROCEDURE: &'static str = "insert_trade";

    /// PostgreSQL statement with positional placeholders
    pub const SQL: &'static str = "CALL insert_trade($1, $2, $3, $4)";

    /// Bind a trade's fields, in order and unchanged
    pub fn from_trade(trade: &'a Trade) -> Self {
        Self {
            source_currency: trade.source_currency(),
            destination_currency: trade.destination_currency(),
            lots: trade.lots(),
            price: trade.price(),
        }
    }
}

impl<'a> From<&'a Trade> for InsertTradeCall<'a> {
    fn from(trade: &'a Trade) -> Self {
        Self::from_trade(trade)
    }
}
