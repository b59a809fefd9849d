use serde::{Deserialize, Serialize};

/// A currency trade parsed from one input line
///
/// Lots are the raw integer amount scaled by the lot size, so an amount of
/// `1000000` becomes `10.0` lots. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    source_currency: String,
    destination_currency: String,
    lots: f64,
    price: f64,
}

impl Trade {
    /// Create a new trade
    pub fn new(
        source_currency: impl Into<String>,
        destination_currency: impl Into<String>,
        lots: f64,
        price: f64,
    ) -> Self {
        Self {
            source_currency: source_currency.into(),
            destination_currency: destination_currency.into(),
            lots,
            price,
        }
    }

    /// Currency being sold (first three characters of the pair)
    pub fn source_currency(&self) -> &str {
        &self.source_currency
    }

    /// Currency being bought (remaining characters of the pair)
    pub fn destination_currency(&self) -> &str {
        &self.destination_currency
    }

    pub fn lots(&self) -> f64 {
        self.lots
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Currency pair as it appeared on the input line
    pub fn currency_pair(&self) -> String {
        format!("{}{}", self.source_currency, self.destination_currency)
    }
}
