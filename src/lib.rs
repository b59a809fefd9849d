// Library Crate Root
// lib.rs

// The binary in main.rs goes through this public API like any other caller
pub mod config;
pub mod database;
pub mod engine;
pub mod logging;
pub mod models;
pub mod processor;
pub mod testing;

// pub use = re-export at crate root
pub use config::{ConfigError, ProcessorConfig};
pub use database::{PersistenceError, PgTradeStore, TradePersister, TradeStore};
pub use engine::{extract_trade, is_valid, validate_fields, LineFormatError, LOT_SIZE};
pub use logging::{TracingLog, TradeLog};
pub use models::Trade;
pub use processor::{ProcessingSummary, ProcessorError, TradeProcessor};
