/// Database module for trade persistence
///
/// This module provides:
/// - Single-connection sessions against PostgreSQL (no pooling)
/// - Typed stored procedure calls
/// - The `TradeStore` / `TradeSession` contracts and their Diesel implementation
/// - The transactional batch persister

pub mod connection;
pub mod procedures;
pub mod repositories;
pub mod trade_persister;

pub use connection::{establish_connection, PersistenceError};
pub use procedures::InsertTradeCall;
pub use repositories::{PgTradeStore, TradeSession, TradeStore};
pub use trade_persister::TradePersister;
