/// Store abstractions the batch persister writes through
///
/// - `TradeStore` hands out one session per batch
/// - `TradeSession` is a single transactional connection; dropping it
///   releases the connection
/// - `PgTradeStore` is the PostgreSQL implementation built on Diesel

pub mod pg_trade_store;
pub mod trade_store;

pub use pg_trade_store::{PgTradeSession, PgTradeStore};
pub use trade_store::{TradeSession, TradeStore};
