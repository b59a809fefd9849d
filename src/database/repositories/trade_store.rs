use crate::database::connection::PersistenceError;
use crate::database::procedures::InsertTradeCall;

/// One open connection with at most one transaction in flight
///
/// The session is closed when dropped. Dropping a session with an open
/// transaction must not commit it.
pub trait TradeSession {
    /// Start the batch transaction
    fn begin(&mut self) -> Result<(), PersistenceError>;

    /// Invoke `insert_trade` inside the current transaction
    fn insert_trade(&mut self, call: &InsertTradeCall<'_>) -> Result<(), PersistenceError>;

    /// Commit the transaction
    ///
    /// A failed commit may leave the transaction closed (the driver already
    /// rolled it back); check `in_transaction` before rolling back again.
    fn commit(&mut self) -> Result<(), PersistenceError>;

    fn rollback(&mut self) -> Result<(), PersistenceError>;

    /// Whether a transaction is currently open on this session
    fn in_transaction(&mut self) -> bool;
}

/// Source of trade sessions - defines the store driver contract
pub trait TradeStore: Send + Sync {
    /// Open a fresh session; sessions are never shared between batches
    fn open_session(&self) -> Result<Box<dyn TradeSession>, PersistenceError>;
}
