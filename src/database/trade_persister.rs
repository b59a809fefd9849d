use crate::database::connection::PersistenceError;
use crate::database::procedures::InsertTradeCall;
use crate::database::repositories::{TradeSession, TradeStore};
use crate::models::Trade;
use std::sync::Arc;

/// Writes a batch of trades in a single all-or-nothing transaction
///
/// Session lifecycle per call:
/// `open → begin → insert_trade* → commit | rollback → close (drop)`
///
/// Nothing from a failed batch is left in the store, and the error that
/// caused the failure is the one returned.
pub struct TradePersister {
    store: Arc<dyn TradeStore>,
}

impl TradePersister {
    pub fn new(store: Arc<dyn TradeStore>) -> Self {
        Self { store }
    }

    /// Persist trades in input order
    ///
    /// An empty batch still opens a session and commits an empty
    /// transaction.
    ///
    /// # Returns
    /// * `Ok(count)` - number of trades inserted
    /// * `Err(PersistenceError)` - the batch was rolled back
    pub fn persist(&self, trades: &[Trade]) -> Result<usize, PersistenceError> {
        let mut session = self.store.open_session()?;
        session.begin()?;

        for (index, trade) in trades.iter().enumerate() {
            if let Err(e) = session.insert_trade(&InsertTradeCall::from(trade)) {
                tracing::debug!(
                    "insert_trade failed for trade {} of {}, rolling back",
                    index + 1,
                    trades.len()
                );
                Self::rollback(session.as_mut());
                return Err(e);
            }
        }

        if let Err(e) = session.commit() {
            Self::rollback(session.as_mut());
            return Err(e);
        }

        tracing::debug!("Persisted {} trades", trades.len());
        Ok(trades.len())
    }

    /// Roll back after a failure, keeping the original error as the result
    ///
    /// Skipped when the failure already closed the transaction.
    fn rollback(session: &mut dyn TradeSession) {
        if !session.in_transaction() {
            tracing::debug!("Trade batch transaction already closed, nothing to roll back");
            return;
        }
        if let Err(e) = session.rollback() {
            tracing::error!("Failed to roll back trade batch: {}", e);
        }
    }
}
