use parking_lot::Mutex;
use std::sync::Arc;

use crate::database::{InsertTradeCall, PersistenceError, TradeSession, TradeStore};
use crate::models::Trade;

/// Counters describing how a store has been used
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub sessions_opened: usize,
    pub sessions_closed: usize,
    pub procedure_calls: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub failed_rollbacks: usize,
}

#[derive(Debug, Default)]
struct StoreState {
    committed: Vec<Trade>,
    stats: StoreStats,
    fail_on_call: Option<usize>,
    fail_on_commit: bool,
    fail_on_rollback: bool,
    unreachable: bool,
}

/// Transactional in-memory trade store
///
/// Inserted trades stay private to their session until commit. Failures can
/// be injected on the N-th `insert_trade` call of a session, on commit, on
/// rollback, or on connect. A failed commit closes the transaction and
/// discards its trades, as PostgreSQL does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions fail on the `call`-th insert (1-based)
    pub fn failing_on_call(call: usize) -> Self {
        let store = Self::new();
        store.fail_on_call(call);
        store
    }

    /// Store whose sessions fail to commit
    pub fn failing_on_commit() -> Self {
        let store = Self::new();
        store.state.lock().fail_on_commit = true;
        store
    }

    /// Make later rollbacks fail, leaving pending trades uncommitted
    pub fn fail_on_rollback(&self) {
        self.state.lock().fail_on_rollback = true;
    }

    /// Store that cannot hand out sessions
    pub fn unreachable() -> Self {
        let store = Self::new();
        store.state.lock().unreachable = true;
        store
    }

    /// Make later sessions fail on the `call`-th insert (1-based)
    pub fn fail_on_call(&self, call: usize) {
        self.state.lock().fail_on_call = Some(call);
    }

    /// Trades visible after commit, in insertion order
    pub fn committed_trades(&self) -> Vec<Trade> {
        self.state.lock().committed.clone()
    }

    pub fn stats(&self) -> StoreStats {
        self.state.lock().stats.clone()
    }
}

impl TradeStore for InMemoryTradeStore {
    fn open_session(&self) -> Result<Box<dyn TradeSession>, PersistenceError> {
        let mut state = self.state.lock();
        if state.unreachable {
            return Err(PersistenceError::ConnectionFailed(
                "in-memory store unreachable".to_string(),
            ));
        }
        state.stats.sessions_opened += 1;

        Ok(Box::new(InMemoryTradeSession {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
            in_transaction: false,
            calls: 0,
        }))
    }
}

struct InMemoryTradeSession {
    state: Arc<Mutex<StoreState>>,
    pending: Vec<Trade>,
    in_transaction: bool,
    calls: usize,
}

impl InMemoryTradeSession {
    fn require_transaction(&self) -> Result<(), PersistenceError> {
        if !self.in_transaction {
            return Err(PersistenceError::TransactionError(
                "no transaction in progress".to_string(),
            ));
        }
        Ok(())
    }
}

impl TradeSession for InMemoryTradeSession {
    fn begin(&mut self) -> Result<(), PersistenceError> {
        if self.in_transaction {
            return Err(PersistenceError::TransactionError(
                "transaction already in progress".to_string(),
            ));
        }
        self.in_transaction = true;
        Ok(())
    }

    fn insert_trade(&mut self, call: &InsertTradeCall<'_>) -> Result<(), PersistenceError> {
        self.require_transaction()?;
        self.calls += 1;

        let mut state = self.state.lock();
        state.stats.procedure_calls += 1;

        if state.fail_on_call == Some(self.calls) {
            return Err(PersistenceError::ProcedureFailed {
                procedure: InsertTradeCall::PROCEDURE.to_string(),
                message: format!("injected failure on call {}", self.calls),
            });
        }

        self.pending.push(Trade::new(
            call.source_currency,
            call.destination_currency,
            call.lots,
            call.price,
        ));
        Ok(())
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        self.require_transaction()?;

        let mut state = self.state.lock();
        if state.fail_on_commit {
            self.pending.clear();
            self.in_transaction = false;
            return Err(PersistenceError::TransactionError(
                "injected commit failure".to_string(),
            ));
        }

        state.committed.append(&mut self.pending);
        state.stats.commits += 1;
        self.in_transaction = false;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), PersistenceError> {
        self.require_transaction()?;

        let mut state = self.state.lock();
        if state.fail_on_rollback {
            state.stats.failed_rollbacks += 1;
            return Err(PersistenceError::TransactionError(
                "injected rollback failure".to_string(),
            ));
        }

        self.pending.clear();
        state.stats.rollbacks += 1;
        self.in_transaction = false;
        Ok(())
    }

    fn in_transaction(&mut self) -> bool {
        self.in_transaction
    }
}

impl Drop for InMemoryTradeSession {
    fn drop(&mut self) {
        // Uncommitted work is discarded with the session
        self.state.lock().stats.sessions_closed += 1;
    }
}
