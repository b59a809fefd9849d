use crate::database::connection::{establish_connection, PersistenceError};
use crate::database::procedures::InsertTradeCall;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{Double, Varchar};
use std::sync::Arc;

use super::trade_store::{TradeSession, TradeStore};

/// Connection provider used by `PgTradeStore`
type ConnectionProvider = dyn Fn() -> Result<PgConnection, PersistenceError> + Send + Sync;

/// PostgreSQL-backed trade store
pub struct PgTradeStore {
    get_conn: Arc<ConnectionProvider>,
}

impl PgTradeStore {
    /// Create new trade store with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<PgConnection, PersistenceError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }

    /// Create a store that opens a new connection to `database_url` per session
    pub fn from_url(database_url: impl Into<String>) -> Self {
        let database_url = database_url.into();
        Self::new(move || establish_connection(&database_url))
    }
}

impl TradeStore for PgTradeStore {
    fn open_session(&self) -> Result<Box<dyn TradeSession>, PersistenceError> {
        let conn = (self.get_conn)()?;
        Ok(Box::new(PgTradeSession { conn }))
    }
}

/// Single PostgreSQL connection running one batch transaction
///
/// If dropped mid-transaction the connection is closed and the server
/// discards the uncommitted work.
pub struct PgTradeSession {
    conn: PgConnection,
}

impl TradeSession for PgTradeSession {
    fn begin(&mut self) -> Result<(), PersistenceError> {
        AnsiTransactionManager::begin_transaction(&mut self.conn)
            .map_err(|e| PersistenceError::TransactionError(format!("begin: {}", e)))
    }

    fn insert_trade(&mut self, call: &InsertTradeCall<'_>) -> Result<(), PersistenceError> {
        diesel::sql_query(InsertTradeCall::SQL)
            .bind::<Varchar, _>(call.source_currency)
            .bind::<Varchar, _>(call.destination_currency)
            .bind::<Double, _>(call.lots)
            .bind::<Double, _>(call.price)
            .execute(&mut self.conn)
            .map_err(|e| PersistenceError::ProcedureFailed {
                procedure: InsertTradeCall::PROCEDURE.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        AnsiTransactionManager::commit_transaction(&mut self.conn)
            .map_err(|e| PersistenceError::TransactionError(format!("commit: {}", e)))?;

        tracing::debug!("Trade batch transaction committed");
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), PersistenceError> {
        AnsiTransactionManager::rollback_transaction(&mut self.conn)
            .map_err(|e| PersistenceError::TransactionError(format!("rollback: {}", e)))?;

        tracing::debug!("Trade batch transaction rolled back");
        Ok(())
    }

    fn in_transaction(&mut self) -> bool {
        // A broken connection reports an error here; nothing is left to roll back
        matches!(
            AnsiTransactionManager::transaction_manager_status_mut(&mut self.conn)
                .transaction_depth(),
            Ok(Some(_))
        )
    }
}
