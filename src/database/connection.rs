use diesel::pg::PgConnection;
use diesel::Connection;
use thiserror::Error;

/// Errors raised while writing a batch to the store
///
/// Any of these aborts the batch: the transaction is rolled back and the
/// error is handed back to the caller.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Stored procedure {procedure} failed: {message}")]
    ProcedureFailed { procedure: String, message: String },

    #[error("Transaction error: {0}")]
    TransactionError(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

impl PersistenceError {
    /// Returns true if no session could be opened at all
    pub fn is_connection_error(&self) -> bool {
        matches!(self, PersistenceError::ConnectionFailed(_))
    }
}

/// Open a single PostgreSQL connection
///
/// Each batch gets its own connection; nothing is pooled or reused.
///
/// # Arguments
/// * `database_url` - PostgreSQL connection URL, passed through unchecked
pub fn establish_connection(database_url: &str) -> Result<PgConnection, PersistenceError> {
    tracing::debug!("Opening PostgreSQL connection");

    PgConnection::establish(database_url)
        .map_err(|e| PersistenceError::ConnectionFailed(e.to_string()))
}
