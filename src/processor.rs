//! Validate-parse-persist pipeline
//!
//! Lines are trimmed and empty lines dropped before numbering. Each remaining
//! line is validated; rejected lines are logged and skipped, accepted lines
//! become trades. Only after the whole input has been read is the batch
//! persisted, in one transaction.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::config::ProcessorConfig;
use crate::database::{PersistenceError, PgTradeStore, TradePersister, TradeStore};
use crate::engine::{extract_trade, is_valid};
use crate::logging::TradeLog;
use crate::models::Trade;

/// Field separator on trade lines
const FIELD_SEPARATOR: char = ',';

/// Errors that abort a processing run
///
/// Malformed lines never show up here; they are logged and skipped.
#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Failed to read trade input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to persist trades: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    /// Non-empty lines seen
    pub lines_read: usize,

    /// Trades that passed validation and were persisted
    pub trades_processed: usize,

    /// Lines skipped with a warning
    pub lines_rejected: usize,
}

/// Runs the trade pipeline against an injected store and log
pub struct TradeProcessor {
    persister: TradePersister,
    log: Arc<dyn TradeLog>,
}

impl TradeProcessor {
    pub fn new(store: Arc<dyn TradeStore>, log: Arc<dyn TradeLog>) -> Self {
        Self {
            persister: TradePersister::new(store),
            log,
        }
    }

    /// Processor writing to the PostgreSQL database named in `config`
    pub fn from_config(config: &ProcessorConfig, log: Arc<dyn TradeLog>) -> Self {
        Self::new(Arc::new(PgTradeStore::from_url(config.database_url.clone())), log)
    }

    /// Read every line from `path` and process them
    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ProcessingSummary, ProcessorError> {
        let file = File::open(path.as_ref())?;
        self.process_reader(BufReader::new(file))
    }

    /// Read every line from `reader` and process them
    ///
    /// The input is read to the end before anything is persisted, so a read
    /// failure leaves the store untouched.
    pub fn process_reader<R: BufRead>(
        &self,
        reader: R,
    ) -> Result<ProcessingSummary, ProcessorError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        self.process_lines(lines)
    }

    /// Validate, extract and persist a sequence of raw lines
    ///
    /// On success exactly one `<N> trades processed` line is logged. On a
    /// persistence failure nothing is committed and no summary is logged.
    pub fn process_lines<I, S>(&self, lines: I) -> Result<ProcessingSummary, ProcessorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (trades, mut summary) = self.collect_trades(lines);

        summary.trades_processed = self.persister.persist(&trades)?;
        self.log
            .info(&format!("{} trades processed", summary.trades_processed));

        Ok(summary)
    }

    fn collect_trades<I, S>(&self, lines: I) -> (Vec<Trade>, ProcessingSummary)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trades = Vec::new();
        let mut summary = ProcessingSummary::default();

        let raw_lines = lines.into_iter();
        let non_empty = raw_lines.filter_map(|line| {
            let trimmed = line.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });

        for (index, line) in non_empty.enumerate() {
            let line_number = index + 1;
            summary.lines_read += 1;

            let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
            if !is_valid(&fields, line_number, self.log.as_ref()) {
                summary.lines_rejected += 1;
                continue;
            }

            match extract_trade(&fields) {
                Ok(trade) => trades.push(trade),
                Err(e) => {
                    self.log.warn(&format!(
                        "Trade on line {} could not be extracted: {}",
                        line_number, e
                    ));
                    summary.lines_rejected += 1;
                }
            }
        }

        (trades, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryTradeStore, LogLevel, RecordingLog};
    use std::io::{Cursor, Write};

    fn processor(store: &Arc<InMemoryTradeStore>, log: &Arc<RecordingLog>) -> TradeProcessor {
        TradeProcessor::new(store.clone(), log.clone())
    }

    #[test]
    fn test_mixed_batch() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let summary = processor(&store, &log)
            .process_lines(["EURUSD,1000000,1.2345", "bad,line", "GBPJPY,500000,150.25"])
            .unwrap();

        assert_eq!(
            summary,
            ProcessingSummary {
                lines_read: 3,
                trades_processed: 2,
                lines_rejected: 1,
            }
        );
        assert_eq!(
            store.committed_trades(),
            vec![
                Trade::new("EUR", "USD", 10.0, 1.2345),
                Trade::new("GBP", "JPY", 5.0, 150.25),
            ]
        );
        assert_eq!(
            log.entries(),
            vec![
                (LogLevel::Warn, "Line 2 malformed. Only 2 field(s) found.".to_string()),
                (LogLevel::Info, "2 trades processed".to_string()),
            ]
        );
    }

    #[test]
    fn test_amount_wider_than_i64_is_processed() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let summary = processor(&store, &log)
            .process_lines(["EURUSD,10000000000000000000,1.2345"])
            .unwrap();

        assert_eq!(summary.trades_processed, 1);
        assert_eq!(summary.lines_rejected, 0);
        assert!(log.warnings().is_empty());
        assert_eq!(store.committed_trades(), vec![Trade::new("EUR", "USD", 1.0e14, 1.2345)]);
    }

    #[test]
    fn test_empty_lines_are_not_numbered() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let summary = processor(&store, &log)
            .process_lines(["", "  EURUSD,1000000,1.2345  ", "   ", "\t", "EURUS,1,1.0"])
            .unwrap();

        assert_eq!(summary.lines_read, 2);
        assert_eq!(summary.trades_processed, 1);
        assert_eq!(
            log.warnings(),
            vec!["Trade currencies on line 2 malformed: 'EURUS'"]
        );
    }

    #[test]
    fn test_counts_add_up() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let lines = [
            "EURUSD,1000000,1.2345",
            "EURUSD,12.5,1.2345",
            "AUDCAD,300000,0.91",
            "EURUSD,100,abc",
            "x",
            "USDCHF,-100000,0.88",
        ];
        let summary = processor(&store, &log).process_lines(lines).unwrap();

        assert_eq!(summary.trades_processed + summary.lines_rejected, lines.len());
        assert_eq!(summary.trades_processed, 3);
        assert_eq!(log.warnings().len(), 3);
        assert_eq!(log.infos(), vec!["3 trades processed"]);
    }

    #[test]
    fn test_all_invalid_commits_empty_batch() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let summary = processor(&store, &log)
            .process_lines(["bad", "worse,line"])
            .unwrap();

        assert_eq!(summary.trades_processed, 0);
        assert_eq!(store.stats().commits, 1);
        assert_eq!(log.infos(), vec!["0 trades processed"]);
    }

    #[test]
    fn test_persistence_failure_aborts_run() {
        let store = Arc::new(InMemoryTradeStore::failing_on_call(2));
        let log = Arc::new(RecordingLog::new());

        let result = processor(&store, &log).process_lines([
            "EURUSD,1000000,1.2345",
            "GBPJPY,500000,150.25",
            "AUDCAD,300000,0.91",
        ]);

        assert!(matches!(result, Err(ProcessorError::Persistence(_))));
        assert!(store.committed_trades().is_empty());
        assert_eq!(store.stats().rollbacks, 1);
        assert!(log.infos().is_empty());
    }

    #[test]
    fn test_process_reader() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let input = Cursor::new("EURUSD,1000000,1.2345\n\nGBPJPY,500000,150.25\r\n");
        let summary = processor(&store, &log).process_reader(input).unwrap();

        assert_eq!(summary.trades_processed, 2);
        assert_eq!(store.committed_trades()[1], Trade::new("GBP", "JPY", 5.0, 150.25));
    }

    #[test]
    fn test_process_file() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "EURUSD,1000000,1.2345").unwrap();
        writeln!(file, "bad,line").unwrap();
        file.flush().unwrap();

        let summary = processor(&store, &log).process_file(file.path()).unwrap();

        assert_eq!(summary.trades_processed, 1);
        assert_eq!(summary.lines_rejected, 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = Arc::new(InMemoryTradeStore::new());
        let log = Arc::new(RecordingLog::new());

        let dir = tempfile::tempdir().unwrap();
        let result = processor(&store, &log).process_file(dir.path().join("missing.csv"));

        assert!(matches!(result, Err(ProcessorError::Io(_))));
        assert_eq!(store.stats().sessions_opened, 0);
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let summary = ProcessingSummary {
            lines_read: 3,
            trades_processed: 2,
            lines_rejected: 1,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, r#"{"lines_read":3,"trades_processed":2,"lines_rejected":1}"#);
    }
}
