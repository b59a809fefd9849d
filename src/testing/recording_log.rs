use parking_lot::Mutex;

use crate::logging::TradeLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Warn,
    Info,
}

/// `TradeLog` that keeps every message in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(LogLevel::Info)
    }

    fn messages(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl TradeLog for RecordingLog {
    fn warn(&self, message: &str) {
        self.entries.lock().push((LogLevel::Warn, message.to_string()));
    }

    fn info(&self, message: &str) {
        self.entries.lock().push((LogLevel::Info, message.to_string()));
    }
}
