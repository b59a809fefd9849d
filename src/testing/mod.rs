//! In-memory doubles for the pipeline's collaborators

pub mod memory_store;
pub mod recording_log;

pub use memory_store::{InMemoryTradeStore, StoreStats};
pub use recording_log::{LogLevel, RecordingLog};
