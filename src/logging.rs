//! Logging capability handed to the trade pipeline
//!
//! The pipeline only ever emits warnings (skipped lines) and one info line
//! (the run summary), so it depends on this narrow trait rather than on a
//! global subscriber. `TracingLog` is the production implementation.

/// Sink for pipeline diagnostics
pub trait TradeLog: Send + Sync {
    fn warn(&self, message: &str);

    fn info(&self, message: &str);
}

/// Forwards pipeline diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl TradeLog for TracingLog {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }
}

/// Install the global `tracing` subscriber used by the binary
///
/// Honors `RUST_LOG`; defaults to info for this crate.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trade_processor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
