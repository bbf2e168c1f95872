//! Out-of-band error reporting.

/// Best-effort sink for unexpected verification faults.
///
/// Reporting is fire-and-forget: implementations must swallow their own
/// failures, and nothing they do changes the verification outcome.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: &str, error: &str);
}

/// Reports faults as structured `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, context: &str, error: &str) {
        tracing::error!(context = context, error = error, "Bot verification fault");
    }
}
