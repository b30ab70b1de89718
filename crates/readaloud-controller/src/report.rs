//! One-way error-reporting sink for engine failures

/// Collaborator that receives formatted engine errors. Any user-facing
/// surface behind it is outside this crate.
pub trait ErrorReporter: Send + Sync {
    fn log_error(&self, message: &str);
}

/// Reporter backed by the tracing error level.
#[derive(Debug, Default)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn log_error(&self, message: &str) {
        tracing::error!("{message}");
    }
}
