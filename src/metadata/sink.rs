//! Diagnostic reporting for metadata generation.
//!
//! The generator never logs validation failures straight to a global logger.
//! It reports them through a [`DiagnosticSink`] handed to it by the caller, so
//! tests can record what was reported and the CLI can decide what a fatal
//! report does to the process.

use tracing::error;

use crate::constants::LOG_TARGET;

/// Receiver for validation problems found while building a manifest.
///
/// - `error` is recoverable: generation continues with a best-effort result.
/// - `fatal` is terminal: the generator stops and returns an error right after
///   reporting. Implementations must not exit the process themselves.
pub trait DiagnosticSink {
    /// Report a recoverable error.
    fn error(&self, message: &str);

    /// Report an error that ends the run.
    fn fatal(&self, message: &str);
}

/// Sink that forwards both severities to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, message: &str) {
        error!(target: LOG_TARGET, "{message}");
    }

    fn fatal(&self, message: &str) {
        error!(target: LOG_TARGET, fatal = true, "{message}");
    }
}
