//! Error-tracking sink.

use crate::error::AppError;

/// Sink for failures that are absorbed instead of propagated
pub trait ErrorTracker: Send + Sync {
    fn capture(&self, error: &AppError);
}

/// Reports captured errors as `tracing` events on the `courier_rs::error_tracking` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorTracker;

impl ErrorTracker for TracingErrorTracker {
    fn capture(&self, error: &AppError) {
        tracing::error!(
            target: "courier_rs::error_tracking",
            error = %error,
            source = ?std::error::Error::source(error).map(|s| s.to_string()),
            "Captured exception"
        );
    }
}
