//! Transition notification sink for metrics and alerting
//!
//! The status engine reports debounced state transitions here. Notifications
//! flow one way only: nothing a monitor does feeds back into the engine.

use crate::probe::ProbeError;

/// Observer for debounced state transitions.
///
/// Callbacks are fire-and-forget and run on the polling task, so an
/// implementation that blocks stalls the next health check. Default method
/// bodies are no-ops; implementations override only what they watch.
pub trait Monitor: Send + Sync {
    /// The resource passed a health check after starting, failing, or recovering.
    fn healthy(&self) {}

    /// The resource failed a health check. Carries the error from the first
    /// failing check in the current run of failures.
    fn failing(&self, _error: &ProbeError) {}

    /// The engine is shutting down. Reported exactly once, never debounced.
    fn stopping(&self) {}
}

/// Default sink that ignores every notification.
pub struct NoopMonitor;

impl Monitor for NoopMonitor {}
