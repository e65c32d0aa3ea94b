//! Process signal handling for coordinated shutdown
//!
//! Translates SIGTERM/SIGINT into the caller's hard cancellation scope. The
//! engine's own soft shutdown is driven by [`crate::StatusEngine::close`];
//! this module only covers the process-level signal.

/// Wait for SIGTERM or SIGINT.
///
/// Blocks until a termination signal is received and returns its name.
///
/// # Panics
/// Panics if signal handlers cannot be registered (OS resource exhaustion).
#[cfg(unix)]
pub async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    // Registration only fails when the OS is out of resources; there is
    // nothing useful to do but bail.
    let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    }
}

/// Wait for Ctrl+C (non-unix platforms).
///
/// # Panics
/// Panics if the Ctrl+C handler cannot be registered.
#[cfg(not(unix))]
pub async fn wait_for_signal() -> &'static str {
    tokio::signal::ctrl_c().await.expect("register Ctrl+C handler");
    "CTRL_C"
}
