//! The status engine: state machine, polling loop, and HTTP serving
//!
//! One background task drives `Starting → Healthy ⇄ Failing → Stopping`.
//! HTTP handlers read the state with a single atomic load and answer from
//! content precomputed at construction, so the request path never waits on
//! the polling loop.

use crate::config::Config;
use crate::monitor::Monitor;
use crate::probe::{HealthProbe, ProbeError};
use crate::status::render::StateContent;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Discrete lifecycle states, stored in a single atomic cell.
///
/// Written only by the polling task; read lock-free by HTTP handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    Starting = 0,
    Healthy = 1,
    Failing = 2,
    Stopping = 3,
}

impl State {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Starting,
            1 => Self::Healthy,
            2 => Self::Failing,
            _ => Self::Stopping,
        }
    }
}

/// Polls a health probe in the background and serves the latest outcome.
///
/// Two cancellation scopes govern the lifecycle: the *hard* scope supplied by
/// the caller (process lifetime), and a *soft* scope derived from it that
/// [`close`](StatusEngine::close) cancels. Soft cancellation stops health
/// checks and runs the shutdown sequence; hard cancellation additionally cuts
/// an in-progress shutdown delay short.
pub struct StatusEngine {
    resource_name: String,
    state: AtomicU8,
    content: [StateContent; 4],
    hard: CancellationToken,
    soft: CancellationToken,
    probe: Arc<dyn HealthProbe>,
    monitor: Arc<dyn Monitor>,
    check_timeout: Duration,
    frequency: Duration,
    shutdown_delay: Duration,
}

impl StatusEngine {
    pub fn new(config: Config) -> Self {
        let soft = config.lifetime.child_token();

        let content = [
            StateContent::new(
                StatusCode::SERVICE_UNAVAILABLE,
                &config.display_name,
                &config.resource_name,
                &config.starting_label,
                &config.version,
            ),
            StateContent::new(
                StatusCode::OK,
                &config.display_name,
                &config.resource_name,
                &config.healthy_label,
                &config.version,
            ),
            StateContent::new(
                StatusCode::SERVICE_UNAVAILABLE,
                &config.display_name,
                &config.resource_name,
                &config.failing_label,
                &config.version,
            ),
            StateContent::new(
                StatusCode::SERVICE_UNAVAILABLE,
                &config.display_name,
                &config.resource_name,
                &config.stopping_label,
                &config.version,
            ),
        ];

        Self {
            resource_name: config.resource_name,
            state: AtomicU8::new(State::Starting as u8),
            content,
            hard: config.lifetime,
            soft,
            probe: config.probe,
            monitor: config.monitor,
            check_timeout: config.check_timeout,
            frequency: config.frequency,
            shutdown_delay: config.shutdown_delay,
        }
    }

    /// Current state as last published by the polling task.
    pub fn state(&self) -> State {
        State::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Drive the polling loop until the soft scope is cancelled.
    ///
    /// Each iteration runs one bounded health check, applies the outcome, and
    /// waits out the configured frequency. Call once per engine, on its own
    /// task. The stopping sequence runs exactly once on the way out.
    pub async fn listen(&self) {
        while !self.soft.is_cancelled() {
            if self.check_health().await.is_break() {
                break;
            }
        }

        self.stopping().await;
    }

    /// One bounded probe evaluation plus the inter-check wait.
    ///
    /// The soft scope is a distinct select arm, checked ahead of the probe's
    /// own outcome: a probe that swallows cancellation cannot stall the loop,
    /// its future is simply dropped.
    async fn check_health(&self) -> ControlFlow<()> {
        tokio::select! {
            biased;
            _ = self.soft.cancelled() => return ControlFlow::Break(()),
            outcome = timeout(self.check_timeout, self.probe.check()) => match outcome {
                Ok(Ok(())) => self.healthy(),
                Ok(Err(error)) => self.failing(ProbeError::Failed(error)),
                Err(_) => self.failing(ProbeError::Timeout(self.check_timeout)),
            },
        }

        self.await_next_check().await;
        ControlFlow::Continue(())
    }

    async fn await_next_check(&self) {
        tokio::select! {
            _ = self.soft.cancelled() => {}
            _ = sleep(self.frequency) => {}
        }
    }

    fn healthy(&self) {
        if self.swap(State::Healthy) == State::Healthy {
            return; // state unchanged, already notified
        }

        self.monitor.healthy();
        info!(resource = %self.resource_name, "Health check passed");
    }

    fn failing(&self, error: ProbeError) {
        if self.swap(State::Failing) == State::Failing {
            return; // state unchanged, already notified
        }

        self.monitor.failing(&error);
        warn!(resource = %self.resource_name, error = %error, "Health check failing");
    }

    /// Terminal transition. The monitor is always notified; the shutdown
    /// delay only runs when the previous state was `Healthy` (a load balancer
    /// that was never told this instance is healthy has nothing to drain),
    /// and is cut short if the hard scope is cancelled.
    async fn stopping(&self) {
        let previous = self.swap(State::Stopping);
        self.monitor.stopping();

        if previous != State::Healthy {
            info!(
                resource = %self.resource_name,
                "Entering stopping state, skipping shutdown delay while unhealthy"
            );
            return;
        }

        info!(
            resource = %self.resource_name,
            delay = ?self.shutdown_delay,
            "Entering stopping state, waiting before concluding"
        );
        tokio::select! {
            _ = self.hard.cancelled() => {}
            _ = sleep(self.shutdown_delay) => {}
        }
    }

    fn swap(&self, state: State) -> State {
        State::from_u8(self.state.swap(state as u8, Ordering::SeqCst))
    }

    /// Answer one request from the precomputed content for the current state.
    ///
    /// A single atomic load plus the Accept-header scan; never blocks on the
    /// polling task.
    pub fn respond(&self, headers: &HeaderMap) -> Response {
        self.content[self.state.load(Ordering::SeqCst) as usize].respond(headers)
    }

    /// Stop future health checks and begin the shutdown sequence.
    ///
    /// Closes the probe (best-effort), then cancels the soft scope. Idempotent
    /// and non-blocking. The hard scope is left untouched, so the shutdown
    /// delay still runs bounded by it.
    pub fn close(&self) {
        self.probe.close();
        self.soft.cancel();
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
