//! Health probe capability and its concrete variants
//!
//! One trait, several probes tagged by construction:
//! - `AlwaysHealthy`: the default, every check passes
//! - `probe_fn`: wraps an async closure
//! - `CompositeProbe`: evaluates children in order, first failure wins
//! - `HttpPingProbe`: pings a networked dependency over HTTP

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Outcome of a failed health evaluation.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The check did not complete within the configured timeout.
    #[error("health check timed out after {0:?}")]
    Timeout(Duration),

    /// The check completed and reported the dependency unhealthy.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Health evaluation capability supplied by the caller.
///
/// The engine runs `check` under its configured timeout and drops the future
/// when the timeout or the engine's lifetime scope fires first, so
/// implementations are cancelled by drop and need no deadline handling of
/// their own. `close` releases whatever the probe holds; it is best-effort
/// and the default body does nothing.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Evaluate the health of the underlying dependency.
    async fn check(&self) -> anyhow::Result<()>;

    /// Release resources held by the probe. Must not block.
    fn close(&self) {}
}

/// Default probe used when the caller supplies none.
pub struct AlwaysHealthy;

#[async_trait]
impl HealthProbe for AlwaysHealthy {
    async fn check(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Wrap an async closure as a probe.
pub fn probe_fn<F, Fut>(check: F) -> FnProbe<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    FnProbe(check)
}

/// Probe backed by a plain async closure. Built with [`probe_fn`].
pub struct FnProbe<F>(F);

#[async_trait]
impl<F, Fut> HealthProbe for FnProbe<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send,
{
    async fn check(&self) -> anyhow::Result<()> {
        (self.0)().await
    }
}

/// Fans a single check out to several probes.
///
/// Children are evaluated left to right; the first failure is returned and
/// the remaining children are not evaluated.
pub struct CompositeProbe {
    children: Vec<Arc<dyn HealthProbe>>,
}

impl CompositeProbe {
    pub fn new(children: Vec<Arc<dyn HealthProbe>>) -> Self {
        Self { children }
    }
}

#[async_trait]
impl HealthProbe for CompositeProbe {
    async fn check(&self) -> anyhow::Result<()> {
        for child in &self.children {
            child.check().await?;
        }
        Ok(())
    }

    fn close(&self) {
        for child in &self.children {
            child.close();
        }
    }
}

/// Pings a networked dependency with an HTTP GET.
///
/// Healthy iff the endpoint answers with a success status. Connection and
/// response errors surface as the check's failure.
pub struct HttpPingProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpPingProbe {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl HealthProbe for HttpPingProbe {
    async fn check(&self) -> anyhow::Result<()> {
        self.client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "probe_test.rs"]
mod tests;
