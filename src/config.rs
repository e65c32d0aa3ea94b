//! Engine configuration and its builder
//!
//! A plain settings value assembled by the caller and consumed whole by
//! [`crate::StatusEngine::new`]; immutable afterwards. There is no global
//! option state: the builder is an explicit value passed around and finished
//! with [`ConfigBuilder::build`].

use crate::monitor::{Monitor, NoopMonitor};
use crate::probe::{AlwaysHealthy, HealthProbe};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Settings consumed by the status engine.
///
/// The four state labels are presentation strings only; the engine never
/// branches on them.
pub struct Config {
    pub(crate) display_name: String,
    pub(crate) resource_name: String,
    pub(crate) starting_label: String,
    pub(crate) healthy_label: String,
    pub(crate) failing_label: String,
    pub(crate) stopping_label: String,
    pub(crate) version: String,
    pub(crate) frequency: Duration,
    pub(crate) check_timeout: Duration,
    pub(crate) shutdown_delay: Duration,
    pub(crate) lifetime: CancellationToken,
    pub(crate) probe: Arc<dyn HealthProbe>,
    pub(crate) monitor: Arc<dyn Monitor>,
}

impl Config {
    /// Start a builder populated with the defaults: name "status", labels
    /// Starting/OK/Failing/Stopping, no version, one-second frequency,
    /// ten-second timeout, no shutdown delay, a never-cancelled lifetime,
    /// an always-healthy probe, and a no-op monitor.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder().build()
    }
}

/// By-value builder for [`Config`]. Each method returns the modified builder.
pub struct ConfigBuilder {
    display_name: String,
    resource_name: String,
    starting_label: String,
    healthy_label: String,
    failing_label: String,
    stopping_label: String,
    version: String,
    frequency: Duration,
    check_timeout: Duration,
    shutdown_delay: Duration,
    lifetime: CancellationToken,
    probe: Arc<dyn HealthProbe>,
    monitor: Arc<dyn Monitor>,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            display_name: "status".to_string(),
            resource_name: "status".to_string(),
            starting_label: "Starting".to_string(),
            healthy_label: "OK".to_string(),
            failing_label: "Failing".to_string(),
            stopping_label: "Stopping".to_string(),
            version: String::new(),
            frequency: Duration::from_secs(1),
            check_timeout: Duration::from_secs(10),
            shutdown_delay: Duration::ZERO,
            lifetime: CancellationToken::new(),
            probe: Arc::new(AlwaysHealthy),
            monitor: Arc::new(NoopMonitor),
        }
    }
}

impl ConfigBuilder {
    /// Set both the display name and the resource name.
    pub fn name(self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.display_name(value.clone()).resource_name(value)
    }

    /// Name shown in rendered response bodies.
    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = value.into();
        self
    }

    /// Name used in transition log lines.
    pub fn resource_name(mut self, value: impl Into<String>) -> Self {
        self.resource_name = value.into();
        self
    }

    pub fn starting_label(mut self, value: impl Into<String>) -> Self {
        self.starting_label = value.into();
        self
    }

    pub fn healthy_label(mut self, value: impl Into<String>) -> Self {
        self.healthy_label = value.into();
        self
    }

    pub fn failing_label(mut self, value: impl Into<String>) -> Self {
        self.failing_label = value.into();
        self
    }

    pub fn stopping_label(mut self, value: impl Into<String>) -> Self {
        self.stopping_label = value.into();
        self
    }

    /// Version string appended to response bodies. Empty means omitted.
    pub fn version(mut self, value: impl Into<String>) -> Self {
        self.version = value.into();
        self
    }

    /// How often the probe is evaluated.
    pub fn frequency(mut self, value: Duration) -> Self {
        self.frequency = value;
        self
    }

    /// How long one probe evaluation may take before it counts as failing.
    pub fn check_timeout(mut self, value: Duration) -> Self {
        self.check_timeout = value;
        self
    }

    /// How long to keep serving after a healthy engine starts stopping,
    /// giving load balancers time to drain traffic.
    pub fn shutdown_delay(mut self, value: Duration) -> Self {
        self.shutdown_delay = value;
        self
    }

    /// Hard cancellation scope; cancelling it aborts any in-progress wait,
    /// including the shutdown delay.
    pub fn lifetime(mut self, value: CancellationToken) -> Self {
        self.lifetime = value;
        self
    }

    pub fn probe(mut self, value: Arc<dyn HealthProbe>) -> Self {
        self.probe = value;
        self
    }

    pub fn monitor(mut self, value: Arc<dyn Monitor>) -> Self {
        self.monitor = value;
        self
    }

    pub fn build(self) -> Config {
        Config {
            display_name: self.display_name,
            resource_name: self.resource_name,
            starting_label: self.starting_label,
            healthy_label: self.healthy_label,
            failing_label: self.failing_label,
            stopping_label: self.stopping_label,
            version: self.version,
            frequency: self.frequency,
            check_timeout: self.check_timeout,
            shutdown_delay: self.shutdown_delay,
            lifetime: self.lifetime,
            probe: self.probe,
            monitor: self.monitor,
        }
    }
}
