//! Process health over HTTP.
//!
//! A status engine polls an injected health probe in the background and
//! publishes one of four states (`Starting`, `Healthy`, `Failing`,
//! `Stopping`); a single HTTP handler serves the current state with JSON or
//! plain-text content negotiated per request. Orchestration layers poll the
//! endpoint to decide whether to route traffic to, or restart, the process.

pub mod config;
pub mod monitor;
pub mod probe;
pub mod server;
pub mod status;

pub use config::{Config, ConfigBuilder};
pub use monitor::{Monitor, NoopMonitor};
pub use probe::{probe_fn, AlwaysHealthy, CompositeProbe, HealthProbe, HttpPingProbe, ProbeError};
pub use server::{run_status_server, wait_for_signal};
pub use status::{State, StatusEngine};
