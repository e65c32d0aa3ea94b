//! HTTP surface and process signal plumbing
//!
//! The status server answers every request with the current state's
//! precomputed content; signal handling feeds the caller's hard cancellation
//! scope.

mod http;
pub mod shutdown;

pub use http::run_status_server;
pub use shutdown::wait_for_signal;

#[cfg(test)]
#[path = "http_test.rs"]
mod http_tests;
