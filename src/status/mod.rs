//! Status engine and per-state response rendering
//!
//! The engine owns the state machine and the polling loop; the render module
//! precomputes the JSON and plain-text bodies served for each state.

mod engine;
mod render;

pub use engine::{State, StatusEngine};
