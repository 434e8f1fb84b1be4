//! # foresight-observability
//!
//! Subscriber setup for hosts embedding the simulation core, span macros for
//! the long-running operations, and structured events the session emits.

pub mod tracing_setup;

pub use tracing_setup::{events, init_from_config, init_tracing, init_tracing_with_filter};
