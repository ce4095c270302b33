//! Observability setup for the Holland Bridge.
//!
//! - `tracing_setup`: global subscriber with optional OpenTelemetry export

pub mod tracing_setup;
