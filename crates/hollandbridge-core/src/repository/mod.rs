//! Storage trait definitions (ports).
//!
//! These traits define the interfaces that the infrastructure layer
//! (hollandbridge-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod secret;
