//! Secret provider implementations.
//!
//! - `env`: Environment variable provider (highest priority)
//! - `file`: `secrets.toml` in the data directory
//! - `chain`: Wires the providers together in precedence order

pub mod chain;
pub mod env;
pub mod file;
