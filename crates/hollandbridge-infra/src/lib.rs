//! Infrastructure layer for the Holland Bridge.
//!
//! Contains implementations of the ports defined in `hollandbridge-core`:
//! the OpenAI-compatible generation provider, environment and file-backed
//! secret providers, plus the `config.toml` loader and data directory
//! layout.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod secret;
