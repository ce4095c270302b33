//! Business logic and port definitions for the Holland Bridge.
//!
//! This crate owns the wizard state machine, the deterministic prompt
//! builder, and the submission flow. It defines the traits ("ports") that
//! the infrastructure layer implements and depends only on
//! `hollandbridge-types` -- never on `hollandbridge-infra` or any network
//! crate.

pub mod llm;
pub mod prompt;
pub mod repository;
pub mod service;
pub mod submission;
pub mod wizard;
