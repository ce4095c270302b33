//! Shared domain types for the Holland Bridge.
//!
//! This crate contains the questionnaire vocabulary (Holland codes, the
//! Values Bridge catalog, YouScience trait categories), the answer record
//! accumulated by the wizard, LLM request/response shapes, configuration
//! types, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod answers;
pub mod config;
pub mod error;
pub mod holland;
pub mod llm;
pub mod secret;
pub mod traits;
pub mod values;
pub mod wizard;
