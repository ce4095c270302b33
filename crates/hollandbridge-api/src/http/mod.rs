//! HTTP/REST API layer for the Holland Bridge.
//!
//! Axum-based REST API at `/api/v1/` with an envelope response format and
//! CORS support. Each client drives its own wizard session.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
