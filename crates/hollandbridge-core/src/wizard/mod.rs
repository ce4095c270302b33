//! The step wizard.
//!
//! - `state`: step navigation and typed answer mutation for one user
//! - `session`: a wizard plus the status of its submission attempts
//! - `registry`: session-keyed storage for multi-user deployments

pub mod registry;
pub mod session;
pub mod state;
