//! Data models
//!
//! Shared between the backend surface, clients and the reconciliation
//! core. Wire format is JSON; dates travel as plain `YYYY-MM-DD` strings
//! so no timezone conversion can shift a calendar day.

pub mod agent;
pub mod leave;
pub mod schedule;

// Re-exports
pub use agent::*;
pub use leave::*;
pub use schedule::*;
