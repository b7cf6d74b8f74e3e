//! Shared types for the Heron leave/schedule system
//!
//! Common types used across multiple crates including domain models,
//! error types, response structures, and change-notification events.

pub mod client;
pub mod error;
pub mod event;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use event::{ScheduleEvent, SCHEDULES_UPDATED};
pub use response::ApiResponse;
