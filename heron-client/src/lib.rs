//! Heron Client - HTTP client for the hosted backend
//!
//! Thin wrapper over the backend's REST surface: token auth plus
//! generic filtered-CRUD row access per collection.

pub mod config;
pub mod error;
pub mod http;

#[cfg(feature = "in-process")]
pub mod in_process;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{Filter, HttpClient};

#[cfg(feature = "in-process")]
pub use in_process::InProcessClient;

// Re-export shared types for convenience
pub use shared::client::{AffectedRows, ApiResponse, CurrentUserResponse, LoginResponse, UserInfo};
