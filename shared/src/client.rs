//! Client-related types shared between the backend surface and clients
//!
//! Common request/response types used in API communication.
//! These types are shared between heron-backend-mock and heron-client.

use serde::{Deserialize, Serialize};

// Re-export ApiResponse from response module
pub use crate::response::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub role: String,
}

/// Current user response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub role: String,
}

// =============================================================================
// Rows API DTOs
// =============================================================================

/// Result of a bulk row mutation (update/delete by filter)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AffectedRows {
    /// Number of rows matched and mutated
    pub affected: u64,
}
