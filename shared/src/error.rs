//! Unified error system for the Heron framework
//!
//! Every API-facing failure maps to an [`ApiErrorCode`] with a stable
//! string code and an HTTP status, wrapped in the standard
//! [`ApiResponse`](crate::response::ApiResponse) envelope.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Agent errors
//! - 3xxx: Leave request errors
//! - 4xxx: Schedule errors
//! - 9xxx: System errors

use crate::http::{Response, StatusCode};
use crate::response::ApiResponse;
use thiserror::Error;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Authentication required (401)
    Unauthorized,
    /// Invalid token (401)
    InvalidToken,
    /// Permission denied (403)
    Forbidden,
    /// Resource not found (404)
    NotFound,
    /// Resource already exists (409)
    Conflict,
    /// Business rule violation (422)
    BusinessRule,
    /// Internal server error (500)
    Internal,
    /// Persistence error (500)
    Storage,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::BusinessRule => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::Unauthorized => "E1001",
            Self::InvalidToken => "E1002",
            Self::Forbidden => "E1003",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::BusinessRule => "E0005",
            Self::Internal => "E9001",
            Self::Storage => "E9002",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the framework
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error
    #[error("{message}")]
    Validation { message: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid token
    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    /// Permission denied
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    /// Resource not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Resource already exists
    #[error("Resource already exists: {resource}")]
    Conflict { resource: String },

    /// Business rule violation
    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    /// Persistence error
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    // ========== Convenient constructors ==========

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an InvalidToken error
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Create a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a Conflict error
    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict {
            resource: resource.into(),
        }
    }

    /// Create a BusinessRule error
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule {
            message: message.into(),
        }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // ========== Error inspection methods ==========

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::Validation { .. } => ApiErrorCode::Validation,
            Self::Unauthorized => ApiErrorCode::Unauthorized,
            Self::InvalidToken { .. } => ApiErrorCode::InvalidToken,
            Self::Forbidden { .. } => ApiErrorCode::Forbidden,
            Self::NotFound { .. } => ApiErrorCode::NotFound,
            Self::Conflict { .. } => ApiErrorCode::Conflict,
            Self::BusinessRule { .. } => ApiErrorCode::BusinessRule,
            Self::Storage { .. } => ApiErrorCode::Storage,
            Self::Internal { .. } => ApiErrorCode::Internal,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Unauthorized => "Please login first".to_string(),
            Self::InvalidToken { message } => message.clone(),
            Self::Forbidden { message } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
            Self::Conflict { resource } => format!("{} already exists", resource),
            Self::BusinessRule { message } => message.clone(),
            Self::Storage { message } => message.clone(),
            Self::Internal { message } => message.clone(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> Response<axum::body::Body> {
        let code = self.error_code();
        let status = code.status_code();
        let message = self.message();

        let body = ApiResponse::<()>::error(code.code(), message);
        let json_body = serde_json::to_string(&body).unwrap_or_default();

        ::http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(json_body.into())
            .unwrap_or_else(|_| {
                ::http::Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body("Internal error".into())
                    .unwrap()
            })
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
