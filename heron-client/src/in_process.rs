//! In-process client (tower oneshot)
//!
//! Drives an `axum::Router` directly with zero network overhead. Used
//! by the mock backend's integration tests and by embedders that host
//! the backend surface in the same process.

use crate::{
    AffectedRows, ApiResponse, ClientError, ClientResult, CurrentUserResponse, LoginResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::{Agent, LeaveRequest, LeaveStatus};

use super::http::Filter;

/// In-process client (direct Router calls)
#[derive(Clone)]
pub struct InProcessClient {
    router: axum::Router,
    token: Option<String>,
}

impl InProcessClient {
    /// Create an in-process client over a router
    pub fn new(router: axum::Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    /// Set the authentication token
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn path_with_filters(path: &str, filters: &[Filter<'_>]) -> String {
        if filters.is_empty() {
            return path.to_string();
        }
        let query: Vec<String> = filters
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", path, query.join("&"))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: http::Method,
        path_and_query: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<T> {
        use axum::body::Body;
        use tower::ServiceExt;

        let mut builder = http::Request::builder().method(method).uri(path_and_query);

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        if body.is_some() {
            builder = builder.header("Content-Type", "application/json");
        }

        let request = builder
            .body(Body::from(body.unwrap_or_default()))
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).to_string();
            return match status {
                http::StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                http::StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                http::StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                http::StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    // ========== Auth API ==========

    /// Login with username and password, storing the issued token
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = shared::client::LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let body = serde_json::to_vec(&request)?;
        let login = self
            .request::<ApiResponse<LoginResponse>>(http::Method::POST, "/api/auth/login", Some(body))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing login data".to_string()))?;

        self.token = Some(login.token.clone());
        Ok(login)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        self.request::<ApiResponse<CurrentUserResponse>>(http::Method::GET, "/api/auth/me", None)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing user data".to_string()))
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.request::<ApiResponse<()>>(http::Method::POST, "/api/auth/logout", None)
            .await?;
        self.token = None;
        Ok(())
    }

    // ========== Rows API ==========

    /// Fetch every row of a collection matching all equality filters
    pub async fn fetch_rows<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
    ) -> ClientResult<Vec<T>> {
        let path = Self::path_with_filters(&format!("/api/rows/{collection}"), filters);
        self.request::<ApiResponse<Vec<T>>>(http::Method::GET, &path, None)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing rows data".to_string()))
    }

    /// Insert a row, returning the stored row (with assigned id)
    pub async fn insert_row<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        row: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_vec(row)?;
        self.request::<ApiResponse<T>>(
            http::Method::POST,
            &format!("/api/rows/{collection}"),
            Some(body),
        )
        .await?
        .data
        .ok_or_else(|| ClientError::InvalidResponse("Missing inserted row".to_string()))
    }

    /// Merge a patch into every row matching the filters
    pub async fn update_rows<B: Serialize>(
        &self,
        collection: &str,
        filters: &[Filter<'_>],
        patch: &B,
    ) -> ClientResult<u64> {
        let path = Self::path_with_filters(&format!("/api/rows/{collection}"), filters);
        let body = serde_json::to_vec(patch)?;
        let affected = self
            .request::<ApiResponse<AffectedRows>>(http::Method::PATCH, &path, Some(body))
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing affected count".to_string()))?;
        Ok(affected.affected)
    }

    /// Delete every row matching the filters
    pub async fn delete_rows(&self, collection: &str, filters: &[Filter<'_>]) -> ClientResult<u64> {
        let path = Self::path_with_filters(&format!("/api/rows/{collection}"), filters);
        let affected = self
            .request::<ApiResponse<AffectedRows>>(http::Method::DELETE, &path, None)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing affected count".to_string()))?;
        Ok(affected.affected)
    }

    // ========== Typed convenience calls ==========

    /// All agents
    pub async fn agents(&self) -> ClientResult<Vec<Agent>> {
        self.fetch_rows("agents", &[]).await
    }

    /// Leave requests, optionally restricted to one status
    pub async fn leave_requests(
        &self,
        status: Option<LeaveStatus>,
    ) -> ClientResult<Vec<LeaveRequest>> {
        match status {
            Some(LeaveStatus::Pending) => {
                self.fetch_rows("leave_requests", &[("status", "pending")]).await
            }
            Some(LeaveStatus::Approved) => {
                self.fetch_rows("leave_requests", &[("status", "approved")]).await
            }
            Some(LeaveStatus::Refused) => {
                self.fetch_rows("leave_requests", &[("status", "refused")]).await
            }
            None => self.fetch_rows("leave_requests", &[]).await,
        }
    }

    /// Approved leave requests for one agent (the balance calculator's input)
    pub async fn approved_leaves_for(&self, agent_id: &str) -> ClientResult<Vec<LeaveRequest>> {
        self.fetch_rows(
            "leave_requests",
            &[("agent_id", agent_id), ("status", "approved")],
        )
        .await
    }
}
