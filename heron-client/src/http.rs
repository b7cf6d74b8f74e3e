//! HTTP client for network-based API calls

use crate::{
    AffectedRows, ApiResponse, ClientConfig, ClientError, ClientResult, CurrentUserResponse,
    LoginResponse,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::{Agent, LeaveRequest, LeaveStatus};

/// Equality filter pair for the rows API
pub type Filter<'a> = (&'a str, &'a str);

/// HTTP client for making network requests to the backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request with equality-filter query parameters
    async fn get<T: DeserializeOwned>(&self, path: &str, filters: &[Filter<'_>]) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(filters);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with filters and JSON body
    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        filters: &[Filter<'_>],
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.patch(&url).query(filters).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request with filters
    async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &[Filter<'_>],
    ) -> ClientResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.delete(&url).query(filters);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Login with username and password, storing the issued token
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = shared::client::LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let login = self
            .post::<ApiResponse<LoginResponse>, _>("/api/auth/login", &request)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing login data".to_string()))?;

        self.token = Some(login.token.clone());
        Ok(login)
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        self.get::<ApiResponse<CurrentUserResponse>>("/api/auth/me", &[])
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing user data".to_string()))
    }

    /// Logout
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.post_empty::<ApiResponse<()>>("/api/auth/logout")
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
        self.get::<ApiResponse<Vec<T>>>(&format!("/api/rows/{collection}"), filters)
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
        self.post::<ApiResponse<T>, _>(&format!("/api/rows/{collection}"), row)
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
        let affected = self
            .patch::<ApiResponse<AffectedRows>, _>(&format!("/api/rows/{collection}"), filters, patch)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing affected count".to_string()))?;
        Ok(affected.affected)
    }

    /// Delete every row matching the filters
    pub async fn delete_rows(&self, collection: &str, filters: &[Filter<'_>]) -> ClientResult<u64> {
        let affected = self
            .delete::<ApiResponse<AffectedRows>>(&format!("/api/rows/{collection}"), filters)
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
            Some(status) => {
                let value = match status {
                    LeaveStatus::Pending => "pending",
                    LeaveStatus::Approved => "approved",
                    LeaveStatus::Refused => "refused",
                };
                self.fetch_rows("leave_requests", &[("status", value)]).await
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
