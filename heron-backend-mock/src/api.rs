//! Mock backend API
//!
//! Hand-rolled stand-in for the hosted backend's REST and auth surface:
//! token login plus filtered CRUD over named row collections. Filters
//! are equality-only, matching the hosted service's query contract.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::client::{AffectedRows, CurrentUserResponse, LoginRequest, LoginResponse, UserInfo};
use shared::{ApiError, ApiResponse, ApiResult};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Token lifetime issued by the mock
const TOKEN_HOURS: i64 = 8;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    username: String,
    role: String,
    exp: usize,
}

/// Build the full mock router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route(
            "/api/rows/{collection}",
            get(list_rows)
                .post(insert_row)
                .patch(update_rows)
                .delete(delete_rows),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ========== Auth ==========

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let user = state
        .authenticate(&req.username, &req.password)
        .ok_or(ApiError::Unauthorized)?;

    let exp = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_HOURS))
        .ok_or_else(|| ApiError::internal("Clock overflow"))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user.id.clone(),
        username: user.username.clone(),
        role: user.role.clone(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("Failed to sign token: {e}")))?;

    tracing::info!(username = %user.username, "Mock login");
    Ok(Json(ApiResponse::ok(LoginResponse {
        token,
        user: UserInfo {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role.clone(),
        },
    })))
}

async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiResponse<CurrentUserResponse>>> {
    let claims = authorize(&state, &headers)?;
    Ok(Json(ApiResponse::ok(CurrentUserResponse {
        id: claims.sub,
        username: claims.username,
        role: claims.role,
    })))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ApiResponse<()>>> {
    // Stateless tokens: nothing to revoke, but the caller must hold one
    authorize(&state, &headers)?;
    Ok(Json(ApiResponse::ok(())))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let auth = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| ApiError::invalid_token(e.to_string()))
}

// ========== Rows ==========

async fn list_rows(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<Vec<Value>>>> {
    authorize(&state, &headers)?;
    let collections = state.collections.read().await;
    let rows = collections
        .get(&collection)
        .map(|rows| {
            rows.iter()
                .filter(|row| matches(row, &filters))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(ApiResponse::ok(rows)))
}

async fn insert_row(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Json(row): Json<Value>,
) -> ApiResult<Json<ApiResponse<Value>>> {
    authorize(&state, &headers)?;
    let Value::Object(mut fields) = row else {
        return Err(ApiError::validation("Row must be a JSON object"));
    };

    // The hosted service stamps id and created_at; so does the mock
    fields
        .entry("id")
        .or_insert_with(|| Value::String(shared::util::snowflake_id().to_string()));
    fields
        .entry("created_at")
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

    let stored = Value::Object(fields);
    let mut collections = state.collections.write().await;
    collections
        .entry(collection.clone())
        .or_default()
        .push(stored.clone());

    tracing::debug!(%collection, "Row inserted");
    Ok(Json(ApiResponse::ok(stored)))
}

async fn update_rows(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
    Json(patch): Json<Value>,
) -> ApiResult<Json<ApiResponse<AffectedRows>>> {
    authorize(&state, &headers)?;
    let Value::Object(patch) = patch else {
        return Err(ApiError::validation("Patch must be a JSON object"));
    };

    let mut collections = state.collections.write().await;
    let mut affected = 0u64;
    if let Some(rows) = collections.get_mut(&collection) {
        for row in rows.iter_mut().filter(|row| matches(row, &filters)) {
            if let Value::Object(fields) = row {
                for (key, value) in &patch {
                    fields.insert(key.clone(), value.clone());
                }
                affected += 1;
            }
        }
    }

    tracing::debug!(%collection, affected, "Rows updated");
    Ok(Json(ApiResponse::ok(AffectedRows { affected })))
}

async fn delete_rows(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Query(filters): Query<HashMap<String, String>>,
) -> ApiResult<Json<ApiResponse<AffectedRows>>> {
    authorize(&state, &headers)?;
    let mut collections = state.collections.write().await;
    let mut affected = 0u64;
    if let Some(rows) = collections.get_mut(&collection) {
        let before = rows.len();
        rows.retain(|row| !matches(row, &filters));
        affected = (before - rows.len()) as u64;
    }

    tracing::debug!(%collection, affected, "Rows deleted");
    Ok(Json(ApiResponse::ok(AffectedRows { affected })))
}

/// Equality match of every filter against the row's fields
///
/// Non-string scalars compare against their canonical string form, the
/// same loose equality the hosted service applies to query parameters.
fn matches(row: &Value, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(key, want)| match row.get(key) {
        Some(Value::String(s)) => s == want,
        Some(Value::Number(n)) => n.to_string() == *want,
        Some(Value::Bool(b)) => b.to_string() == *want,
        _ => false,
    })
}
