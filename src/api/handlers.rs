//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::account::{Accounts, LoginRequest, LoginResponse, ProfileUpdate, SignupRequest, SignupResponse};
use crate::error::{ApiError, ErrorBody};
use crate::form::{FormSubmission, Forms};
use crate::land::{LandUpdate, Lands, NewLand};
use crate::store::{document_to_json, DocumentStore};

/// Application state shared with handlers.
///
/// Built once at startup around a single store; every clone shares it.
#[derive(Clone)]
pub struct AppState {
    /// Backing document store.
    pub store: Arc<dyn DocumentStore>,
    /// Account operations.
    pub accounts: Accounts,
    /// Land operations.
    pub lands: Lands,
    /// Form operations.
    pub forms: Forms,
    /// Prometheus handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
    /// Whether the permissive CORS layer is applied.
    pub cors: bool,
}

impl AppState {
    /// Create new app state over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            accounts: Accounts::new(store.clone()),
            lands: Lands::new(store.clone()),
            forms: Forms::new(store.clone()),
            store,
            metrics: None,
            cors: true,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Enable or disable the CORS layer.
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the store answered a ping.
    pub ready: bool,
}

/// Body carrying only a message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Outcome message.
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if the store is reachable, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(ReadyResponse { ready: true })),
        Err(e) => {
            tracing::warn!("Readiness ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyResponse { ready: false }),
            )
        }
    }
}

/// Prometheus exposition.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Register a farmer or landowner.
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Account created", body = SignupResponse),
        (status = 400, description = "Email already exists for this role", body = ErrorBody)
    ),
    tag = "accounts"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    Ok(Json(state.accounts.signup(request).await?))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials matched", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    ),
    tag = "accounts"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    Ok(Json(state.accounts.login(request).await?))
}

/// Fetch an account document.
#[utoipa::path(
    get,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account document"),
        (status = 404, description = "Profile not found", body = ErrorBody)
    ),
    tag = "accounts"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let user = state.accounts.get_profile(&user_id).await?;
    Ok(Json(document_to_json(user)))
}

/// Merge fields into an account.
#[utoipa::path(
    put,
    path = "/api/profile/{user_id}",
    params(("user_id" = String, Path, description = "Account identifier")),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated account document"),
        (status = 404, description = "Profile not found", body = ErrorBody)
    ),
    tag = "accounts"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Value>, ApiError> {
    let user = state.accounts.update_profile(&user_id, update).await?;
    Ok(Json(document_to_json(user)))
}

/// List every land listing.
#[utoipa::path(
    get,
    path = "/api/lands",
    responses((status = 200, description = "All land documents")),
    tag = "lands"
)]
pub async fn list_lands(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let lands = state.lands.list_lands().await?;
    Ok(Json(Value::Array(
        lands.into_iter().map(document_to_json).collect(),
    )))
}

/// List lands owned by an account.
#[utoipa::path(
    get,
    path = "/api/lands/user/{user_id}",
    params(("user_id" = String, Path, description = "Owner identifier, matched literally")),
    responses((status = 200, description = "Land documents with this owner_id")),
    tag = "lands"
)]
pub async fn list_user_lands(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let lands = state.lands.list_lands_by_owner(&user_id).await?;
    Ok(Json(Value::Array(
        lands.into_iter().map(document_to_json).collect(),
    )))
}

/// Create a land listing.
#[utoipa::path(
    post,
    path = "/api/lands",
    request_body = NewLand,
    responses((status = 200, description = "Stored land document")),
    tag = "lands"
)]
pub async fn create_land(
    State(state): State<AppState>,
    Json(land): Json<NewLand>,
) -> Result<Json<Value>, ApiError> {
    let created = state.lands.create_land(land).await?;
    Ok(Json(document_to_json(created)))
}

/// Merge fields into a land listing.
#[utoipa::path(
    put,
    path = "/api/lands/{land_id}",
    params(("land_id" = String, Path, description = "Land identifier")),
    request_body = LandUpdate,
    responses(
        (status = 200, description = "Updated land document"),
        (status = 404, description = "Land not found", body = ErrorBody)
    ),
    tag = "lands"
)]
pub async fn update_land(
    State(state): State<AppState>,
    Path(land_id): Path<String>,
    Json(fields): Json<LandUpdate>,
) -> Result<Json<Value>, ApiError> {
    let updated = state.lands.update_land(&land_id, fields).await?;
    Ok(Json(document_to_json(updated)))
}

/// Delete a land listing.
#[utoipa::path(
    delete,
    path = "/api/lands/{land_id}",
    params(("land_id" = String, Path, description = "Land identifier")),
    responses(
        (status = 200, description = "Land deleted", body = MessageResponse),
        (status = 404, description = "Land not found", body = ErrorBody)
    ),
    tag = "lands"
)]
pub async fn delete_land(
    State(state): State<AppState>,
    Path(land_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.lands.delete_land(&land_id).await?;
    Ok(Json(MessageResponse::new("Land deleted successfully")))
}

/// Store a free-form submission.
#[utoipa::path(
    post,
    path = "/api/form",
    request_body = FormSubmission,
    responses((status = 200, description = "Form stored", body = MessageResponse)),
    tag = "forms"
)]
pub async fn store_form(
    State(state): State<AppState>,
    Json(submission): Json<FormSubmission>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.forms.store_form(submission.data).await?;
    Ok(Json(MessageResponse::new(
        "Form data stored successfully in farm database",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn app_state_shares_one_store() {
        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store.clone()));
        let copy = state.clone();

        copy.forms.store_form(serde_json::Map::new()).await.unwrap();
        assert_eq!(store.count(crate::store::Collection::Forms), 1);
        assert!(state.cors);
        assert!(state.metrics.is_none());
    }
}
