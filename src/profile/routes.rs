//! REST endpoints for the profile session.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::warn;

use super::session::ProfileSession;
use crate::error::{Error, SessionError};

/// Shared state for profile routes.
#[derive(Clone)]
pub struct ProfileRouteState {
    pub session: Arc<ProfileSession>,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    #[serde(default)]
    name: Option<String>,
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "matrimony-profile"
    }))
}

/// GET /api/profile/status
///
/// Completion status, resume step, missing fields, and the profile (null
/// when logged out).
async fn get_status(State(state): State<ProfileRouteState>) -> impl IntoResponse {
    Json(state.session.snapshot().await)
}

/// POST /api/session/login
async fn login(
    State(state): State<ProfileRouteState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    match state.session.login(&req.email, req.name.as_deref()).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /api/profile
///
/// Body is a JSON object of fields to merge; `null` removes a field.
async fn update_profile(
    State(state): State<ProfileRouteState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let Json(fields) = match payload {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection),
    };
    match state.session.update(fields).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/session/logout
async fn logout(State(state): State<ProfileRouteState>) -> Response {
    match state.session.logout().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: Error) -> Response {
    let status = match &err {
        Error::Session(SessionError::NoActiveProfile) => StatusCode::UNAUTHORIZED,
        Error::Session(_) => StatusCode::BAD_REQUEST,
        Error::Config(_) | Error::Database(_) => {
            warn!("Profile request failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(serde_json::json!({"error": err.to_string()})),
    )
        .into_response()
}

/// Unreadable bodies (bad JSON, wrong shape, missing content type) are
/// client errors with the same `{"error": ...}` body as session errors.
fn rejection_response(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": rejection.body_text()})),
    )
        .into_response()
}

/// Build the profile REST routes.
pub fn profile_routes(state: ProfileRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/profile/status", get(get_status))
        .route("/api/profile", patch(update_profile))
        .route("/api/session/login", post(login))
        .route("/api/session/logout", post(logout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
