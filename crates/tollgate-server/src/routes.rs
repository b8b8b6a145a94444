use std::sync::Arc;

use axum::extract::{Extension, State};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tollgate_core::{Claims, Credentials};

use crate::auth::require_bearer;
use crate::dto::{HealthResponse, LoginRequest, LoginResponse, ProfileResponse, ProfileUser};
use crate::error::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/api/profile", get(profile))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let public = Router::new()
        .route("/api/login", post(login))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", ApiDoc::openapi()));

    public.merge(protected).with_state(state)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = Credentials::from(body);

    let identity = state.roster.authenticate(&credentials).inspect_err(|_| {
        tracing::debug!(username = %credentials.username, "login rejected");
    })?;

    let token = state.tokens.issue(&identity)?;
    tracing::debug!(user_id = identity.id, username = %identity.username, "token issued");

    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Profile of the token holder", body = ProfileResponse),
        (status = 401, description = "Missing bearer token", body = crate::dto::ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = crate::dto::ErrorResponse),
    ),
    security(("bearerAuth" = [])),
    tag = "auth"
)]
pub async fn profile(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    Json(ProfileResponse {
        message: "Welcome!",
        user: ProfileUser::from(claims),
    })
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}
