use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use tollgate_core::AuthError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extract `<token>` from `Authorization: Bearer <token>`.
///
/// Returns `None` for a missing header, a non-UTF-8 value, another scheme, or an empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware that verifies the bearer token and stores its claims in request extensions.
///
/// No token yields 401; a token that fails verification yields 403.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let verified = match bearer_token(request.headers()) {
        None => Err(AuthError::MissingToken),
        Some(token) => state.tokens.verify(token),
    };

    match verified {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(err) => ApiError(err).into_response(),
    }
}
