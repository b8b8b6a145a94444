use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use tollgate_core::AuthError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AuthError`.
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            tracing::debug!(error = %self.0, "request rejected");
        } else {
            tracing::error!(error = %self.0, "internal error");
        }

        let (status, error_type, message) = match &self.0 {
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials",
            ),
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Missing bearer token",
            ),
            AuthError::InvalidToken(_) => {
                (StatusCode::FORBIDDEN, "forbidden", "Invalid or expired token")
            }
            AuthError::TokenEncoding(_) | AuthError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error",
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: message.to_string(),
        };

        (status, axum::Json(body)).into_response()
    }
}
