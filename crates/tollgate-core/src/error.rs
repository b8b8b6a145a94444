use thiserror::Error;

/// Error types for credential checks, token handling, and startup configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No roster entry matched the presented username/password pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Protected route reached without a bearer token.
    #[error("Missing bearer token")]
    MissingToken,

    /// Token present but its signature or expiry check failed.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Signing the claims failed.
    #[error("Token encoding error: {0}")]
    TokenEncoding(String),

    /// Configuration missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AuthError {
    /// Returns true if the client is to blame, as opposed to the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken(_)
        )
    }
}
