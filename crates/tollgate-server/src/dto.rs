use serde::{Deserialize, Deserializer, Serialize};

use tollgate_core::{Claims, Credentials};

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Absent, `null`, or non-string fields become empty strings, which never match the roster.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub password: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

impl From<LoginRequest> for Credentials {
    fn from(req: LoginRequest) -> Self {
        Credentials::new(req.username, req.password)
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Signed HS256 token, valid for one hour
    pub token: String,
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Claims recovered from a verified token.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileUser {
    pub id: i64,
    pub username: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Expiry, Unix seconds
    pub exp: i64,
}

impl From<Claims> for ProfileUser {
    fn from(c: Claims) -> Self {
        Self {
            id: c.id,
            username: c.username,
            iat: c.iat,
            exp: c.exp,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub message: &'static str,
    pub user: ProfileUser,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
