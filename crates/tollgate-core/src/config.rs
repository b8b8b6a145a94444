use std::fmt;
use std::path::PathBuf;

use crate::error::AuthError;
use crate::roster::Roster;
use crate::token::TokenService;

pub const SECRET_VAR: &str = "TOLLGATE_JWT_SECRET";
pub const ROSTER_FILE_VAR: &str = "TOLLGATE_ROSTER_FILE";

/// Secret and roster source for the authentication core.
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub roster_file: Option<PathBuf>,
}

impl AuthConfig {
    /// Read configuration from environment variables.
    ///
    /// - `TOLLGATE_JWT_SECRET` (required, non-empty)
    /// - `TOLLGATE_ROSTER_FILE` (optional, demo roster when unset)
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AuthError> {
        let secret = lookup(SECRET_VAR).ok_or_else(|| {
            AuthError::Config(format!("{SECRET_VAR} not set. Required to sign tokens."))
        })?;
        if secret.trim().is_empty() {
            return Err(AuthError::Config(format!("{SECRET_VAR} must not be empty")));
        }

        let roster_file = lookup(ROSTER_FILE_VAR)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            secret,
            roster_file,
        })
    }

    pub fn load_roster(&self) -> Result<Roster, AuthError> {
        match &self.roster_file {
            Some(path) => Roster::from_json_file(path),
            None => Roster::demo(),
        }
    }

    pub fn token_service(&self) -> Result<TokenService, AuthError> {
        TokenService::new(self.secret.as_bytes())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("roster_file", &self.roster_file)
            .finish()
    }
}
