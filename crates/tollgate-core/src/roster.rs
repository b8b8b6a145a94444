//! Static user roster and the credential checker.
//!
//! The roster is built once at startup and never mutated, so it can be
//! shared across request handlers without locking.

use std::collections::HashSet;
use std::path::Path;

use subtle::ConstantTimeEq;

use crate::error::AuthError;
use crate::models::{Credentials, Identity, UserSeed, password_digest};

/// A roster entry. Only the digest of the password is kept.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    password_digest: [u8; 32],
}

impl User {
    fn from_seed(seed: UserSeed) -> Self {
        let password_digest = password_digest(&seed.username, &seed.password);
        Self {
            id: seed.id,
            username: seed.username,
            password_digest,
        }
    }

    fn matches(&self, credentials: &Credentials) -> bool {
        if self.username != credentials.username {
            return false;
        }
        let presented = password_digest(&credentials.username, &credentials.password);
        bool::from(self.password_digest[..].ct_eq(&presented[..]))
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Immutable, in-memory list of known users.
#[derive(Debug, Clone)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    /// Build a roster from seeds, rejecting empty or duplicate entries.
    pub fn new(seeds: Vec<UserSeed>) -> Result<Self, AuthError> {
        if seeds.is_empty() {
            return Err(AuthError::Config("roster must contain at least one user".into()));
        }

        let mut ids = HashSet::new();
        let mut usernames = HashSet::new();
        for seed in &seeds {
            if seed.username.is_empty() || seed.password.is_empty() {
                return Err(AuthError::Config(format!(
                    "roster entry {} has an empty username or password",
                    seed.id
                )));
            }
            if !ids.insert(seed.id) {
                return Err(AuthError::Config(format!("duplicate user id {}", seed.id)));
            }
            if !usernames.insert(seed.username.clone()) {
                return Err(AuthError::Config(format!(
                    "duplicate username '{}'",
                    seed.username
                )));
            }
        }

        Ok(Self {
            users: seeds.into_iter().map(User::from_seed).collect(),
        })
    }

    /// The two demo accounts.
    pub fn demo() -> Result<Self, AuthError> {
        Self::new(vec![
            UserSeed::new(1, "admin", "1234"),
            UserSeed::new(2, "superadmin", "12345678"),
        ])
    }

    /// Load seeds from a JSON array of `{id, username, password}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self, AuthError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AuthError::Config(format!("cannot read roster file {}: {e}", path.display()))
        })?;
        let seeds: Vec<UserSeed> = serde_json::from_str(&raw).map_err(|e| {
            AuthError::Config(format!("invalid roster file {}: {e}", path.display()))
        })?;
        let roster = Self::new(seeds)?;
        tracing::debug!(path = %path.display(), users = roster.len(), "roster file loaded");
        Ok(roster)
    }

    /// Find the user whose username and password both match.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        self.users
            .iter()
            .find(|user| user.matches(credentials))
            .map(User::identity)
            .ok_or(AuthError::InvalidCredentials)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
