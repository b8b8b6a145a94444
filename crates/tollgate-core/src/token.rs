//! Signed-token issuance and verification (HS256 JWT).
//!
//! Verification is a stateless recomputation: a token is accepted iff its
//! signature verifies under the shared secret and the current time is
//! strictly before its `exp` claim.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::AuthError;
use crate::models::{Claims, Identity};

/// Lifetime of every issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Issues and verifies tokens with a symmetric secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Config("signing secret must not be empty".into()));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: TimeDelta::seconds(TOKEN_TTL_SECS),
        })
    }

    /// Sign a token for `identity`, valid for one hour from now.
    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue_at(identity, Utc::now())
    }

    /// Sign a token for `identity` as if issued at `issued_at`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            id: identity.id,
            username: identity.username.clone(),
            iat,
            exp: iat + self.ttl.num_seconds(),
        };

        jsonwebtoken::encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenEncoding(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        // The decoder accepts `exp == now`; the token is already dead at that instant.
        if data.claims.is_expired_at(Utc::now()) {
            return Err(AuthError::InvalidToken("ExpiredSignature".into()));
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &ALGORITHM)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
