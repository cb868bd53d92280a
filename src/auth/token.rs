use crate::error::DomainError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Time source for token issuance and expiry checks.
///
/// Injected into `TokenCodec` so expiry behaviour is deterministic under
/// test; production uses [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Claims embedded in a signed identity token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject identity id (uuid string).
    pub sub: String,
    /// Username of the subject at issuance time.
    pub username: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Absolute expiry timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Parses the subject id back into a `Uuid`.
    pub fn subject_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| DomainError::InvalidToken("Invalid token".to_string()))
    }
}

/// Creates and verifies signed, time-bounded identity tokens (HS256 JWTs).
///
/// The signing secret and default TTL are supplied at construction; the codec
/// never reads ambient/global state. Token validity is entirely a function of
/// signature and expiry: there is no server-side token storage.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    /// Issues a signed token for `subject_id`, expiring after the configured
    /// TTL.
    pub fn issue(&self, subject_id: Uuid, username: &str) -> Result<String, DomainError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: subject_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token string and returns its claims.
    ///
    /// Checks structure and signature first, then expiry against the injected
    /// clock. A malformed or tampered token fails with `InvalidToken` even if
    /// its claims look plausible; a correctly signed token past its expiry
    /// fails with the more specific `TokenExpired`.
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        // Expiry is checked below against the injected clock, so the codec is
        // the single time authority and jsonwebtoken's own exp check stays off.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::InvalidToken("Invalid token".to_string()))?;

        if claims.exp < self.clock.now().timestamp() {
            return Err(DomainError::TokenExpired);
        }

        Ok(claims)
    }
}
