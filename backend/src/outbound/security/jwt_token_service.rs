//! HS256 JSON Web Token implementation of the token port.
//!
//! Tokens carry a `username` claim. An `exp` claim is only written when a
//! lifetime is configured; without it tokens never expire, which is a known
//! weakness kept for compatibility with existing clients.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenService, TokenServiceError};
use crate::domain::{BearerToken, Username};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<u64>,
}

/// Token service signing with a shared HMAC secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl JwtTokenService {
    /// Create a service signing with `secret`. Tokens carry no expiry.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: None,
        }
    }

    /// Issue tokens expiring `ttl` after signing. Expired tokens are rejected.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    fn expiry(&self) -> Result<Option<u64>, TokenServiceError> {
        let Some(ttl) = self.ttl else {
            return Ok(None);
        };
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| TokenServiceError::signing(err.to_string()))?;
        Ok(Some(now.saturating_add(ttl).as_secs()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, username: &Username) -> Result<BearerToken, TokenServiceError> {
        let claims = Claims {
            username: username.to_string(),
            exp: self.expiry()?,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenServiceError::signing(err.to_string()))?;
        Ok(BearerToken::new(token))
    }

    fn verify(&self, token: &str) -> Result<Username, TokenServiceError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenServiceError::invalid(err.to_string()))?;
        Username::new(data.claims.username).map_err(|err| TokenServiceError::invalid(err.to_string()))
    }
}
