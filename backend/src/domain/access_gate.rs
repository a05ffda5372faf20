//! Bearer-token access gate.
//!
//! The gate is stateless: it inspects the raw `Authorization` value, verifies
//! the token and yields the identity claim. Callers do not learn why a token
//! was rejected. The identity is not used for per-resource ownership checks.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::TokenService;
use crate::domain::{Error, Username};

/// Scheme prefix expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

const TOKEN_MISSING: &str = "Token is missing";
const TOKEN_INVALID: &str = "Invalid token";

/// Guard run before protected operations.
#[derive(Clone)]
pub struct AccessGate {
    tokens: Arc<dyn TokenService>,
}

impl AccessGate {
    /// Create a gate verifying tokens with `tokens`.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    /// Authorize a request given its raw `Authorization` header value.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use health_registry::domain::{AccessGate, ErrorCode};
    /// use health_registry::outbound::security::JwtTokenService;
    ///
    /// let gate = AccessGate::new(Arc::new(JwtTokenService::new(b"0123456789abcdef0123456789abcdef")));
    /// let err = gate.authorize(None).expect_err("no header");
    /// assert_eq!(err.code(), ErrorCode::Unauthorized);
    /// ```
    pub fn authorize(&self, header: Option<&str>) -> Result<Username, Error> {
        let Some(value) = header else {
            return Err(Error::unauthorized(TOKEN_MISSING));
        };
        let token = value
            .strip_prefix(BEARER_PREFIX)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::unauthorized(TOKEN_INVALID))?;

        self.tokens.verify(token).map_err(|err| {
            debug!(error = %err, "bearer token rejected");
            Error::unauthorized(TOKEN_INVALID)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockTokenService, TokenServiceError};
    use rstest::rstest;

    fn gate() -> AccessGate {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().returning(|token| {
            if token == "good" {
                Username::new("nurse").map_err(|err| TokenServiceError::invalid(err.to_string()))
            } else {
                Err(TokenServiceError::invalid("bad signature"))
            }
        });
        AccessGate::new(Arc::new(tokens))
    }

    #[rstest]
    fn accepts_valid_bearer_token() {
        let identity = gate().authorize(Some("Bearer good")).expect("authorized");
        assert_eq!(identity.as_ref(), "nurse");
    }

    #[rstest]
    fn missing_header_reports_missing_token() {
        let error = gate().authorize(None).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), TOKEN_MISSING);
    }

    #[rstest]
    #[case("Bearer")]
    #[case("Bearer ")]
    #[case("Bearer    ")]
    #[case("Basic good")]
    #[case("good")]
    #[case("bearer good")]
    #[case("Bearer forged")]
    #[case("Bearer  good")]
    #[case("Bearer good ")]
    #[case("Bearer\tgood")]
    fn malformed_or_invalid_tokens_are_indistinguishable(#[case] header: &str) {
        let error = gate().authorize(Some(header)).expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), TOKEN_INVALID);
    }
}
