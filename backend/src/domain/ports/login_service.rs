//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to exchange credentials for a bearer token
//! without knowing the backing credential store or signing scheme.

use async_trait::async_trait;

use crate::domain::{BearerToken, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return a signed token.
    ///
    /// Every credential failure is reported as the same unauthorized error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, Error>;
}
