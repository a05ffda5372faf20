//! Login service composing the credential store with token signing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::credentials::CredentialStore;
use crate::domain::ports::{LoginService, PasswordHasher, TokenService, UserRepository};
use crate::domain::{BearerToken, Error, ErrorCode, LoginCredentials};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// [`LoginService`] that checks credentials and issues signed tokens.
///
/// Unknown usernames and wrong passwords produce the same unauthorized
/// error after the same hashing work. Storage outages still surface as their
/// own error kinds.
pub struct TokenLoginService<U, H> {
    credentials: CredentialStore<U, H>,
    tokens: Arc<dyn TokenService>,
}

impl<U, H> TokenLoginService<U, H> {
    /// Create a login service.
    pub fn new(credentials: CredentialStore<U, H>, tokens: Arc<dyn TokenService>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }
}

#[async_trait]
impl<U, H> LoginService for TokenLoginService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<BearerToken, Error> {
        let user = match self
            .credentials
            .find_user_by_username(credentials.username())
            .await
        {
            Ok(user) => user,
            Err(err) if err.code() == ErrorCode::NotFound => {
                if let Err(err) = self
                    .credentials
                    .verify_unknown_user(credentials.password())
                    .await
                {
                    warn!(error = %err, "unknown-user verification failed");
                }
                return Err(Error::unauthorized(INVALID_CREDENTIALS));
            }
            Err(err) => return Err(err),
        };

        let verified = match self
            .credentials
            .verify_password(&user, credentials.password())
            .await
        {
            Ok(verified) => verified,
            Err(err) => {
                warn!(username = %user.username(), error = %err, "password verification failed");
                false
            }
        };
        if !verified {
            debug!(username = %user.username(), "password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens
            .issue(user.username())
            .map_err(|err| Error::internal(err.to_string()))
    }
}
