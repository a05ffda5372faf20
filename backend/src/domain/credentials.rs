//! Credential store: user lookup, provisioning and password checks.
//!
//! Hashing runs on the blocking pool because Argon2 is deliberately slow.
//! Plaintext passwords are never logged.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::ports::{
    PasswordHasher, PasswordHasherError, UserPersistenceError, UserRepository,
};
use crate::domain::{Error, Password, PasswordHash, User, Username};

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => Error::conflict("User already exists"),
    }
}

/// Argon2id PHC string with default cost parameters that matches no
/// password. Logins for unknown usernames verify against it so they take as
/// long as a wrong password.
pub(crate) const UNKNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

/// Credential store over a user repository and a password hasher.
pub struct CredentialStore<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> Clone for CredentialStore<U, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<U, H> CredentialStore<U, H> {
    /// Create a store over the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> CredentialStore<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn hash(&self, password: &Password) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    /// Create a user with a freshly salted hash.
    ///
    /// Fails with a conflict when the username is taken.
    pub async fn provision_user(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<User, Error> {
        let hash = self.hash(password).await?;
        let user = self
            .users
            .insert(username, &hash)
            .await
            .map_err(map_user_error)?;
        info!(username = %user.username(), "user provisioned");
        Ok(user)
    }

    /// Replace the password of an existing user.
    pub async fn set_password(&self, username: &Username, password: &Password) -> Result<(), Error> {
        let hash = self.hash(password).await?;
        let updated = self
            .users
            .update_password_hash(username, &hash)
            .await
            .map_err(map_user_error)?;
        if !updated {
            return Err(Error::not_found("User not found"));
        }
        info!(username = %username, "password replaced");
        Ok(())
    }

    /// Check `password` against the user's stored hash.
    pub async fn verify_password(&self, user: &User, password: &Password) -> Result<bool, Error> {
        self.verify_hash(password, user.password_hash().clone()).await
    }

    /// Spend one verification on a hash no password matches.
    ///
    /// Call this when the username is unknown so the rejection costs the same
    /// as a wrong password.
    pub async fn verify_unknown_user(&self, password: &Password) -> Result<(), Error> {
        self.verify_hash(password, PasswordHash::new(UNKNOWN_USER_HASH))
            .await
            .map(|_| ())
    }

    async fn verify_hash(&self, password: &Password, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    /// Look up a user by name.
    pub async fn find_user_by_username(&self, username: &Username) -> Result<User, Error> {
        let user = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_error)?;
        user.ok_or_else(|| {
            debug!(username = %username, "unknown username");
            Error::not_found("User not found")
        })
    }
}
