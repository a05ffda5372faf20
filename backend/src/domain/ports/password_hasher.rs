//! Port for deriving and checking salted password hashes.

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hash derivation failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be decoded.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted one-way password hashing.
///
/// Implementations are CPU bound; async callers move them off the reactor.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Derive a hash with a freshly generated salt.
    fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Recompute the hash with the stored salt and compare in constant time.
    fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
