//! Port for issuing and verifying signed bearer tokens.

use crate::domain::{BearerToken, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenServiceError {
        /// The token is malformed, unsigned, expired or signed with another key.
        Invalid { message: String } => "token rejected: {message}",
        /// Signing failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signs and verifies tokens carrying a username claim.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Produce a signed token binding `username`.
    fn issue(&self, username: &Username) -> Result<BearerToken, TokenServiceError>;

    /// Check the signature and return the embedded username.
    fn verify(&self, token: &str) -> Result<Username, TokenServiceError>;
}
