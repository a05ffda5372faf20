//! Port abstraction for client persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, ClientProfile, NewClient};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by client repository adapters.
    pub enum ClientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "client repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "client repository query failed: {message}",
    }
}

/// Storage for registered clients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Store a new client and return it with its assigned identifier.
    async fn insert(&self, client: &NewClient) -> Result<Client, ClientRepositoryError>;

    /// Fetch a client by identifier.
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, ClientRepositoryError>;

    /// Fetch a client and the names of its programs in one consistent read.
    async fn find_profile(
        &self,
        id: ClientId,
    ) -> Result<Option<ClientProfile>, ClientRepositoryError>;

    /// Case-insensitive substring match on client names.
    ///
    /// `fragment` is never empty; callers short-circuit blank queries.
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Client>, ClientRepositoryError>;
}
