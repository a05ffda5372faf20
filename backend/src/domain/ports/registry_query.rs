//! Driving port for registry reads.

use async_trait::async_trait;

use crate::domain::{Client, ClientId, ClientProfile, Error, Program};

/// Domain use-case port for registry lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistryQuery: Send + Sync {
    /// All programs ordered by identifier.
    async fn list_programs(&self) -> Result<Vec<Program>, Error>;

    /// Clients whose name contains `query`, ignoring case.
    ///
    /// A blank query yields no clients at all.
    async fn search_clients(&self, query: &str) -> Result<Vec<Client>, Error>;

    /// A single client, or not-found.
    async fn get_client(&self, id: ClientId) -> Result<Client, Error>;

    /// A client with the names of the programs it is enrolled in.
    async fn get_client_profile(&self, id: ClientId) -> Result<ClientProfile, Error>;
}
