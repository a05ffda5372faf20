//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AccessGate;
use crate::domain::ports::{LoginService, RegistryCommand, RegistryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registry: Arc<dyn RegistryCommand>,
    pub registry_query: Arc<dyn RegistryQuery>,
    pub login: Arc<dyn LoginService>,
    pub gate: AccessGate,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        registry: Arc<dyn RegistryCommand>,
        registry_query: Arc<dyn RegistryQuery>,
        login: Arc<dyn LoginService>,
        gate: AccessGate,
    ) -> Self {
        Self {
            registry,
            registry_query,
            login,
            gate,
        }
    }

    /// Construct state from one service implementing both registry ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use health_registry::domain::{AccessGate, CredentialStore, RegistryService, TokenLoginService};
    /// use health_registry::inbound::http::state::HttpState;
    /// use health_registry::outbound::memory::{InMemoryRegistry, InMemoryUserRepository};
    /// use health_registry::outbound::security::{Argon2PasswordHasher, JwtTokenService};
    ///
    /// let store = Arc::new(InMemoryRegistry::new());
    /// let registry = Arc::new(RegistryService::new(store.clone(), store.clone(), store));
    /// let tokens = Arc::new(JwtTokenService::new(b"0123456789abcdef0123456789abcdef"));
    /// let credentials = CredentialStore::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(Argon2PasswordHasher::new()),
    /// );
    /// let login = Arc::new(TokenLoginService::new(credentials, tokens.clone()));
    /// let state = HttpState::from_registry(registry, login, AccessGate::new(tokens));
    /// let _query = state.registry_query.clone();
    /// ```
    pub fn from_registry<R>(
        registry: Arc<R>,
        login: Arc<dyn LoginService>,
        gate: AccessGate,
    ) -> Self
    where
        R: RegistryCommand + RegistryQuery + 'static,
    {
        Self::new(registry.clone(), registry, login, gate)
    }
}
