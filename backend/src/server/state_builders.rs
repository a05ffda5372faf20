//! Builders wiring storage adapters into domain services and HTTP state.

use std::sync::Arc;

use tracing::{info, warn};

use health_registry::domain::ports::{
    ClientRepository, EnrollmentRepository, ProgramRepository, TokenService, UserRepository,
};
use health_registry::domain::{
    AccessGate, CredentialStore, ErrorCode, Password, RegistryService, TokenLoginService,
    Username,
};
use health_registry::inbound::http::state::HttpState;
use health_registry::outbound::memory::{InMemoryRegistry, InMemoryUserRepository};
use health_registry::outbound::persistence::{
    DbPool, DieselClientRepository, DieselEnrollmentRepository, DieselProgramRepository,
    DieselUserRepository,
};
use health_registry::outbound::security::Argon2PasswordHasher;

/// Storage backing the registry and credential store.
#[derive(Clone)]
pub enum Storage {
    Postgres(DbPool),
    Memory,
}

/// Account created at start-up when it does not exist yet.
pub struct BootstrapUser {
    pub username: Username,
    pub password: Password,
}

/// Build HTTP state over `storage`, provisioning `bootstrap` if given.
pub async fn build_http_state(
    storage: Storage,
    tokens: Arc<dyn TokenService>,
    bootstrap: Option<BootstrapUser>,
) -> std::io::Result<HttpState> {
    match storage {
        Storage::Postgres(pool) => {
            assemble(
                Arc::new(DieselClientRepository::new(pool.clone())),
                Arc::new(DieselProgramRepository::new(pool.clone())),
                Arc::new(DieselEnrollmentRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool)),
                tokens,
                bootstrap,
            )
            .await
        }
        Storage::Memory => {
            let store = Arc::new(InMemoryRegistry::new());
            assemble(
                store.clone(),
                store.clone(),
                store,
                Arc::new(InMemoryUserRepository::new()),
                tokens,
                bootstrap,
            )
            .await
        }
    }
}

async fn assemble<C, P, E, U>(
    clients: Arc<C>,
    programs: Arc<P>,
    enrollments: Arc<E>,
    users: Arc<U>,
    tokens: Arc<dyn TokenService>,
    bootstrap: Option<BootstrapUser>,
) -> std::io::Result<HttpState>
where
    C: ClientRepository + 'static,
    P: ProgramRepository + 'static,
    E: EnrollmentRepository + 'static,
    U: UserRepository + 'static,
{
    let registry = Arc::new(RegistryService::new(clients, programs, enrollments));
    let credentials = CredentialStore::new(users, Arc::new(Argon2PasswordHasher::new()));

    if let Some(user) = bootstrap {
        provision_bootstrap_user(&credentials, &user).await?;
    }

    let login = Arc::new(TokenLoginService::new(credentials, tokens.clone()));
    Ok(HttpState::from_registry(
        registry,
        login,
        AccessGate::new(tokens),
    ))
}

async fn provision_bootstrap_user<U>(
    credentials: &CredentialStore<U, Argon2PasswordHasher>,
    user: &BootstrapUser,
) -> std::io::Result<()>
where
    U: UserRepository,
{
    match credentials
        .provision_user(&user.username, &user.password)
        .await
    {
        Ok(_) => {
            info!(username = %user.username, "bootstrap user created");
            Ok(())
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            info!(username = %user.username, "bootstrap user already present");
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, "bootstrap user provisioning failed");
            Err(std::io::Error::other(format!(
                "bootstrap user provisioning failed: {err}"
            )))
        }
    }
}
