//! Server entry-point: loads settings, opens storage, serves the registry.

mod server;

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use health_registry::domain::ports::TokenService;
use health_registry::domain::{Password, Username};
use health_registry::inbound::http::health::HealthState;
use health_registry::outbound::persistence::{DbPool, run_pending_migrations};
use health_registry::outbound::security::JwtTokenService;
use ortho_config::OrthoConfig;

use server::{BootstrapUser, ServerSettings, Storage, build_http_state, create_server, load_token_secret};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn open_storage(settings: &ServerSettings) -> std::io::Result<Storage> {
    let Some(url) = settings.database_url.clone() else {
        warn!("no database URL configured; using the in-memory store");
        return Ok(Storage::Memory);
    };

    let migration_url = url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(|err| std::io::Error::other(format!("migrations failed: {err}")))?;
    info!(applied, "database migrations applied");

    let pool = DbPool::new(settings.pool_config(url))
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    Ok(Storage::Postgres(pool))
}

fn bootstrap_user(settings: &ServerSettings) -> std::io::Result<Option<BootstrapUser>> {
    let Some((username, password)) = settings.bootstrap_credentials() else {
        return Ok(None);
    };
    let invalid = |err: health_registry::domain::LoginValidationError| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("bootstrap user: {err}"))
    };
    Ok(Some(BootstrapUser {
        username: Username::new(username).map_err(invalid)?,
        password: Password::new(password).map_err(invalid)?,
    }))
}

fn token_service(settings: &ServerSettings) -> std::io::Result<Arc<dyn TokenService>> {
    let secret = load_token_secret(&settings.token_secret_file(), settings.allow_ephemeral_secret)?;
    let service = JwtTokenService::new(&secret);
    let service = match settings.token_ttl() {
        Some(ttl) => service.with_ttl(ttl),
        None => {
            warn!("token lifetime not configured; issued tokens never expire");
            service
        }
    };
    Ok(Arc::new(service))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load configuration: {err}")))?;
    let bind_addr = settings.bind_addr()?;
    let tokens = token_service(&settings)?;
    let storage = open_storage(&settings).await?;
    let http_state = build_http_state(storage, tokens, bootstrap_user(&settings)?).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, bind_addr)?;
    info!(%bind_addr, "health registry listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
