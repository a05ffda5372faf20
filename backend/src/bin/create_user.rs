//! Provision or reset a registry user.
//!
//! The password is read from the first line of standard input so it never
//! appears in the process list or shell history:
//!
//! ```text
//! printf '%s\n' "$PASSWORD" | create-user --database-url postgres://... --username nurse
//! printf '%s\n' "$PASSWORD" | create-user --database-url postgres://... --username nurse --reset
//! ```

use std::io::BufRead;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use health_registry::domain::{CredentialStore, Password, Username};
use health_registry::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use health_registry::outbound::security::Argon2PasswordHasher;

/// Create a user account, or replace its password with `--reset`.
#[derive(Debug, Parser)]
#[command(name = "create-user", version)]
struct Args {
    /// PostgreSQL connection URL.
    #[arg(long, env = "HEALTH_REGISTRY_DATABASE_URL")]
    database_url: String,
    /// Account name.
    #[arg(long)]
    username: String,
    /// Replace the password of an existing account instead of creating one.
    #[arg(long)]
    reset: bool,
}

fn read_password(input: impl BufRead) -> Result<Password> {
    let mut line = Zeroizing::new(String::new());
    input
        .take(4096)
        .read_line(&mut line)
        .wrap_err("failed to read password from stdin")?;
    let trimmed = line.trim_end_matches(['\r', '\n']);
    Password::new(trimmed).map_err(|err| eyre!("invalid password: {err}"))
}

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let args = Args::parse();
    let username = Username::new(&args.username).map_err(|err| eyre!("invalid username: {err}"))?;
    let password = read_password(std::io::stdin().lock())?;

    let migration_url = args.database_url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("failed to apply migrations")?;

    let pool = DbPool::new(PoolConfig::new(args.database_url).with_max_size(1))
        .await
        .wrap_err("failed to open database pool")?;
    let credentials = CredentialStore::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
    );

    if args.reset {
        credentials
            .set_password(&username, &password)
            .await
            .wrap_err_with(|| format!("failed to reset password for {username}"))?;
        info!(%username, "password reset");
    } else {
        let user = credentials
            .provision_user(&username, &password)
            .await
            .wrap_err_with(|| format!("failed to create user {username}"))?;
        info!(username = %user.username(), id = user.id().as_i64(), "user created");
    }
    Ok(())
}
