//! Server settings loaded via OrthoConfig, plus token secret resolution.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use health_registry::outbound::persistence::PoolConfig;
use ortho_config::OrthoConfig;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SECRET_FILE: &str = "/var/run/secrets/token_secret";
/// Shortest HS256 secret accepted from disk.
pub(crate) const MIN_SECRET_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;

/// Settings for the HTTP server, from CLI flags, `HEALTH_REGISTRY_*`
/// environment variables or a configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HEALTH_REGISTRY")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Seconds a request waits for a pooled connection before failing.
    #[ortho_config(default = 30)]
    pub db_connect_timeout_seconds: u64,
    /// File holding the HS256 signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// Permit a random per-process secret when the file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Token lifetime in seconds. Tokens never expire when unset.
    pub token_ttl_seconds: Option<u64>,
    /// Account provisioned at start-up when missing.
    pub bootstrap_username: Option<String>,
    /// Password for the bootstrap account.
    pub bootstrap_password: Option<String>,
}

impl ServerSettings {
    /// Address the listener binds to.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self, database_url: impl Into<String>) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.db_max_connections)
            .with_connection_timeout(Duration::from_secs(self.db_connect_timeout_seconds))
    }

    /// Path of the signing secret.
    pub fn token_secret_file(&self) -> PathBuf {
        self.token_secret_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SECRET_FILE))
    }

    /// Configured token lifetime.
    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl_seconds.map(Duration::from_secs)
    }

    /// Bootstrap credentials when both halves are configured.
    pub fn bootstrap_credentials(&self) -> Option<(&str, &str)> {
        match (&self.bootstrap_username, &self.bootstrap_password) {
            (Some(username), Some(password)) => Some((username.as_str(), password.as_str())),
            (Some(_), None) | (None, Some(_)) => {
                warn!("bootstrap user ignored: username and password must both be set");
                None
            }
            (None, None) => None,
        }
    }
}

/// Read the signing secret from `path`.
///
/// Falls back to a random secret when the file cannot be read and either
/// `allow_ephemeral` is set or this is a debug build. Tokens signed with an
/// ephemeral secret stop verifying after a restart.
pub fn load_token_secret(path: &Path, allow_ephemeral: bool) -> std::io::Result<Zeroizing<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            if bytes.len() < MIN_SECRET_LEN {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "token secret at {} must be at least {MIN_SECRET_LEN} bytes",
                        path.display()
                    ),
                ));
            }
            Ok(bytes)
        }
        Err(err) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %path.display(), error = %err, "using ephemeral token secret (dev only)");
            let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_LEN]);
            OsRng.fill_bytes(secret.as_mut_slice());
            Ok(secret)
        }
        Err(err) => Err(std::io::Error::new(
            err.kind(),
            format!("failed to read token secret at {}: {err}", path.display()),
        )),
    }
}
