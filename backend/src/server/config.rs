//! Server settings loaded via OrthoConfig and the server configuration
//! object built from them.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use users_api::domain::ports::UserStore;
use users_api::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Settings read from `USERS_API_*` environment variables (a `.env` file is
/// loaded into the environment first) and command-line overrides.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection URL. Required.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to 8080.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Pool configuration for the configured database.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when no database URL is set.
    pub fn pool_config(&self) -> io::Result<PoolConfig> {
        let url = self.database_url.as_deref().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "USERS_API_DATABASE_URL must be set",
            )
        })?;
        let timeout = self
            .pool_timeout_secs
            .map_or(PoolConfig::DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs);
        Ok(PoolConfig::new(url)
            .with_max_size(self.pool_max_size.unwrap_or(PoolConfig::DEFAULT_MAX_SIZE))
            .with_connection_timeout(timeout))
    }
}

/// Everything [`super::create_server`] needs.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) store: Arc<dyn UserStore>,
}

impl ServerConfig {
    /// Serve `store` on the address from `settings`.
    #[must_use]
    pub fn new(settings: &ServerSettings, store: Arc<dyn UserStore>) -> Self {
        Self {
            bind_addr: (settings.host().to_owned(), settings.port()),
            store,
        }
    }
}
