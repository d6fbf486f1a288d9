//! Service entry-point: loads settings, builds the store pool and serves the
//! users API.

mod server;

use std::io;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use users_api::outbound::persistence::{DbPool, DieselUserStore};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    // Loaded first so `.env` may also set `RUST_LOG`.
    let dotenv = dotenvy::dotenv();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    if let Err(e) = dotenv
        && !e.not_found()
    {
        warn!(error = %e, "failed to load .env");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(e.to_string()))?;
    let pool = DbPool::new(settings.pool_config()?)
        .await
        .map_err(io::Error::other)?;
    let store = Arc::new(DieselUserStore::new(pool));

    create_server(ServerConfig::new(&settings, store))?.await
}
