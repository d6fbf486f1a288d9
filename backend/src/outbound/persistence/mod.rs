//! PostgreSQL persistence adapter using Diesel.
//!
//! Implements the domain [`UserStore`](crate::domain::ports::UserStore) port
//! with `diesel-async` over a `bb8` pool. Row structs (`models`) and the
//! table definition (`schema`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use users_api::outbound::persistence::{DbPool, DieselUserStore, PoolConfig};
//!
//! # async fn build() -> Result<DieselUserStore, users_api::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! Ok(DieselUserStore::new(pool))
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_user_store;
mod models;
mod pool;
mod schema;

pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};
