//! User resource use-cases: list, create, update.
//!
//! Each call validates before touching the store, performs one write, then
//! re-reads the row so the caller sees authoritative state. Write and
//! read-back are separate store calls with no transaction around them: if
//! the read-back fails the write stays committed and the caller receives a
//! store error.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::ports::{UserStore, UserStoreError};
use super::validation::validate;
use super::{Error, PublicUser, StoredUser, UniqueField, UserId, UserRecord};

/// Orchestrates validation, persistence and response shaping for users.
///
/// Cheap to clone; clones share the same store handle.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Return every stored row, password included.
    ///
    /// # Errors
    /// Returns [`Error::Store`] when the store query fails.
    pub async fn list(&self) -> Result<Vec<StoredUser>, Error> {
        self.store.list().await.map_err(store_failure)
    }

    /// Validate and insert a user, returning the stored row without its
    /// password.
    ///
    /// # Errors
    /// - [`Error::Validation`] when any rule fails; the store is not called.
    /// - [`Error::Conflict`] when the email is already taken.
    /// - [`Error::Store`] for any other insert failure or a failed read-back.
    pub async fn create(&self, record: UserRecord) -> Result<PublicUser, Error> {
        let user = validate(record)?;
        let id = self
            .store
            .insert(&user)
            .await
            .map_err(insert_failure)?;
        let created = self.read_back(id).await?;
        info!(user_id = %id, "user created");
        Ok(created)
    }

    /// Validate and overwrite the user with `id`, returning the refreshed row
    /// without its password.
    ///
    /// An `id` that matches no row is not detected by the write; the
    /// read-back then reports it as a store error.
    ///
    /// # Errors
    /// - [`Error::Validation`] when any rule fails; the store is not called.
    /// - [`Error::Store`] for any update or read-back failure, including a
    ///   duplicate email.
    pub async fn update(&self, id: UserId, record: UserRecord) -> Result<PublicUser, Error> {
        let user = validate(record)?;
        self.store
            .update(id, &user)
            .await
            .map_err(store_failure)?;
        let updated = self.read_back(id).await?;
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn read_back(&self, id: UserId) -> Result<PublicUser, Error> {
        match self.store.find_by_id(id).await {
            Ok(Some(user)) => Ok(user.into_public()),
            Ok(None) => {
                error!(user_id = %id, "user missing on read-back after write");
                Err(Error::store(format!("user {id} not found"), None))
            }
            Err(err) => {
                error!(user_id = %id, error = %err, "read-back failed after committed write");
                Err(store_failure(err))
            }
        }
    }
}

fn insert_failure(error: UserStoreError) -> Error {
    match error {
        UserStoreError::UniqueViolation { .. } => {
            warn!("rejected user with duplicate email");
            Error::conflict(UniqueField::Email)
        }
        other => store_failure(other),
    }
}

fn store_failure(error: UserStoreError) -> Error {
    let sql = error.sql().map(str::to_owned);
    Error::store(error.to_string(), sql)
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
