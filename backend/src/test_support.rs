//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserStore, UserStoreError, reject_unknown_columns};
use crate::domain::{NewUser, StoredUser, UserId};

const INSERT_SQL: &str = "INSERT INTO users (email, password, name) VALUES ($1, $2, $3)";
const UPDATE_SQL: &str = "UPDATE users SET email = $1, password = $2, name = $3 WHERE id = $4";

/// [`UserStore`] keeping rows in memory.
///
/// Behaves like the `users` table: identifiers start at 1 and increase,
/// `email` is unique on insert and update, and fields that are not columns
/// are rejected.
///
/// # Examples
/// ```
/// use users_api::domain::ports::UserStore;
/// use users_api::test_support::InMemoryUserStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let store = InMemoryUserStore::default();
/// assert!(store.list().await.unwrap().is_empty());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: Mutex<Rows>,
}

#[derive(Debug, Default)]
struct Rows {
    last_id: i32,
    rows: Vec<StoredUser>,
}

impl InMemoryUserStore {
    /// Store pre-populated with the given rows.
    ///
    /// Later inserts continue from the highest existing identifier.
    pub fn with_rows(rows: impl IntoIterator<Item = StoredUser>) -> Self {
        let rows: Vec<StoredUser> = rows.into_iter().collect();
        let last_id = rows.iter().map(|row| row.id().get()).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Rows { last_id, rows }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Rows>, UserStoreError> {
        self.inner
            .lock()
            .map_err(|_| UserStoreError::connection("in-memory store lock poisoned"))
    }
}

fn duplicate_email(email: &str, sql: &str) -> UserStoreError {
    UserStoreError::unique_violation(
        format!("duplicate key value violates unique constraint \"users_email_key\": {email}"),
        sql,
    )
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<StoredUser>, UserStoreError> {
        Ok(self.lock()?.rows.clone())
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, UserStoreError> {
        reject_unknown_columns(user)?;
        let mut guard = self.lock()?;
        if guard.rows.iter().any(|row| row.email() == user.email()) {
            return Err(duplicate_email(user.email(), INSERT_SQL));
        }
        guard.last_id += 1;
        let id = UserId::new(guard.last_id);
        guard
            .rows
            .push(StoredUser::new(id, user.email(), user.password(), user.name()));
        Ok(id)
    }

    async fn update(&self, id: UserId, user: &NewUser) -> Result<(), UserStoreError> {
        reject_unknown_columns(user)?;
        let mut guard = self.lock()?;
        if guard
            .rows
            .iter()
            .any(|row| row.id() != id && row.email() == user.email())
        {
            return Err(duplicate_email(user.email(), UPDATE_SQL));
        }
        if let Some(row) = guard.rows.iter_mut().find(|row| row.id() == id) {
            *row = StoredUser::new(id, user.email(), user.password(), user.name());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserStoreError> {
        Ok(self.lock()?.rows.iter().find(|row| row.id() == id).cloned())
    }
}
