//! PostgreSQL-backed [`UserStore`] implementation using Diesel.
//!
//! Each port call checks out one pooled connection and runs one statement.
//! The rendered statement text travels with any failure so the HTTP layer
//! can report it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserStore, UserStoreError, reject_unknown_columns};
use crate::domain::{NewUser, StoredUser, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, statement_text};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a store over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn list(&self) -> Result<Vec<StoredUser>, UserStoreError> {
        let query = users::table.select(UserRow::as_select());
        let sql = statement_text(&query);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, sql))?;
        Ok(rows.into_iter().map(StoredUser::from).collect())
    }

    async fn insert(&self, user: &NewUser) -> Result<UserId, UserStoreError> {
        reject_unknown_columns(user)?;
        let query = diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .returning(users::id);
        let sql = statement_text(&query);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i32 = query
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, sql))?;
        Ok(UserId::new(id))
    }

    async fn update(&self, id: UserId, user: &NewUser) -> Result<(), UserStoreError> {
        reject_unknown_columns(user)?;
        let query = diesel::update(users::table.find(id.get())).set(UserChangeset::from(user));
        let sql = statement_text(&query);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        query
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, sql))?;
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserStoreError> {
        let query = users::table
            .find(id.get())
            .select(UserRow::as_select());
        let sql = statement_text(&query);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = query
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, sql))?;
        Ok(row.map(StoredUser::from))
    }
}
