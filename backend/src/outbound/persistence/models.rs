//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; they exist to satisfy
//! Diesel's type requirements for queries and mutations.

use diesel::prelude::*;

use crate::domain::{NewUser, StoredUser, UserId};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl From<UserRow> for StoredUser {
    fn from(row: UserRow) -> Self {
        Self::new(UserId::new(row.id), row.email, row.password, row.name)
    }
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

/// Changeset overwriting every mutable column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email(),
            password: user.password(),
            name: user.name(),
        }
    }
}

impl<'a> From<&'a NewUser> for UserChangeset<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email(),
            password: user.password(),
            name: user.name(),
        }
    }
}
