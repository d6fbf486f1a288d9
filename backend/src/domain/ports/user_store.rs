//! Port abstraction for the user store and its errors.
//!
//! The store is the only owner of user state. Adapters execute one
//! parameterised statement per call and report failures as
//! [`UserStoreError`], keeping the statement text for diagnostics.

use async_trait::async_trait;

use crate::domain::{NewUser, StoredUser, UserId};

/// Failures raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// No connection to the store could be obtained.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Driver or pool message.
        message: String,
    },
    /// A unique index rejected the statement.
    #[error("{message}")]
    UniqueViolation {
        /// Store-provided message.
        message: String,
        /// Statement that was rejected.
        sql: String,
    },
    /// Any other statement failure.
    #[error("{message}")]
    Statement {
        /// Store-provided message.
        message: String,
        /// Statement that failed.
        sql: String,
    },
    /// The record names a field the users table has no column for.
    #[error("unknown column '{column}' in users")]
    UnknownColumn {
        /// Offending field name.
        column: String,
    },
}

impl UserStoreError {
    /// Build a [`UserStoreError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Build a [`UserStoreError::UniqueViolation`].
    pub fn unique_violation(message: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::UniqueViolation {
            message: message.into(),
            sql: sql.into(),
        }
    }

    /// Build a [`UserStoreError::Statement`].
    pub fn statement(message: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
            sql: sql.into(),
        }
    }

    /// Build a [`UserStoreError::UnknownColumn`].
    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    /// Statement text attached to the failure, if any.
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::UniqueViolation { sql, .. } | Self::Statement { sql, .. } => Some(sql),
            Self::Connection { .. } | Self::UnknownColumn { .. } => None,
        }
    }
}

/// Reject records carrying fields that are not user columns.
///
/// # Errors
/// Returns [`UserStoreError::UnknownColumn`] naming the first extra field.
pub fn reject_unknown_columns(user: &NewUser) -> Result<(), UserStoreError> {
    match user.extra_fields().next() {
        Some(column) => Err(UserStoreError::unknown_column(column)),
        None => Ok(()),
    }
}

/// Storage for user rows.
///
/// Calls are independent; adapters must not wrap several calls in one
/// transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Return every row in store order.
    async fn list(&self) -> Result<Vec<StoredUser>, UserStoreError>;

    /// Insert a row and return its generated identifier.
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserStoreError>;

    /// Overwrite every column of the row with `id`.
    ///
    /// Matching no row is not an error.
    async fn update(&self, id: UserId, user: &NewUser) -> Result<(), UserStoreError>;

    /// Fetch one row by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;
    use crate::domain::validation::validate;
    use rstest::rstest;
    use serde_json::json;

    fn new_user(extra: &[(&str, serde_json::Value)]) -> NewUser {
        let mut record = UserRecord {
            email: Some("a@b.com".to_owned()),
            password: Some("longpass1".to_owned()),
            name: Some("Al".to_owned()),
            ..UserRecord::default()
        };
        for (key, value) in extra {
            record.extra.insert((*key).to_owned(), value.clone());
        }
        validate(record).expect("valid user")
    }

    #[rstest]
    fn sql_is_exposed_for_statement_failures() {
        let unique = UserStoreError::unique_violation("duplicate key", "INSERT ...");
        let statement = UserStoreError::statement("syntax error", "SELECT ...");
        assert_eq!(unique.sql(), Some("INSERT ..."));
        assert_eq!(statement.sql(), Some("SELECT ..."));
        assert_eq!(UserStoreError::connection("refused").sql(), None);
        assert_eq!(UserStoreError::unknown_column("role").sql(), None);
    }

    #[rstest]
    fn messages_pass_through_verbatim() {
        let err = UserStoreError::statement("value too long for type character varying(255)", "x");
        assert_eq!(
            err.to_string(),
            "value too long for type character varying(255)"
        );
    }

    #[rstest]
    fn known_columns_only_are_accepted() {
        assert_eq!(reject_unknown_columns(&new_user(&[])), Ok(()));
    }

    #[rstest]
    fn extra_fields_are_rejected_by_name() {
        let user = new_user(&[("role", json!("admin"))]);
        let err = reject_unknown_columns(&user).expect_err("role is not a column");
        assert_eq!(err, UserStoreError::unknown_column("role"));
        assert_eq!(err.to_string(), "unknown column 'role' in users");
    }
}
