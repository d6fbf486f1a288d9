//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps each variant to
//! a status code and response body; nothing here knows about HTTP.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// One or more fields failed validation.
    ValidationFailed,
    /// A unique column already holds the submitted value.
    Conflict,
    /// The store rejected or failed a statement.
    StoreFailure,
}

/// Column whose uniqueness the store enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
    /// `users.email`
    Email,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("Email"),
        }
    }
}

/// Failure of a user operation.
///
/// # Examples
/// ```
/// use users_api::domain::{Error, ErrorCode, UniqueField};
///
/// let err = Error::conflict(UniqueField::Email);
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// assert_eq!(err.to_string(), "Email already exists");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The inbound record broke at least one rule; the store was not touched.
    #[error("request failed validation: {0}")]
    Validation(#[from] ValidationErrors),
    /// The submitted value of a unique column is already taken.
    #[error("{field} already exists")]
    Conflict {
        /// Column that clashed.
        field: UniqueField,
    },
    /// The store failed; message and statement are passed through verbatim.
    #[error("{message}")]
    Store {
        /// Store-provided message.
        message: String,
        /// Statement that failed, when known.
        sql: Option<String>,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Conflict`].
    pub const fn conflict(field: UniqueField) -> Self {
        Self::Conflict { field }
    }

    /// Convenience constructor for [`Error::Store`].
    pub fn store(message: impl Into<String>, sql: Option<String>) -> Self {
        Self::Store {
            message: message.into(),
            sql,
        }
    }

    /// Stable machine-readable error code.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::Store { .. } => ErrorCode::StoreFailure,
        }
    }
}
