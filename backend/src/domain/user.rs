//! User data model.
//!
//! Three shapes of the same resource travel through the service:
//!
//! - [`UserRecord`]: the inbound body as the client sent it, every field
//!   optional and unknown fields retained.
//! - [`NewUser`]: a record that passed the validation rule table.
//! - [`StoredUser`]: a row as the store returns it, password included.
//!
//! [`PublicUser`] is the password-free projection returned by create and
//! update.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Store-generated user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Inbound user body for create and update requests.
///
/// Accepted as JSON or `application/x-www-form-urlencoded`. Fields the rule
/// table does not know about are kept in `extra` and travel with the record
/// to the store.
///
/// # Examples
/// ```
/// use users_api::domain::UserRecord;
///
/// let record: UserRecord =
///     serde_json::from_str(r#"{"email":"a@b.com","nickname":"al"}"#).unwrap();
/// assert_eq!(record.email.as_deref(), Some("a@b.com"));
/// assert!(record.password.is_none());
/// assert!(record.extra.contains_key("nickname"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Submitted email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Submitted password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Submitted name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Any other submitted fields, untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A user record that satisfied every validation rule.
///
/// Only [`crate::domain::validation::validate`] builds values of this type.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    email: String,
    password: String,
    name: String,
    extra: BTreeMap<String, Value>,
}

impl NewUser {
    pub(crate) const fn from_parts(
        email: String,
        password: String,
        name: String,
        extra: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            email,
            password,
            name,
            extra,
        }
    }

    /// Validated email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Validated password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Validated name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of submitted fields that are not user columns.
    pub fn extra_fields(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }
}

/// A user row as held by the store.
///
/// Serialises every column, password included; the list endpoint returns
/// rows in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    id: UserId,
    email: String,
    password: String,
    name: String,
}

impl StoredUser {
    /// Build a row from its columns.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    /// Store-generated identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Stored password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drop the password, producing the shape returned to clients.
    ///
    /// # Examples
    /// ```
    /// use users_api::domain::{StoredUser, UserId};
    ///
    /// let public = StoredUser::new(UserId::new(1), "a@b.com", "longpass1", "Al").into_public();
    /// let json = serde_json::to_value(&public).unwrap();
    /// assert!(json.get("password").is_none());
    /// ```
    pub fn into_public(self) -> PublicUser {
        let Self {
            id, email, name, ..
        } = self;
        PublicUser { id, email, name }
    }
}

/// Client-facing view of a user: every column except the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    id: UserId,
    email: String,
    name: String,
}

impl PublicUser {
    /// Store-generated identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<StoredUser> for PublicUser {
    fn from(value: StoredUser) -> Self {
        value.into_public()
    }
}
