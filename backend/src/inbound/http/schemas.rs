//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and live in the inbound
//! adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::StoredUser`], as returned by the list
/// endpoint.
#[derive(ToSchema)]
#[schema(as = crate::domain::StoredUser)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StoredUserSchema {
    /// Store-generated identifier.
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "a@b.com")]
    email: String,
    /// Stored password, returned verbatim by the list endpoint.
    #[schema(example = "longpass1")]
    password: String,
    #[schema(example = "Al")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::PublicUser`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PublicUser)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PublicUserSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "a@b.com")]
    email: String,
    #[schema(example = "Al")]
    name: String,
}

/// OpenAPI schema for [`crate::domain::UserRecord`], the create/update body.
#[derive(ToSchema)]
#[schema(as = crate::domain::UserRecord)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserRecordSchema {
    /// Must be a valid email address.
    #[schema(example = "a@b.com")]
    email: String,
    /// At least 8 characters.
    #[schema(example = "longpass1", min_length = 8)]
    password: String,
    /// At least 2 characters.
    #[schema(example = "Al", min_length = 2)]
    name: String,
}

/// OpenAPI schema for [`crate::domain::ViolationCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ViolationCode)]
pub enum ViolationCodeSchema {
    /// `email` is not a valid address.
    #[schema(rename = "invalid_email")]
    InvalidEmail,
    /// `password` is shorter than 8 characters.
    #[schema(rename = "password_too_short")]
    PasswordTooShort,
    /// `name` is shorter than 2 characters.
    #[schema(rename = "name_too_short")]
    NameTooShort,
}

/// OpenAPI schema for [`crate::domain::FieldViolation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::FieldViolation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldViolationSchema {
    #[schema(example = "email")]
    field: String,
    code: ViolationCodeSchema,
    #[schema(example = "must be a valid email address")]
    message: String,
    #[schema(example = "body")]
    location: String,
    /// Submitted value; absent when the field was not sent.
    #[schema(example = "bad")]
    value: Option<String>,
}

/// Body of a 422 response.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ValidationErrorBodySchema {
    errors: Vec<FieldViolationSchema>,
}

/// Body of a 409 response.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ConflictBodySchema {
    #[schema(example = "Email already exists")]
    error: String,
}

/// Body of a 500 response.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct StoreErrorBodySchema {
    /// Message reported by the store.
    #[schema(example = "relation \"users\" does not exist")]
    error: String,
    /// Statement that failed, when known.
    #[schema(example = "SELECT \"users\".\"id\" FROM \"users\"")]
    sql: Option<String>,
}
