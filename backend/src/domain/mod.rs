//! Domain types and use-cases for the user resource.
//!
//! Purpose: hold the validation rules, error taxonomy and orchestration for
//! list/create/update, independent of HTTP and SQL.
//!
//! Public surface:
//! - `UserRecord`, `NewUser`, `StoredUser`, `PublicUser`, `UserId`: user shapes.
//! - `validation`: the rule table and its violation list.
//! - `Error`, `ErrorCode`: failure taxonomy mapped to statuses at the edge.
//! - `UserService`: the use-cases, driven by inbound adapters.
//! - `ports`: the `UserStore` port implemented by outbound adapters.

pub mod error;
pub mod ports;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, UniqueField};
pub use self::user::{NewUser, PublicUser, StoredUser, UserId, UserRecord};
pub use self::user_service::UserService;
pub use self::validation::{FieldViolation, ValidationErrors, ViolationCode};
