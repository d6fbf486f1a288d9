//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the three users endpoints and the schema wrappers
//! from [`crate::inbound::http::schemas`]. The document backs Swagger UI in
//! debug builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    ConflictBodySchema, FieldViolationSchema, PublicUserSchema, StoreErrorBodySchema,
    StoredUserSchema, UserRecordSchema, ValidationErrorBodySchema, ViolationCodeSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "List, create and update user records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
    ),
    components(schemas(
        StoredUserSchema,
        PublicUserSchema,
        UserRecordSchema,
        ViolationCodeSchema,
        FieldViolationSchema,
        ValidationErrorBodySchema,
        ConflictBodySchema,
        StoreErrorBodySchema,
    )),
    tags(
        (name = "users", description = "Operations on user records")
    )
)]
pub struct ApiDoc;
