//! Users API handlers.
//!
//! ```text
//! GET /api/users
//! POST /api/users {"email":"a@b.com","password":"longpass1","name":"Al"}
//! PUT /api/users/1 {"email":"a@b.com","password":"longpass1","name":"Alan"}
//! ```
//!
//! Create and update bodies may also be sent form-encoded. `OPTIONS` on either
//! path answers the CORS preflight.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{
    Either, FromRequest, HttpMessage, HttpRequest, HttpResponse, get, post, put, web,
};
use futures_util::future::{LocalBoxFuture, ready};

use crate::domain::{PublicUser, StoredUser, UserId, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ConflictBodySchema, PublicUserSchema, StoreErrorBodySchema, StoredUserSchema,
    UserRecordSchema, ValidationErrorBodySchema,
};
use crate::inbound::http::state::HttpState;

type EncodedRecord = Either<web::Json<UserRecord>, web::Form<UserRecord>>;

/// Create/update body, decoded from JSON or `application/x-www-form-urlencoded`.
///
/// A request with no body, or with any other content type, yields an empty
/// record, so validation reports every required field. A malformed JSON or
/// form body is still rejected with 400.
#[derive(Debug)]
pub struct UserBody(UserRecord);

impl UserBody {
    /// Unwrap the decoded record.
    pub fn into_inner(self) -> UserRecord {
        self.0
    }
}

fn declares_empty_body(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        == Some(0)
}

fn is_decodable(content_type: &str) -> bool {
    let essence = content_type.to_ascii_lowercase();
    essence == "application/json"
        || essence.ends_with("+json")
        || essence == "application/x-www-form-urlencoded"
}

impl FromRequest for UserBody {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if declares_empty_body(req) || !is_decodable(req.content_type()) {
            return Box::pin(ready(Ok(Self(UserRecord::default()))));
        }
        let decoding = EncodedRecord::from_request(req, payload);
        Box::pin(async move {
            match decoding.await.map_err(actix_web::Error::from)? {
                Either::Left(json) => Ok(Self(json.into_inner())),
                Either::Right(form) => Ok(Self(form.into_inner())),
            }
        })
    }
}

/// Absolute URL of the user resource: `http://<Host><request path>/<id>`.
///
/// The request path is used as-is, so on `PUT /api/users/1` the id segment
/// appears twice.
fn resource_location(req: &HttpRequest, id: UserId) -> String {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| req.connection_info().host().to_owned(), str::to_owned);
    format!("http://{host}{}/{id}", req.path())
}

fn located(req: &HttpRequest, user: &PublicUser) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::LOCATION, resource_location(req, user.id())))
        .json(user)
}

/// List every stored user, password included.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All user rows", body = [StoredUserSchema]),
        (status = 500, description = "Store failure", body = StoreErrorBodySchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<StoredUser>>> {
    let users = state.users.list().await?;
    Ok(web::Json(users))
}

/// Validate and store a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body(
        description = "New field values. An absent body is validated as empty",
        content(
            (UserRecordSchema = "application/json"),
            (UserRecordSchema = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Created user", body = PublicUserSchema,
            headers(("Location" = String, description = "URL of the created user"))),
        (status = 400, description = "Malformed JSON or form body"),
        (status = 409, description = "Email already taken", body = ConflictBodySchema),
        (status = 422, description = "Validation failed", body = ValidationErrorBodySchema),
        (status = 500, description = "Store failure", body = StoreErrorBodySchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    body: UserBody,
) -> ApiResult<HttpResponse> {
    let user = state.users.create(body.into_inner()).await?;
    Ok(located(&req, &user))
}

/// Validate and overwrite an existing user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body(
        description = "New field values. An absent body is validated as empty",
        content(
            (UserRecordSchema = "application/json"),
            (UserRecordSchema = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Updated user", body = PublicUserSchema,
            headers(("Location" = String, description = "Request path followed by the user id"))),
        (status = 400, description = "Malformed JSON or form body"),
        (status = 404, description = "Identifier is not an integer"),
        (status = 422, description = "Validation failed", body = ValidationErrorBodySchema),
        (status = 500, description = "Store failure", body = StoreErrorBodySchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    body: UserBody,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    let user = state.users.update(id, body.into_inner()).await?;
    Ok(located(&req, &user))
}

/// Answer a CORS preflight. The allow headers come from the CORS middleware.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}
