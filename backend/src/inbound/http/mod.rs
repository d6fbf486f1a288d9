//! HTTP inbound adapter exposing the users REST endpoints.

pub mod cors;
pub mod error;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::{Scope, guard, web};

pub use error::ApiResult;

/// The `/api` scope with every users endpoint registered, plus `OPTIONS`
/// preflight answers on both paths.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(users::list_users)
        .service(users::create_user)
        .service(users::update_user)
        .service(
            web::resource(["/users", "/users/{id}"])
                .guard(guard::Options())
                .to(users::preflight),
        )
}
