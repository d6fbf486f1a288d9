//! Permissive cross-origin headers attached to every response.

use actix_web::middleware::DefaultHeaders;

/// Any origin may call the API.
pub const ALLOW_ORIGIN: &str = "*";
/// Request headers browsers may send.
pub const ALLOW_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";
/// Methods advertised to browsers.
pub const ALLOW_METHODS: &str = "PUT, POST, GET, DELETE, OPTIONS";

/// Middleware adding the three `Access-Control-Allow-*` headers.
///
/// Applies to handler output, error responses and router 404s alike.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::cors::cors_headers;
///
/// let _app = App::new().wrap(cors_headers());
/// ```
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", ALLOW_ORIGIN))
        .add(("Access-Control-Allow-Headers", ALLOW_HEADERS))
        .add(("Access-Control-Allow-Methods", ALLOW_METHODS))
}
