//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while turning each variant into
//! the status code and JSON body clients rely on:
//!
//! ```text
//! Validation -> 422 {"errors": [...]}
//! Conflict   -> 409 {"error": "Email already exists"}
//! Store      -> 500 {"error": "<message>", "sql": "<statement>"}
//! ```

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;

use crate::domain::{Error, ErrorCode, FieldViolation};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct ViolationsBody<'a> {
    errors: &'a [FieldViolation],
}

#[derive(Serialize)]
struct MessageBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sql: Option<&'a str>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        match self {
            Self::Validation(errors) => builder.json(ViolationsBody {
                errors: errors.violations(),
            }),
            Self::Conflict { .. } => builder.json(MessageBody {
                error: &self.to_string(),
                sql: None,
            }),
            Self::Store { message, sql } => builder.json(MessageBody {
                error: message,
                sql: sql.as_deref(),
            }),
        }
    }
}
