//! Translation of pool and Diesel failures into [`UserStoreError`].

use diesel::pg::{Pg, PgQueryBuilder};
use diesel::query_builder::{QueryBuilder, QueryFragment};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserStoreError;

use super::pool::PoolError;

/// Render a statement as sent to the server, placeholders in place of bound
/// values.
pub(super) fn statement_text<Q>(query: &Q) -> String
where
    Q: QueryFragment<Pg>,
{
    let mut builder = PgQueryBuilder::default();
    match query.to_sql(&mut builder, &Pg) {
        Ok(()) => builder.finish(),
        Err(error) => {
            debug!(%error, "failed to render statement text");
            String::new()
        }
    }
}

pub(super) fn map_pool_error(error: PoolError) -> UserStoreError {
    UserStoreError::connection(error.message())
}

/// Map a Diesel failure of the statement `sql`.
///
/// Only `UniqueViolation` is singled out; every other server error keeps its
/// message and statement text.
pub(super) fn map_diesel_error(error: DieselError, sql: String) -> UserStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserStoreError::unique_violation(info.message(), sql)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserStoreError::connection(info.message())
        }
        DieselError::DatabaseError(_, info) => UserStoreError::statement(info.message(), sql),
        other => UserStoreError::statement(other.to_string(), sql),
    }
}
