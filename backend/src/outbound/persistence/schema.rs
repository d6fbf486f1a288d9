//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the deployed table exactly; schema migration is out of scope
//! for this service. `diesel print-schema` against a live database produces
//! the same definition.

diesel::table! {
    /// User records.
    ///
    /// `email` carries a unique index; the store, not the service, enforces it.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        email -> Varchar,
        password -> Varchar,
        name -> Varchar,
    }
}
