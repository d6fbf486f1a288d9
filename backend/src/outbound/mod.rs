//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed user store using Diesel.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business logic.

pub mod persistence;
