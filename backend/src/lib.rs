//! Users API library: domain rules, HTTP and persistence adapters.
//!
//! The binary in `main.rs` wires these together; integration tests drive the
//! same pieces with the in-memory store from [`test_support`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
