//! Health program registry: clients, programs, enrollments and token-guarded
//! API access.
//!
//! The crate is organised hexagonally. [`domain`] holds entities, services
//! and port traits; [`inbound`] exposes them over HTTP; [`outbound`] provides
//! PostgreSQL, in-memory and cryptographic adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
