//! Pergamino loyalty console library.
//!
//! The domain layer owns accounts, sessions, the route guard and screen
//! models; inbound HTTP adapters expose them and the in-memory outbound
//! adapter serves the seeded records.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
