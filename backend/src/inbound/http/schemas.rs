//! OpenAPI schema definitions for domain types.
//!
//! `Error`, `ErrorCode` and `User` carry validation and serialisation rules
//! that should not depend on utoipa. This module registers external schemas
//! mirroring their wire form so handlers can reference them in responses.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The record store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Message shown to the visitor.
    #[schema(example = "Please fill in all fields")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "0f5c3b0e-8a0d-4a55-9a43-8f1f6f9a6a1e")]
    trace_id: Option<String>,
    /// Field-level detail such as `{"field":"email","code":"missing_field"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Member or administrator account as held by the record store.
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable account identifier.
    #[schema(example = "3")]
    id: String,
    /// Contact email.
    #[schema(example = "maria@example.com")]
    email: String,
    /// Display name.
    #[schema(example = "Maria Rodriguez")]
    name: String,
    /// `admin` or `user`.
    #[schema(example = "user")]
    role: String,
    /// Points available.
    points: u32,
    /// Points already redeemed.
    points_spent: u32,
    /// Whether the account may sign in.
    active: bool,
}
