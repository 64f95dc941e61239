//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the console. It registers:
//!
//! - **Paths**: the JSON actions under `/api/v1`, the guarded screens and
//!   the health probes
//! - **Schemas**: request bodies, screen models and the domain type wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`], [`UserSchema`])
//! - **Security**: Session cookie authentication scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{
    AdminSummary, Dashboard, Identity, PointsOverview, ProfileForm, PurchaseCard, PurchaseHistory,
    PurchaseLine, TransactionEntry, TransactionList, TransactionTab, UserDetail,
};
use crate::inbound::http::admin::AdminRequest;
use crate::inbound::http::auth::{LoginRequest, RegisterRequest, SessionResponse};
use crate::inbound::http::profile::{PasswordRequest, ProfileRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, UserSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login or /api/v1/register.",
            ))),
        );
    }
}

/// OpenAPI document for the console.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Pergamino loyalty console API",
        description = "Session-gated screens and actions for members and administrators of the Pergamino loyalty programme.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::profile::update_profile,
        crate::inbound::http::profile::change_password,
        crate::inbound::http::admin::member_detail,
        crate::inbound::http::admin::create_admin,
        crate::inbound::http::admin::update_admin,
        crate::inbound::http::admin::deactivate_admin,
        crate::inbound::http::screens::login_screen,
        crate::inbound::http::screens::register_screen,
        crate::inbound::http::screens::dashboard_screen,
        crate::inbound::http::screens::purchases_screen,
        crate::inbound::http::screens::profile_screen,
        crate::inbound::http::screens::admin_screen,
        crate::inbound::http::screens::admin_users_screen,
        crate::inbound::http::screens::admin_admins_screen,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        ErrorSchema,
        ErrorCodeSchema,
        Identity,
        SessionResponse,
        LoginRequest,
        RegisterRequest,
        ProfileRequest,
        PasswordRequest,
        AdminRequest,
        AdminSummary,
        UserDetail,
        ProfileForm,
        Dashboard,
        PointsOverview,
        TransactionEntry,
        TransactionList,
        TransactionTab,
        PurchaseHistory,
        PurchaseCard,
        PurchaseLine,
    )),
    tags(
        (name = "session", description = "Sign-in, registration and the visitor's session"),
        (name = "screens", description = "Guarded navigation screens"),
        (name = "admin", description = "Member lookup and administrator management"),
        (name = "profile", description = "Profile and password changes for the signed-in visitor"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
