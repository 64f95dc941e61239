//! HTTP inbound adapter: screen routes, JSON actions and health probes.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod profile;
pub mod schemas;
pub mod screens;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every JSON action on the `/api/v1` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        .service(auth::current_session)
        .service(admin::member_detail)
        .service(admin::create_admin)
        .service(admin::update_admin)
        .service(admin::deactivate_admin)
        .service(profile::update_profile)
        .service(profile::change_password);
}
