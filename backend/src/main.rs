//! Console entry-point: loads configuration, seeds the record store and
//! serves the guarded screens, JSON actions and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use pergamino::inbound::http::health::HealthState;
use pergamino::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use pergamino::settings::PergaminoSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = PergaminoSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load configuration: {err}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

    let session = session_settings_from_env(&mockable::DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        ttl_hours = session.ttl_hours,
        "session key loaded"
    );

    let config = ServerConfig::from_session(session, bind_addr)
        .with_page_size(settings.page_size())
        .with_latency(settings.simulated_latency())
        .with_records_path(settings.records_path.clone());

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, page_size = settings.page_size(), "starting console");
    create_server(health_state, config)?.await
}
