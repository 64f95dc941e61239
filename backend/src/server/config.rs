//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};

use pergamino::inbound::http::session_config::{SESSION_TTL_DEFAULT_HOURS, SessionSettings};
use pergamino::settings::DEFAULT_PAGE_SIZE;

/// Everything `create_server` needs besides the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) ttl_hours: i64,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) page_size: usize,
    pub(crate) latency: Duration,
    pub(crate) records_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Configuration with default page size, no latency and bundled records.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            ttl_hours: SESSION_TTL_DEFAULT_HOURS,
            bind_addr,
            page_size: DEFAULT_PAGE_SIZE,
            latency: Duration::ZERO,
            records_path: None,
        }
    }

    /// Configuration from validated session settings.
    #[must_use]
    pub fn from_session(settings: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
            ttl_hours,
        } = settings;
        Self {
            ttl_hours,
            ..Self::new(key, cookie_secure, same_site, bind_addr)
        }
    }

    /// Rows per page on the management tables.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Delay applied by the demo login and registration services.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Seed file replacing the bundled records.
    #[must_use]
    pub fn with_records_path(mut self, path: Option<PathBuf>) -> Self {
        self.records_path = path;
        self
    }
}
