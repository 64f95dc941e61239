//! Console configuration loaded via OrthoConfig.
//!
//! Values come from `PERGAMINO_*` environment variables, an optional config
//! file and command-line flags, with the defaults below filling the gaps.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Rows per page on the management tables.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Configuration values for the HTTP console.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PERGAMINO")]
pub struct PergaminoSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Rows per page on the user and administrator tables.
    pub page_size: Option<usize>,
    /// Artificial delay applied to login and registration.
    #[ortho_config(default = 0)]
    pub simulated_latency_ms: u64,
    /// Seed file replacing the bundled records.
    pub records_path: Option<PathBuf>,
}

impl PergaminoSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns the parse error when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured page size; zero falls back to the default.
    pub fn page_size(&self) -> usize {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Latency applied by the demo login and registration services.
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for console configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "PERGAMINO_BIND_ADDR",
        "PERGAMINO_PAGE_SIZE",
        "PERGAMINO_SIMULATED_LATENCY_MS",
        "PERGAMINO_RECORDS_PATH",
    ];

    fn load_from_empty_args() -> PergaminoSettings {
        PergaminoSettings::load_from_iter([OsString::from("pergamino")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(settings.simulated_latency(), Duration::ZERO);
        assert!(settings.records_path.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PERGAMINO_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("PERGAMINO_PAGE_SIZE", Some("10".to_owned())),
            ("PERGAMINO_SIMULATED_LATENCY_MS", Some("1000".to_owned())),
            ("PERGAMINO_RECORDS_PATH", Some("/tmp/records.json".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.page_size(), 10);
        assert_eq!(settings.simulated_latency(), Duration::from_secs(1));
        assert_eq!(settings.records_path, Some(PathBuf::from("/tmp/records.json")));
    }

    #[rstest]
    #[case(Some(0), DEFAULT_PAGE_SIZE)]
    #[case(None, DEFAULT_PAGE_SIZE)]
    #[case(Some(3), 3)]
    fn page_size_never_collapses_to_zero(#[case] configured: Option<usize>, #[case] expected: usize) {
        let settings = PergaminoSettings {
            page_size: configured,
            ..PergaminoSettings::default()
        };
        assert_eq!(settings.page_size(), expected);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = PergaminoSettings {
            bind_addr: Some("not-an-address".to_owned()),
            ..PergaminoSettings::default()
        };
        assert!(settings.bind_addr().is_err());
    }
}
