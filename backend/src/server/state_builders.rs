//! Builders wiring the record store and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use pergamino::domain::ports::{FixtureLoginService, FixtureRegistrationService};
use pergamino::domain::{AccountService, LoyaltyService, SeedDataError, SeedRecords};
use pergamino::inbound::http::state::{HttpState, HttpStatePorts};
use pergamino::outbound::memory::InMemoryRecordStore;

use super::ServerConfig;

/// Load seed records from the configured file or the bundled fixture.
pub(super) fn load_records(config: &ServerConfig) -> Result<SeedRecords, SeedDataError> {
    match &config.records_path {
        Some(path) => {
            info!(path = %path.display(), "loading seed records from file");
            SeedRecords::from_file(path)
        }
        None => SeedRecords::bundled(),
    }
}

/// Build handler state over an in-memory store seeded with `records`.
pub(super) fn build_http_state(config: &ServerConfig, records: SeedRecords) -> web::Data<HttpState> {
    let store = Arc::new(InMemoryRecordStore::from_seed(records));
    let accounts = Arc::new(AccountService::new(store.clone()));
    let ports = HttpStatePorts {
        login: Arc::new(FixtureLoginService::with_latency(config.latency)),
        registration: Arc::new(FixtureRegistrationService::with_latency(config.latency)),
        users: accounts.clone(),
        admins: accounts.clone(),
        profile: accounts,
        loyalty: Arc::new(LoyaltyService::new(store)),
    };
    web::Data::new(HttpState::new(ports).with_page_size(config.page_size))
}
