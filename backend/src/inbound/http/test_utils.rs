//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{FixtureLoginService, FixtureRegistrationService};
use crate::domain::{AccountService, LoyaltyService, SeedRecords};
use crate::outbound::memory::InMemoryRecordStore;

use super::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over a freshly seeded in-memory store.
pub fn fixture_state() -> HttpState {
    let records = SeedRecords::bundled().expect("bundled fixture");
    let store = Arc::new(InMemoryRecordStore::from_seed(records));
    let accounts = Arc::new(AccountService::new(store.clone()));
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService::default()),
        registration: Arc::new(FixtureRegistrationService::default()),
        users: accounts.clone(),
        admins: accounts.clone(),
        profile: accounts,
        loyalty: Arc::new(LoyaltyService::new(store)),
    })
}
