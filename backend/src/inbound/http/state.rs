//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminCommand, LoginService, LoyaltyQuery, ProfileCommand, RegistrationService, UsersQuery,
};
use crate::settings::DEFAULT_PAGE_SIZE;

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub admins: Arc<dyn AdminCommand>,
    pub profile: Arc<dyn ProfileCommand>,
    pub loyalty: Arc<dyn LoyaltyQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub admins: Arc<dyn AdminCommand>,
    pub profile: Arc<dyn ProfileCommand>,
    pub loyalty: Arc<dyn LoyaltyQuery>,
    /// Rows per page on the management tables.
    pub page_size: usize,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle with the default page size.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use pergamino::domain::ports::{FixtureLoginService, FixtureRegistrationService};
    /// use pergamino::domain::{AccountService, LoyaltyService, SeedRecords};
    /// use pergamino::inbound::http::state::{HttpState, HttpStatePorts};
    /// use pergamino::outbound::memory::InMemoryRecordStore;
    ///
    /// let store = Arc::new(InMemoryRecordStore::from_seed(
    ///     SeedRecords::bundled().expect("bundled fixture"),
    /// ));
    /// let accounts = Arc::new(AccountService::new(store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService::default()),
    ///     registration: Arc::new(FixtureRegistrationService::default()),
    ///     users: accounts.clone(),
    ///     admins: accounts.clone(),
    ///     profile: accounts,
    ///     loyalty: Arc::new(LoyaltyService::new(store)),
    /// })
    /// .with_page_size(10);
    /// assert_eq!(state.page_size, 10);
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            users,
            admins,
            profile,
            loyalty,
        } = ports;
        Self {
            login,
            registration,
            users,
            admins,
            profile,
            loyalty,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the table page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
