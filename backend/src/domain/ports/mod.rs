//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_command;
mod identity_storage;
mod login_service;
mod loyalty_query;
mod profile_command;
mod record_store;
mod registration_service;
mod users_query;

#[cfg(test)]
pub use admin_command::MockAdminCommand;
pub use admin_command::AdminCommand;
#[cfg(test)]
pub use identity_storage::MockIdentityStorage;
pub use identity_storage::{IDENTITY_STORAGE_KEY, IdentityStorage, IdentityStorageError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FixtureLoginService, INVALID_CREDENTIALS, LoginService};
#[cfg(test)]
pub use loyalty_query::MockLoyaltyQuery;
pub use loyalty_query::LoyaltyQuery;
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use record_store::MockRecordStore;
pub use record_store::{RecordStore, RecordStoreError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::{FixtureRegistrationService, RegistrationService};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
