//! In-memory adapters.

mod identity_storage;
mod record_store;

pub use identity_storage::InMemoryIdentityStorage;
pub use record_store::InMemoryRecordStore;
