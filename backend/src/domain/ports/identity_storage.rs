//! Driven port for the persisted session identity.
//!
//! The session context keeps exactly one serialised identity under
//! [`IDENTITY_STORAGE_KEY`]. Adapters decide where it lives: the encrypted
//! session cookie over HTTP, a plain map in tests.

use super::define_port_error;

/// Key under which the serialised identity is stored.
pub const IDENTITY_STORAGE_KEY: &str = "pergaminoUser";

define_port_error! {
    /// Errors raised by identity storage adapters.
    pub enum IdentityStorageError {
        /// The stored record could not be read.
        Read { message: String } => "identity storage read failed: {message}",
        /// The record could not be written or removed.
        Write { message: String } => "identity storage write failed: {message}",
    }
}

/// Synchronous key-value slot holding one serialised identity.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityStorage {
    /// Raw stored record, if present.
    fn load(&self) -> Result<Option<String>, IdentityStorageError>;

    /// Overwrite the stored record.
    fn store(&mut self, record: &str) -> Result<(), IdentityStorageError>;

    /// Delete the stored record. Removing an absent record succeeds.
    fn remove(&mut self) -> Result<(), IdentityStorageError>;
}
