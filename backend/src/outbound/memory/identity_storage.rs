//! Identity slot held in process memory.

use crate::domain::ports::{IdentityStorage, IdentityStorageError};

/// Single-slot identity storage for command-line and test sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityStorage {
    record: Option<String>,
}

impl InMemoryIdentityStorage {
    /// Storage pre-populated with a serialised identity.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Some(record.into()),
        }
    }

    /// The stored record, if any.
    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl IdentityStorage for InMemoryIdentityStorage {
    fn load(&self) -> Result<Option<String>, IdentityStorageError> {
        Ok(self.record.clone())
    }

    fn store(&mut self, record: &str) -> Result<(), IdentityStorageError> {
        self.record = Some(record.to_owned());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), IdentityStorageError> {
        self.record = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn store_then_remove_empties_the_slot() {
        let mut storage = InMemoryIdentityStorage::default();
        storage.store("{\"id\":\"2\"}").expect("store");
        assert_eq!(storage.load().expect("load").as_deref(), Some("{\"id\":\"2\"}"));

        storage.remove().expect("remove");
        storage.remove().expect("remove again");
        assert_eq!(storage.record(), None);
    }
}
