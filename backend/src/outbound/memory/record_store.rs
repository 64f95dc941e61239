//! Record store backed by the seeded collections.
//!
//! Every collection sits behind one `tokio::sync::RwLock`. Reads clone the
//! matching records out; writes replace whole records. Nothing is persisted
//! across restarts.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{RecordStore, RecordStoreError};
use crate::domain::{PointsTransaction, Purchase, SeedRecords, User, UserId};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    admins: Vec<User>,
    purchases: Vec<Purchase>,
    transactions: Vec<PointsTransaction>,
}

/// In-memory [`RecordStore`] seeded from [`SeedRecords`].
///
/// # Examples
/// ```
/// use pergamino::domain::SeedRecords;
/// use pergamino::outbound::memory::InMemoryRecordStore;
///
/// let records = SeedRecords::bundled().expect("bundled fixture");
/// let store = InMemoryRecordStore::from_seed(records);
/// # let _ = store;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Collections>,
}

impl InMemoryRecordStore {
    /// Build a store holding the given seed records.
    pub fn from_seed(records: SeedRecords) -> Self {
        let (users, admins, purchases, transactions) = records.into_parts();
        debug!(
            users = users.len(),
            admins = admins.len(),
            purchases = purchases.len(),
            transactions = transactions.len(),
            "seeded in-memory record store"
        );
        Self {
            inner: RwLock::new(Collections {
                users,
                admins,
                purchases,
                transactions,
            }),
        }
    }
}

fn replace(collection: &mut [User], record: &User) -> bool {
    match collection.iter_mut().find(|u| u.id() == record.id()) {
        Some(slot) => {
            *slot = record.clone();
            true
        }
        None => false,
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn list_users(&self) -> Result<Vec<User>, RecordStoreError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, RecordStoreError> {
        let guard = self.inner.read().await;
        Ok(guard.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn update_user(&self, user: &User) -> Result<bool, RecordStoreError> {
        let mut guard = self.inner.write().await;
        Ok(replace(&mut guard.users, user))
    }

    async fn list_admins(&self) -> Result<Vec<User>, RecordStoreError> {
        Ok(self.inner.read().await.admins.clone())
    }

    async fn find_admin(&self, id: &UserId) -> Result<Option<User>, RecordStoreError> {
        let guard = self.inner.read().await;
        Ok(guard.admins.iter().find(|u| u.id() == id).cloned())
    }

    async fn insert_admin(&self, admin: &User) -> Result<(), RecordStoreError> {
        let mut guard = self.inner.write().await;
        if guard.admins.iter().any(|u| u.id() == admin.id()) {
            return Err(RecordStoreError::query(format!(
                "administrator {} already exists",
                admin.id()
            )));
        }
        guard.admins.push(admin.clone());
        Ok(())
    }

    async fn update_admin(&self, admin: &User) -> Result<bool, RecordStoreError> {
        let mut guard = self.inner.write().await;
        Ok(replace(&mut guard.admins, admin))
    }

    async fn purchases_for(&self, user_id: &UserId) -> Result<Vec<Purchase>, RecordStoreError> {
        let guard = self.inner.read().await;
        Ok(guard
            .purchases
            .iter()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn transactions_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PointsTransaction>, RecordStoreError> {
        let guard = self.inner.read().await;
        Ok(guard
            .transactions
            .iter()
            .filter(|tx| &tx.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_transactions(&self) -> Result<Vec<PointsTransaction>, RecordStoreError> {
        Ok(self.inner.read().await.transactions.clone())
    }
}
