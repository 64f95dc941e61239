//! Port abstraction for the loyalty record store and its errors.
//!
//! The store owns four collections: member accounts, administrators,
//! purchases and points transactions. Purchases and transactions are
//! read-only; accounts can be inserted or replaced by the account services.

use async_trait::async_trait;

use crate::domain::{PointsTransaction, Purchase, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// The backing store could not be reached.
        Connection { message: String } => "record store connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "record store query failed: {message}",
    }
}

/// Driven port over the loyalty records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every account in the users collection, in seed order.
    async fn list_users(&self) -> Result<Vec<User>, RecordStoreError>;

    /// Look up an account in the users collection.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, RecordStoreError>;

    /// Replace an existing account. Returns `false` when the id is unknown.
    async fn update_user(&self, user: &User) -> Result<bool, RecordStoreError>;

    /// Every administrator, in insertion order.
    async fn list_admins(&self) -> Result<Vec<User>, RecordStoreError>;

    /// Look up an administrator.
    async fn find_admin(&self, id: &UserId) -> Result<Option<User>, RecordStoreError>;

    /// Append a new administrator.
    async fn insert_admin(&self, admin: &User) -> Result<(), RecordStoreError>;

    /// Replace an existing administrator. Returns `false` when the id is unknown.
    async fn update_admin(&self, admin: &User) -> Result<bool, RecordStoreError>;

    /// Purchases owned by `user_id`, in seed order.
    async fn purchases_for(&self, user_id: &UserId) -> Result<Vec<Purchase>, RecordStoreError>;

    /// Ledger entries owned by `user_id`, in seed order.
    async fn transactions_for(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PointsTransaction>, RecordStoreError>;

    /// Every ledger entry.
    async fn list_transactions(&self) -> Result<Vec<PointsTransaction>, RecordStoreError>;
}
