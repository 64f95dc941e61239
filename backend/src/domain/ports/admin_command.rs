//! Driving port for administrator management.
//!
//! Backs the "Administrator Management" tab: listing, creating, editing and
//! deactivating administrator accounts.

use async_trait::async_trait;

use crate::domain::{AdminDraft, AdminUpdate, Error, User, UserId};

/// Domain use-case port for administrator management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminCommand: Send + Sync {
    /// Every administrator, in insertion order.
    async fn list_admins(&self) -> Result<Vec<User>, Error>;

    /// Create an active administrator with a fresh identifier.
    async fn create_admin(&self, draft: &AdminDraft) -> Result<User, Error>;

    /// Rename an administrator; `not_found` if the id is unknown.
    async fn update_admin(&self, id: &UserId, update: &AdminUpdate) -> Result<User, Error>;

    /// Mark an administrator inactive; `not_found` if the id is unknown.
    async fn deactivate_admin(&self, id: &UserId) -> Result<User, Error>;
}
