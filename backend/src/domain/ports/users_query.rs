//! Driving port for the admin's view of member accounts.
//!
//! Inbound adapters use this port to list members and open a member's
//! detail without importing the record store.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDetail, UserId};

/// Domain use-case port for member queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every account with the `user` role, in store order.
    async fn list_members(&self) -> Result<Vec<User>, Error>;

    /// Detail for one member; `not_found` if the id is unknown.
    async fn member_detail(&self, id: &UserId) -> Result<UserDetail, Error>;
}
