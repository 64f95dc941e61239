//! Driving port for the member's points and purchases.

use async_trait::async_trait;

use crate::domain::{Dashboard, Error, Identity, PurchaseHistory, TransactionTab};

/// Domain use-case port for member loyalty screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoyaltyQuery: Send + Sync {
    /// Points dashboard with the chosen transaction tab.
    async fn dashboard(&self, identity: &Identity, tab: TransactionTab)
    -> Result<Dashboard, Error>;

    /// Purchase history, in recorded order.
    async fn purchase_history(&self, identity: &Identity) -> Result<PurchaseHistory, Error>;
}
