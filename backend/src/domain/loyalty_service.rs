//! Loyalty domain service: member dashboard and purchase history.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{LoyaltyQuery, RecordStore, RecordStoreError};
use crate::domain::{Dashboard, Error, Identity, PurchaseHistory, TransactionTab};

/// Loyalty service implementing [`LoyaltyQuery`].
#[derive(Clone)]
pub struct LoyaltyService<R> {
    store: Arc<R>,
}

impl<R> LoyaltyService<R> {
    /// Create a new service with the given store.
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

fn map_store_error(error: RecordStoreError) -> Error {
    match error {
        RecordStoreError::Connection { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
        RecordStoreError::Query { message } => {
            Error::internal(format!("record store error: {message}"))
        }
    }
}

#[async_trait]
impl<R> LoyaltyQuery for LoyaltyService<R>
where
    R: RecordStore,
{
    async fn dashboard(
        &self,
        identity: &Identity,
        tab: TransactionTab,
    ) -> Result<Dashboard, Error> {
        let transactions = self
            .store
            .transactions_for(&identity.id)
            .await
            .map_err(map_store_error)?;
        Ok(Dashboard::build(identity, &transactions, tab))
    }

    async fn purchase_history(&self, identity: &Identity) -> Result<PurchaseHistory, Error> {
        let purchases = self
            .store
            .purchases_for(&identity.id)
            .await
            .map_err(map_store_error)?;
        Ok(PurchaseHistory::build(identity, &purchases))
    }
}
