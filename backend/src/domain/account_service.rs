//! Account domain services.
//!
//! Implements the member query, administrator management and profile
//! driving ports on top of the record store port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{AdminCommand, ProfileCommand, RecordStore, RecordStoreError, UsersQuery};
use crate::domain::{
    AdminDraft, AdminUpdate, Error, Identity, PasswordChange, ProfileUpdate, User, UserDetail,
    UserId, UserRole, members,
};

/// Account service implementing the account driving ports.
#[derive(Clone)]
pub struct AccountService<R> {
    store: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create a new service with the given store.
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }
}

impl<R> AccountService<R>
where
    R: RecordStore,
{
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

    fn admin_not_found(id: &UserId) -> Error {
        Error::not_found(format!("administrator {id} not found"))
    }

    async fn existing_admin(&self, id: &UserId) -> Result<User, Error> {
        self.store
            .find_admin(id)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Self::admin_not_found(id))
    }

    async fn save_admin(&self, admin: User) -> Result<User, Error> {
        let updated = self
            .store
            .update_admin(&admin)
            .await
            .map_err(Self::map_store_error)?;
        if updated {
            Ok(admin)
        } else {
            Err(Self::admin_not_found(admin.id()))
        }
    }
}

#[async_trait]
impl<R> UsersQuery for AccountService<R>
where
    R: RecordStore,
{
    async fn list_members(&self) -> Result<Vec<User>, Error> {
        let users = self
            .store
            .list_users()
            .await
            .map_err(Self::map_store_error)?;
        Ok(members(&users))
    }

    async fn member_detail(&self, id: &UserId) -> Result<UserDetail, Error> {
        self.store
            .find_user(id)
            .await
            .map_err(Self::map_store_error)?
            .filter(|user| user.role() == UserRole::User)
            .map(|user| UserDetail::from(&user))
            .ok_or_else(|| Error::not_found(format!("user {id} not found")))
    }
}

#[async_trait]
impl<R> AdminCommand for AccountService<R>
where
    R: RecordStore,
{
    async fn list_admins(&self) -> Result<Vec<User>, Error> {
        self.store
            .list_admins()
            .await
            .map_err(Self::map_store_error)
    }

    async fn create_admin(&self, draft: &AdminDraft) -> Result<User, Error> {
        let admin = User::new(
            UserId::random(),
            draft.email().clone(),
            draft.name().clone(),
            UserRole::Admin,
        );
        self.store
            .insert_admin(&admin)
            .await
            .map_err(Self::map_store_error)?;
        info!(admin_id = %admin.id(), "administrator created");
        Ok(admin)
    }

    async fn update_admin(&self, id: &UserId, update: &AdminUpdate) -> Result<User, Error> {
        let mut admin = self.existing_admin(id).await?;
        admin.rename(update.name().clone(), update.email().clone());
        let saved = self.save_admin(admin).await?;
        info!(
            admin_id = %saved.id(),
            password_changed = update.password().is_some(),
            "administrator updated"
        );
        Ok(saved)
    }

    async fn deactivate_admin(&self, id: &UserId) -> Result<User, Error> {
        let mut admin = self.existing_admin(id).await?;
        admin.deactivate();
        let saved = self.save_admin(admin).await?;
        info!(admin_id = %saved.id(), "administrator deactivated");
        Ok(saved)
    }
}

#[async_trait]
impl<R> ProfileCommand for AccountService<R>
where
    R: RecordStore,
{
    async fn update_profile(
        &self,
        identity: &Identity,
        update: &ProfileUpdate,
    ) -> Result<Identity, Error> {
        let stored = self
            .store
            .find_user(&identity.id)
            .await
            .map_err(Self::map_store_error)?;
        // Registered accounts live only in the session; there is nothing to
        // rewrite in the store for them.
        if let Some(mut user) = stored {
            user.rename(update.name().clone(), update.email().clone());
            self.store
                .update_user(&user)
                .await
                .map_err(Self::map_store_error)?;
        }
        info!(user_id = %identity.id, "profile updated");
        Ok(identity
            .clone()
            .renamed(update.name().clone(), update.email().clone()))
    }

    async fn change_password(
        &self,
        identity: &Identity,
        _change: &PasswordChange,
    ) -> Result<(), Error> {
        info!(user_id = %identity.id, "password change accepted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
