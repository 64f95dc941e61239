//! Driving port for the signed-in visitor's own profile.

use async_trait::async_trait;

use crate::domain::{Error, Identity, PasswordChange, ProfileUpdate};

/// Domain use-case port for profile edits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Apply a name/email change and return the identity to persist.
    async fn update_profile(
        &self,
        identity: &Identity,
        update: &ProfileUpdate,
    ) -> Result<Identity, Error>;

    /// Accept a validated password change.
    async fn change_password(
        &self,
        identity: &Identity,
        change: &PasswordChange,
    ) -> Result<(), Error>;
}
