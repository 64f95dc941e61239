//! Session context: the visitor's current identity and its lifecycle.
//!
//! A context starts in [`SessionStatus::Loading`]. [`SessionContext::restore`]
//! reads the persisted record once and settles on anonymous or
//! authenticated. Login and registration take the context mutably, so a
//! second submission cannot start while one is pending.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use super::ports::{IdentityStorage, IdentityStorageError, LoginService, RegistrationService};
use super::{
    DisplayName, EmailAddress, Error, LoginCredentials, Registration, User, UserId, UserRole,
};

/// Snapshot of the signed-in account, persisted between requests.
///
/// Serialised as `{"id","email","name","role","points","pointsSpent"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Identity {
    /// Account identifier.
    #[schema(value_type = String, example = "2")]
    pub id: UserId,
    /// Contact email.
    #[schema(value_type = String, example = "user@pergamino.com")]
    pub email: EmailAddress,
    /// Display name.
    #[schema(value_type = String, example = "Regular User")]
    pub name: DisplayName,
    /// Role, fixed for the account's lifetime.
    #[schema(value_type = String, example = "user")]
    pub role: UserRole,
    /// Points available.
    pub points: u32,
    /// Points already redeemed.
    pub points_spent: u32,
}

impl Identity {
    /// A freshly registered member with zero balances.
    pub fn new_member(id: UserId, email: EmailAddress, name: DisplayName) -> Self {
        Self {
            id,
            email,
            name,
            role: UserRole::User,
            points: 0,
            points_spent: 0,
        }
    }

    /// Whether the identity belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Same identity with new contact details.
    #[must_use]
    pub fn renamed(mut self, name: DisplayName, email: EmailAddress) -> Self {
        self.name = name;
        self.email = email;
        self
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            email: user.email().clone(),
            name: user.name().clone(),
            role: user.role(),
            points: user.points(),
            points_spent: user.points_spent(),
        }
    }
}

/// Where the session stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// The persisted record has not been read yet.
    #[default]
    Loading,
    /// No identity.
    Anonymous,
    /// Signed in.
    Authenticated(Identity),
}

impl SessionStatus {
    /// Identity, if signed in.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Loading | Self::Anonymous => None,
        }
    }

    /// Whether the persisted record is still unread.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

fn storage_error(err: IdentityStorageError) -> Error {
    Error::internal(format!("session storage failed: {err}"))
}

/// Holds the current identity and drives login, registration and logout.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use pergamino::domain::ports::{FixtureLoginService, FixtureRegistrationService};
/// use pergamino::domain::{LoginCredentials, SessionContext};
/// use pergamino::outbound::memory::InMemoryIdentityStorage;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let mut session = SessionContext::new(
///     InMemoryIdentityStorage::default(),
///     Arc::new(FixtureLoginService::default()),
///     Arc::new(FixtureRegistrationService::default()),
/// );
/// session.restore().expect("storage readable");
/// let creds = LoginCredentials::try_from_parts("admin@pergamino.com", "admin123")
///     .expect("valid form");
/// let identity = session.login(&creds).await.expect("demo credentials");
/// assert!(identity.is_admin());
/// # });
/// ```
pub struct SessionContext<S> {
    storage: S,
    login: Arc<dyn LoginService>,
    registration: Arc<dyn RegistrationService>,
    status: SessionStatus,
}

impl<S> SessionContext<S>
where
    S: IdentityStorage,
{
    /// Build a context in the loading state.
    pub fn new(
        storage: S,
        login: Arc<dyn LoginService>,
        registration: Arc<dyn RegistrationService>,
    ) -> Self {
        Self {
            storage,
            login,
            registration,
            status: SessionStatus::Loading,
        }
    }

    /// Current status.
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Current identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.status.identity()
    }

    /// Read the persisted identity and leave the loading state.
    ///
    /// A record that does not parse is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the storage itself cannot be read.
    pub fn restore(&mut self) -> Result<&SessionStatus, Error> {
        let raw = self.storage.load().map_err(storage_error)?;
        self.status = match raw {
            None => SessionStatus::Anonymous,
            Some(record) => match serde_json::from_str::<Identity>(&record) {
                Ok(identity) => {
                    debug!(user_id = %identity.id, "restored session identity");
                    SessionStatus::Authenticated(identity)
                }
                Err(err) => {
                    warn!(error = %err, "ignoring corrupt session identity");
                    SessionStatus::Anonymous
                }
            },
        };
        Ok(&self.status)
    }

    /// Authenticate and persist the resulting identity.
    ///
    /// On failure the previous status is kept untouched.
    ///
    /// # Errors
    ///
    /// Returns the login port's error (unauthorised for unknown credentials)
    /// or an internal error if the identity cannot be persisted.
    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<&Identity, Error> {
        let identity = self.login.authenticate(credentials).await?;
        info!(user_id = %identity.id, role = %identity.role, "login succeeded");
        self.establish(identity)
    }

    /// Create a member account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns the registration port's error or an internal error if the
    /// identity cannot be persisted.
    pub async fn register(&mut self, registration: &Registration) -> Result<&Identity, Error> {
        let identity = self.registration.register(registration).await?;
        info!(user_id = %identity.id, "registered new member");
        self.establish(identity)
    }

    /// Replace the signed-in identity, e.g. after a profile edit.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the identity cannot be persisted.
    pub fn replace_identity(&mut self, identity: Identity) -> Result<&Identity, Error> {
        self.establish(identity)
    }

    /// Clear the identity and its persisted form. Safe to repeat.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the storage cannot be cleared.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.storage.remove().map_err(storage_error)?;
        if let Some(identity) = self.status.identity() {
            info!(user_id = %identity.id, "logged out");
        }
        self.status = SessionStatus::Anonymous;
        Ok(())
    }

    /// Give back the storage handle.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn establish(&mut self, identity: Identity) -> Result<&Identity, Error> {
        let record = serde_json::to_string(&identity)
            .map_err(|err| Error::internal(format!("failed to encode identity: {err}")))?;
        self.storage.store(&record).map_err(storage_error)?;
        self.status = SessionStatus::Authenticated(identity);
        self.status
            .identity()
            .ok_or_else(|| Error::internal("identity missing after sign-in"))
    }
}

#[cfg(test)]
mod tests;
