//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to turn credentials into an identity
//! without knowing what backs it. Handler tests substitute a double.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{
    DisplayName, EmailAddress, Error, Identity, LoginCredentials, UserId, UserRole,
    UserValidationError,
};

/// Message returned for every rejected login.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}

struct DemoAccount {
    email: &'static str,
    password: &'static str,
    id: &'static str,
    name: &'static str,
    role: UserRole,
    points: u32,
    points_spent: u32,
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        email: "admin@pergamino.com",
        password: "admin123",
        id: "1",
        name: "Admin User",
        role: UserRole::Admin,
        points: 0,
        points_spent: 0,
    },
    DemoAccount {
        email: "user@pergamino.com",
        password: "user123",
        id: "2",
        name: "Regular User",
        role: UserRole::User,
        points: 150,
        points_spent: 50,
    },
];

impl DemoAccount {
    fn identity(&self) -> Result<Identity, Error> {
        let invalid = |err: UserValidationError| Error::internal(format!("invalid demo account: {err}"));
        Ok(Identity {
            id: UserId::new(self.id).map_err(invalid)?,
            email: EmailAddress::new(self.email).map_err(invalid)?,
            name: DisplayName::new(self.name).map_err(invalid)?,
            role: self.role,
            points: self.points,
            points_spent: self.points_spent,
        })
    }
}

/// Authenticator over the two demo accounts.
///
/// `admin@pergamino.com` / `admin123` signs in the administrator and
/// `user@pergamino.com` / `user123` the regular member. Every call waits
/// `latency` first to mimic a remote backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService {
    latency: Duration,
}

impl FixtureLoginService {
    /// Authenticator that sleeps for `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        DEMO_ACCOUNTS
            .iter()
            .find(|account| {
                account.email == credentials.email() && account.password == credentials.password()
            })
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?
            .identity()
    }
}
