//! Driving port for member sign-up.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Error, Identity, Registration, UserId};

/// Domain use-case port for registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a member identity from a validated sign-up form.
    async fn register(&self, registration: &Registration) -> Result<Identity, Error>;
}

/// Registration that always succeeds with a fresh random identifier.
///
/// Email addresses are not checked for uniqueness, so registering the same
/// address twice yields two distinct identities.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRegistrationService {
    latency: Duration,
}

impl FixtureRegistrationService {
    /// Registration that sleeps for `latency` before answering.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl RegistrationService for FixtureRegistrationService {
    async fn register(&self, registration: &Registration) -> Result<Identity, Error> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(Identity::new_member(
            UserId::random(),
            registration.email().clone(),
            registration.name().clone(),
        ))
    }
}
