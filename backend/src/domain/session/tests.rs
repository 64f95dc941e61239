//! Tests for the session context lifecycle.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    FixtureLoginService, FixtureRegistrationService, IDENTITY_STORAGE_KEY, MockIdentityStorage,
    MockLoginService,
};

#[derive(Debug, Default)]
struct SlotStorage {
    slot: Option<String>,
    removals: usize,
}

impl IdentityStorage for SlotStorage {
    fn load(&self) -> Result<Option<String>, IdentityStorageError> {
        Ok(self.slot.clone())
    }

    fn store(&mut self, record: &str) -> Result<(), IdentityStorageError> {
        self.slot = Some(record.to_owned());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), IdentityStorageError> {
        self.removals += 1;
        self.slot = None;
        Ok(())
    }
}

fn context_with(storage: SlotStorage) -> SessionContext<SlotStorage> {
    SessionContext::new(
        storage,
        Arc::new(FixtureLoginService::default()),
        Arc::new(FixtureRegistrationService::default()),
    )
}

#[fixture]
fn anonymous() -> SessionContext<SlotStorage> {
    let mut session = context_with(SlotStorage::default());
    session.restore().expect("restore");
    session
}

fn credentials(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, password).expect("credential shape")
}

const STORED_MEMBER: &str = r#"{"id":"2","email":"user@pergamino.com","name":"Regular User","role":"user","points":150,"pointsSpent":50}"#;

#[rstest]
fn new_context_is_loading() {
    let session = context_with(SlotStorage::default());
    assert!(session.status().is_loading());
    assert!(session.identity().is_none());
}

#[rstest]
#[case::absent(None, None)]
#[case::valid(Some(STORED_MEMBER), Some("2"))]
#[case::corrupt(Some("{not json"), None)]
#[case::unknown_field(Some(r#"{"id":"2","admin":true}"#), None)]
fn restore_settles_on_a_definite_state(
    #[case] stored: Option<&str>,
    #[case] expected_id: Option<&str>,
) {
    let mut session = context_with(SlotStorage {
        slot: stored.map(str::to_owned),
        removals: 0,
    });
    let status = session.restore().expect("restore");
    assert!(!status.is_loading());
    assert_eq!(status.identity().map(|i| i.id.as_ref()), expected_id);
}

#[rstest]
fn restore_surfaces_unreadable_storage() {
    let mut storage = MockIdentityStorage::new();
    storage
        .expect_load()
        .times(1)
        .returning(|| Err(IdentityStorageError::read("cookie tampered")));
    let mut session = SessionContext::new(
        storage,
        Arc::new(FixtureLoginService::default()),
        Arc::new(FixtureRegistrationService::default()),
    );

    let err = session.restore().expect_err("read failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert!(session.status().is_loading());
}

#[rstest]
#[tokio::test]
async fn login_persists_the_identity(mut anonymous: SessionContext<SlotStorage>) {
    let identity = anonymous
        .login(&credentials("user@pergamino.com", "user123"))
        .await
        .expect("demo login")
        .clone();
    assert_eq!(identity.points, 150);

    let storage = anonymous.into_storage();
    let stored = storage.slot.expect("record stored");
    let decoded: Identity = serde_json::from_str(&stored).expect("stored identity parses");
    assert_eq!(decoded, identity);
}

#[rstest]
#[tokio::test]
async fn failed_login_keeps_the_previous_identity() {
    let mut session = context_with(SlotStorage {
        slot: Some(STORED_MEMBER.to_owned()),
        removals: 0,
    });
    session.restore().expect("restore");

    let err = session
        .login(&credentials("user@pergamino.com", "wrong"))
        .await
        .expect_err("bad password");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(session.identity().map(|i| i.id.as_ref()), Some("2"));
    assert_eq!(
        session.into_storage().slot.as_deref(),
        Some(STORED_MEMBER)
    );
}

#[rstest]
#[tokio::test]
async fn login_uses_the_injected_port(mut anonymous: SessionContext<SlotStorage>) {
    let mut login = MockLoginService::new();
    login
        .expect_authenticate()
        .withf(|creds| creds.email() == "admin@pergamino.com")
        .times(1)
        .returning(|_| Err(Error::service_unavailable("auth backend down")));
    let mut session = SessionContext::new(
        std::mem::take(&mut anonymous.storage),
        Arc::new(login),
        Arc::new(FixtureRegistrationService::default()),
    );
    session.restore().expect("restore");

    let err = session
        .login(&credentials("admin@pergamino.com", "admin123"))
        .await
        .expect_err("port error propagates");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(session.status(), &SessionStatus::Anonymous);
}

#[rstest]
#[tokio::test]
async fn registration_signs_in_a_zero_balance_member(mut anonymous: SessionContext<SlotStorage>) {
    let registration = Registration::try_from_parts(
        "Lucia Fernandez",
        "lucia@example.com",
        "espresso",
        "espresso",
    )
    .expect("valid registration");

    let identity = anonymous.register(&registration).await.expect("registered");
    assert_eq!(identity.role, UserRole::User);
    assert_eq!((identity.points, identity.points_spent), (0, 0));
    assert_eq!(identity.name.as_ref(), "Lucia Fernandez");
}

#[rstest]
#[tokio::test]
async fn logout_is_idempotent(mut anonymous: SessionContext<SlotStorage>) {
    anonymous
        .login(&credentials("admin@pergamino.com", "admin123"))
        .await
        .expect("demo login");

    anonymous.logout().expect("first logout");
    anonymous.logout().expect("second logout");
    assert_eq!(anonymous.status(), &SessionStatus::Anonymous);

    let storage = anonymous.into_storage();
    assert!(storage.slot.is_none());
    assert_eq!(storage.removals, 2);
}

#[rstest]
fn replace_identity_rewrites_the_stored_record(mut anonymous: SessionContext<SlotStorage>) {
    let identity: Identity = serde_json::from_str(STORED_MEMBER).expect("fixture identity");
    let renamed = identity.renamed(
        DisplayName::new("Coffee Fan").expect("name"),
        EmailAddress::new("fan@example.com").expect("email"),
    );
    anonymous
        .replace_identity(renamed.clone())
        .expect("replaced");

    assert_eq!(anonymous.identity(), Some(&renamed));
    let stored = anonymous.into_storage().slot.expect("stored");
    assert!(stored.contains("\"pointsSpent\":50"));
    assert!(stored.contains("Coffee Fan"));
}

#[rstest]
fn identity_is_built_from_a_user_record() {
    let user = User::new(
        UserId::new("1").expect("id"),
        EmailAddress::new("admin@pergamino.com").expect("email"),
        DisplayName::new("Admin User").expect("name"),
        UserRole::Admin,
    );
    let identity = Identity::from(&user);
    assert!(identity.is_admin());
    assert_eq!(IDENTITY_STORAGE_KEY, "pergaminoUser");
}
