//! Session cookie adapter for the identity storage port.
//!
//! The serialised identity lives under `pergaminoUser` inside the encrypted
//! `session` cookie. Handlers extract a [`SessionCookie`] and turn it into a
//! restored [`SessionContext`] before touching any port.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::{IDENTITY_STORAGE_KEY, IdentityStorage, IdentityStorageError};
use crate::domain::{Error, GuardState, Identity, Screen, SessionContext, SessionStatus, evaluate};

use super::state::HttpState;

/// Newtype over the Actix session exposing it as identity storage.
#[derive(Clone)]
pub struct SessionCookie(Session);

impl SessionCookie {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Build a session context over this cookie and read the stored identity.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the cookie payload cannot be read.
    pub fn restore(self, state: &HttpState) -> Result<SessionContext<Self>, Error> {
        let mut context =
            SessionContext::new(self, state.login.clone(), state.registration.clone());
        context.restore()?;
        Ok(context)
    }
}

impl IdentityStorage for SessionCookie {
    fn load(&self) -> Result<Option<String>, IdentityStorageError> {
        self.0
            .get::<String>(IDENTITY_STORAGE_KEY)
            .map_err(|err| IdentityStorageError::read(err.to_string()))
    }

    fn store(&mut self, record: &str) -> Result<(), IdentityStorageError> {
        self.0
            .insert(IDENTITY_STORAGE_KEY, record)
            .map_err(|err| IdentityStorageError::write(err.to_string()))
    }

    fn remove(&mut self) -> Result<(), IdentityStorageError> {
        self.0.remove(IDENTITY_STORAGE_KEY);
        Ok(())
    }
}

impl FromRequest for SessionCookie {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionCookie::new) })
    }
}

/// Identity allowed to act on `screen`, or the error an API caller sees.
///
/// Anonymous callers get `401`; signed-in callers without the role get
/// `403`.
pub fn authorize(status: &SessionStatus, screen: Screen) -> Result<Identity, Error> {
    match (evaluate(status, screen), status.identity()) {
        (GuardState::Authorized, Some(identity)) => Ok(identity.clone()),
        (GuardState::Unauthenticated, _) => Err(Error::unauthorized("login required")),
        (GuardState::WrongRole { .. }, _) => {
            Err(Error::forbidden("administrator access required"))
        }
        (GuardState::Checking, _) | (GuardState::Authorized, None) => {
            Err(Error::internal("session identity was not restored"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, UserRole};
    use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    const STORED_ADMIN: &str = r#"{"id":"1","email":"admin@pergamino.com","name":"Admin User","role":"admin","points":0,"pointsSpent":0}"#;

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(fixture_state()))
            .wrap(test_session_middleware())
            .route(
                "/set",
                web::get().to(|mut cookie: SessionCookie| async move {
                    cookie
                        .store(STORED_ADMIN)
                        .map_err(|err| Error::internal(err.to_string()))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/corrupt",
                web::get().to(|mut cookie: SessionCookie| async move {
                    cookie
                        .store("{\"id\":")
                        .map_err(|err| Error::internal(err.to_string()))?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/whoami",
                web::get().to(
                    |cookie: SessionCookie, state: web::Data<HttpState>| async move {
                        let context = cookie.restore(&state)?;
                        let identity = authorize(context.status(), Screen::Admin)?;
                        Ok::<_, Error>(HttpResponse::Ok().body(identity.name.to_string()))
                    },
                ),
            )
    }

    fn session_cookie(res: &actix_web::dev::ServiceResponse) -> actix_web::cookie::Cookie<'static> {
        res.response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .map(|cookie| cookie.into_owned())
            .expect("session cookie set")
    }

    #[actix_web::test]
    async fn stored_identity_round_trips_through_the_cookie() {
        let app = actix_test::init_service(session_test_app()).await;
        let set = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "Admin User");
    }

    #[actix_web::test]
    async fn corrupt_identity_is_treated_as_anonymous() {
        let app = actix_test::init_service(session_test_app()).await;
        let set =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/corrupt").to_request()).await;
        let cookie = session_cookie(&set);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    fn members_are_forbidden_from_admin_actions() {
        let identity: Identity = serde_json::from_str(STORED_ADMIN).expect("identity");
        let member = Identity {
            role: UserRole::User,
            ..identity
        };
        let err = authorize(&SessionStatus::Authenticated(member), Screen::AdminAdmins)
            .expect_err("wrong role");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn loading_sessions_cannot_be_authorised() {
        let err = authorize(&SessionStatus::Loading, Screen::Dashboard).expect_err("not restored");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
