//! Sign-in, sign-up and sign-out actions.
//!
//! ```text
//! POST /api/v1/login {"email":"user@pergamino.com","password":"user123"}
//! POST /api/v1/register {"name":"..","email":"..","password":"..","confirmPassword":".."}
//! POST /api/v1/logout
//! GET  /api/v1/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FormError, Identity, LoginCredentials, Registration, Screen};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionCookie;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    #[schema(example = "user@pergamino.com")]
    pub email: String,
    #[schema(example = "user123")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = FormError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Sign-up request body for `POST /api/v1/register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = FormError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            &value.email,
            &value.password,
            &value.confirm_password,
        )
    }
}

/// Who is signed in and where they land.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Signed-in identity, absent for anonymous visitors.
    pub identity: Option<Identity>,
    /// Default screen for the identity's role.
    #[schema(example = "/dashboard")]
    pub home: Option<String>,
}

impl SessionResponse {
    fn from_identity(identity: Option<&Identity>) -> Self {
        Self {
            identity: identity.cloned(),
            home: identity.map(|i| Screen::default_for(i.role).path().to_owned()),
        }
    }
}

/// Authenticate against the demo accounts and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Invalid email or password", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let mut session = cookie.restore(&state)?;
    let identity = session.login(&credentials).await?;
    Ok(web::Json(SessionResponse::from_identity(Some(identity))))
}

/// Create a member account and sign it in.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = SessionResponse),
        (status = 400, description = "Missing field or password mismatch", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["session"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let registration = Registration::try_from(payload.into_inner())?;
    let mut session = cookie.restore(&state)?;
    let identity = session.register(&registration).await?;
    Ok(web::Json(SessionResponse::from_identity(Some(identity))))
}

/// Clear the session. Succeeds for anonymous visitors too.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Signed out"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, cookie: SessionCookie) -> ApiResult<HttpResponse> {
    let mut session = cookie.restore(&state)?;
    session.logout()?;
    Ok(HttpResponse::NoContent().finish())
}

/// Current session.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session", body = SessionResponse),
        (status = 500, description = "Internal server error")
    ),
    tags = ["session"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<web::Json<SessionResponse>> {
    let session = cookie.restore(&state)?;
    Ok(web::Json(SessionResponse::from_identity(session.identity())))
}
