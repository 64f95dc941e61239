//! Signed-in visitor's own profile.
//!
//! ```text
//! PUT  /api/v1/profile          {"name":"..","email":".."}
//! POST /api/v1/profile/password {"currentPassword":"..","newPassword":"..","confirmPassword":".."}
//! ```

use actix_web::{HttpResponse, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FormError, Identity, PasswordChange, ProfileForm, ProfileUpdate, Screen};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{SessionCookie, authorize};
use crate::inbound::http::state::HttpState;

/// Body for `PUT /api/v1/profile`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRequest {
    pub name: String,
    pub email: String,
}

impl TryFrom<ProfileRequest> for ProfileUpdate {
    type Error = FormError;

    fn try_from(value: ProfileRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email)
    }
}

/// Body for `POST /api/v1/profile/password`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl TryFrom<PasswordRequest> for PasswordChange {
    type Error = FormError;

    fn try_from(value: PasswordRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.current_password,
            &value.new_password,
            &value.confirm_password,
        )
    }
}

/// Save the profile form and refresh the session identity.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = ProfileForm),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile",
    security(("SessionCookie" = []))
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileForm>> {
    let update = ProfileUpdate::try_from(payload.into_inner())?;
    let mut session = cookie.restore(&state)?;
    let identity: Identity = authorize(session.status(), Screen::Profile)?;
    let updated = state.profile.update_profile(&identity, &update).await?;
    let saved = session.replace_identity(updated)?;
    Ok(web::Json(ProfileForm::from(saved)))
}

/// Accept a password change.
#[utoipa::path(
    post,
    path = "/api/v1/profile/password",
    request_body = PasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Passwords differ or are too short", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "changePassword",
    security(("SessionCookie" = []))
)]
#[post("/profile/password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    payload: web::Json<PasswordRequest>,
) -> ApiResult<HttpResponse> {
    let session = cookie.restore(&state)?;
    let identity = authorize(session.status(), Screen::Profile)?;
    let change = PasswordChange::try_from(payload.into_inner())?;
    state.profile.change_password(&identity, &change).await?;
    Ok(HttpResponse::NoContent().finish())
}
