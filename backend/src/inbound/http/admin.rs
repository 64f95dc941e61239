//! Administrator API: member detail and administrator management.
//!
//! Every handler requires an administrator session. Anonymous callers get
//! `401`, signed-in members `403`.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AdminDraft, AdminSummary, AdminUpdate, FormError, Identity, Screen, UserDetail, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::{SessionCookie, authorize};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

/// "Add Admin" / "Edit Admin" form body.
///
/// A blank `password` on edit keeps the current one.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminRequest {
    #[schema(example = "Store Manager")]
    pub name: String,
    #[schema(example = "manager@pergamino.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<&AdminRequest> for AdminDraft {
    type Error = FormError;

    fn try_from(value: &AdminRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

impl TryFrom<&AdminRequest> for AdminUpdate {
    type Error = FormError;

    fn try_from(value: &AdminRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

fn require_admin(state: &HttpState, cookie: SessionCookie, screen: Screen) -> ApiResult<Identity> {
    let session = cookie.restore(state)?;
    authorize(session.status(), screen)
}

fn path_id(path: web::Path<String>) -> ApiResult<UserId> {
    parse_user_id(path.into_inner(), FieldName::new("id"))
}

/// "User Details" for one member.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}",
    params(("id" = String, Path, description = "Member identifier")),
    responses(
        (status = 200, description = "Member detail", body = UserDetail),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "No such member", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "getMemberDetail",
    security(("SessionCookie" = []))
)]
#[get("/admin/users/{id}")]
pub async fn member_detail(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserDetail>> {
    require_admin(&state, cookie, Screen::AdminUsers)?;
    let id = path_id(path)?;
    let detail = state.users.member_detail(&id).await?;
    Ok(web::Json(detail))
}

/// Add an administrator.
#[utoipa::path(
    post,
    path = "/api/v1/admin/admins",
    request_body = AdminRequest,
    responses(
        (status = 201, description = "Administrator created", body = AdminSummary),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "createAdmin",
    security(("SessionCookie" = []))
)]
#[post("/admin/admins")]
pub async fn create_admin(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    payload: web::Json<AdminRequest>,
) -> ApiResult<HttpResponse> {
    require_admin(&state, cookie, Screen::AdminAdmins)?;
    let draft = AdminDraft::try_from(&*payload)?;
    let admin = state.admins.create_admin(&draft).await?;
    Ok(HttpResponse::Created().json(AdminSummary::from(&admin)))
}

/// Edit an administrator's name, email or password.
#[utoipa::path(
    put,
    path = "/api/v1/admin/admins/{id}",
    params(("id" = String, Path, description = "Administrator identifier")),
    request_body = AdminRequest,
    responses(
        (status = 200, description = "Administrator updated", body = AdminSummary),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "No such administrator", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "updateAdmin",
    security(("SessionCookie" = []))
)]
#[put("/admin/admins/{id}")]
pub async fn update_admin(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    path: web::Path<String>,
    payload: web::Json<AdminRequest>,
) -> ApiResult<web::Json<AdminSummary>> {
    require_admin(&state, cookie, Screen::AdminAdmins)?;
    let id = path_id(path)?;
    let update = AdminUpdate::try_from(&*payload)?;
    let admin = state.admins.update_admin(&id, &update).await?;
    Ok(web::Json(AdminSummary::from(&admin)))
}

/// Mark an administrator inactive.
#[utoipa::path(
    post,
    path = "/api/v1/admin/admins/{id}/deactivate",
    params(("id" = String, Path, description = "Administrator identifier")),
    responses(
        (status = 200, description = "Administrator deactivated", body = AdminSummary),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "No such administrator", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "deactivateAdmin",
    security(("SessionCookie" = []))
)]
#[post("/admin/admins/{id}/deactivate")]
pub async fn deactivate_admin(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    path: web::Path<String>,
) -> ApiResult<web::Json<AdminSummary>> {
    require_admin(&state, cookie, Screen::AdminAdmins)?;
    let id = path_id(path)?;
    let admin = state.admins.deactivate_admin(&id).await?;
    Ok(web::Json(AdminSummary::from(&admin)))
}
