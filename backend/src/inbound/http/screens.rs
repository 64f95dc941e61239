//! Screen routes behind the route guard.
//!
//! Every screen is a JSON document describing what the console shows.
//! The guard runs first: anonymous visitors on protected screens and
//! signed-in visitors on the wrong screen get `303 See Other` with a
//! `Location` naming where to go instead.
//!
//! ```text
//! GET /admin/users?search=maria&filter=high&sort=points&direction=desc&page=1
//! GET /dashboard?tab=earned
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;
use table_view::TableQuery;
use tracing::{debug, warn};
use utoipa::IntoParams;

use crate::domain::{
    AdminScreen, AuthScreen, Error, GuardState, Identity, MemberPanel, MemberScreen, ProfileForm,
    Screen, SessionStatus, TransactionTab, admin_management_table, evaluate,
    user_management_table,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionCookie;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{table_state, unknown_tab_error};

/// Outcome of running the guard for one request.
enum Gate {
    Open(Option<Identity>),
    Redirect(HttpResponse),
}

fn gate(status: &SessionStatus, screen: Screen) -> Result<Gate, Error> {
    let state = evaluate(status, screen);
    match (state, state.redirect()) {
        (GuardState::Authorized, _) => Ok(Gate::Open(status.identity().cloned())),
        (_, Some(target)) => {
            debug!(from = %screen, to = %target, "guard redirect");
            Ok(Gate::Redirect(
                HttpResponse::SeeOther()
                    .insert_header((LOCATION, target.path()))
                    .finish(),
            ))
        }
        (_, None) => Err(Error::internal("session identity was not restored")),
    }
}

fn signed_in(identity: Option<Identity>) -> Result<Identity, Error> {
    identity.ok_or_else(|| Error::internal("guard admitted a visitor without an identity"))
}

async fn open(
    state: &HttpState,
    cookie: SessionCookie,
    screen: Screen,
) -> Result<Result<Option<Identity>, HttpResponse>, Error> {
    let session = cookie.restore(state)?;
    Ok(match gate(session.status(), screen)? {
        Gate::Open(identity) => Ok(identity),
        Gate::Redirect(response) => Err(response),
    })
}

macro_rules! open_or_redirect {
    ($state:expr, $cookie:expr, $screen:expr) => {
        match open(&$state, $cookie, $screen).await? {
            Ok(identity) => identity,
            Err(redirect) => return Ok(redirect),
        }
    };
}

/// Sign-in screen.
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Sign-in form"),
        (status = 303, description = "Already signed in; redirect to the landing screen")
    ),
    tags = ["screens"],
    operation_id = "loginScreen",
    security([])
)]
#[get("/login")]
pub async fn login_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    open_or_redirect!(state, cookie, Screen::Login);
    Ok(HttpResponse::Ok().json(AuthScreen::login()))
}

/// Sign-up screen.
#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Sign-up form"),
        (status = 303, description = "Already signed in; redirect to the landing screen")
    ),
    tags = ["screens"],
    operation_id = "registerScreen",
    security([])
)]
#[get("/register")]
pub async fn register_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    open_or_redirect!(state, cookie, Screen::Register);
    Ok(HttpResponse::Ok().json(AuthScreen::register()))
}

/// Query for the points dashboard.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// `all`, `earned` or `spent`.
    pub tab: Option<String>,
}

/// "My Points" screen.
#[utoipa::path(
    get,
    path = "/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Points dashboard"),
        (status = 303, description = "Not signed in; redirect to /login"),
        (status = 400, description = "Unknown tab", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "dashboardScreen",
    security(("SessionCookie" = []))
)]
#[get("/dashboard")]
pub async fn dashboard_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    query: web::Query<DashboardQuery>,
) -> ApiResult<HttpResponse> {
    let identity = signed_in(open_or_redirect!(state, cookie, Screen::Dashboard))?;
    let tab = match query.tab.as_deref() {
        None => TransactionTab::default(),
        Some(raw) => raw.parse().map_err(|_| unknown_tab_error(raw))?,
    };
    let dashboard = state.loyalty.dashboard(&identity, tab).await?;
    Ok(HttpResponse::Ok().json(MemberScreen::new(&identity, MemberPanel::Points(dashboard))))
}

/// "Purchase History" screen.
#[utoipa::path(
    get,
    path = "/dashboard/purchases",
    responses(
        (status = 200, description = "Purchase history"),
        (status = 303, description = "Not signed in; redirect to /login")
    ),
    tags = ["screens"],
    operation_id = "purchasesScreen",
    security(("SessionCookie" = []))
)]
#[get("/dashboard/purchases")]
pub async fn purchases_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    let identity = signed_in(open_or_redirect!(state, cookie, Screen::Purchases))?;
    let history = state.loyalty.purchase_history(&identity).await?;
    Ok(HttpResponse::Ok().json(MemberScreen::new(&identity, MemberPanel::Purchases(history))))
}

/// "Profile" screen.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile form"),
        (status = 303, description = "Not signed in; redirect to /login")
    ),
    tags = ["screens"],
    operation_id = "profileScreen",
    security(("SessionCookie" = []))
)]
#[get("/profile")]
pub async fn profile_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    let identity = signed_in(open_or_redirect!(state, cookie, Screen::Profile))?;
    let form = ProfileForm::from(&identity);
    Ok(HttpResponse::Ok().json(MemberScreen::new(&identity, MemberPanel::Profile(form))))
}

async fn members_table(state: &HttpState, query: &TableQuery) -> ApiResult<table_view::TablePage> {
    let view = user_management_table(state.page_size);
    let table = table_state(&view, query)?;
    let members = state.users.list_members().await?;
    Ok(view.render(&table, &members))
}

/// Admin dashboard; shows the user management tab.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "User management table"),
        (status = 303, description = "Not an administrator; redirect")
    ),
    tags = ["screens"],
    operation_id = "adminScreen",
    security(("SessionCookie" = []))
)]
#[get("/admin")]
pub async fn admin_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    query: web::Query<TableQuery>,
) -> ApiResult<HttpResponse> {
    open_or_redirect!(state, cookie, Screen::Admin);
    let table = members_table(&state, &query).await?;
    Ok(HttpResponse::Ok().json(AdminScreen::new(Screen::Admin, table)))
}

/// "User Management" tab.
#[utoipa::path(
    get,
    path = "/admin/users",
    responses(
        (status = 200, description = "User management table"),
        (status = 303, description = "Not an administrator; redirect"),
        (status = 400, description = "Unknown sort column or filter option", body = ErrorSchema)
    ),
    tags = ["screens"],
    operation_id = "adminUsersScreen",
    security(("SessionCookie" = []))
)]
#[get("/admin/users")]
pub async fn admin_users_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    query: web::Query<TableQuery>,
) -> ApiResult<HttpResponse> {
    open_or_redirect!(state, cookie, Screen::AdminUsers);
    let table = members_table(&state, &query).await?;
    Ok(HttpResponse::Ok().json(AdminScreen::new(Screen::AdminUsers, table)))
}

/// "Admin Management" tab.
#[utoipa::path(
    get,
    path = "/admin/admins",
    responses(
        (status = 200, description = "Administrator management table"),
        (status = 303, description = "Not an administrator; redirect")
    ),
    tags = ["screens"],
    operation_id = "adminAdminsScreen",
    security(("SessionCookie" = []))
)]
#[get("/admin/admins")]
pub async fn admin_admins_screen(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
    query: web::Query<TableQuery>,
) -> ApiResult<HttpResponse> {
    open_or_redirect!(state, cookie, Screen::AdminAdmins);
    let view = admin_management_table(state.page_size);
    let table = table_state(&view, &query)?;
    let admins = state.admins.list_admins().await?;
    let page = view.render(&table, &admins);
    Ok(HttpResponse::Ok().json(AdminScreen::new(Screen::AdminAdmins, page)))
}

/// Fallback for paths no route claims.
pub async fn not_found(req: HttpRequest) -> ApiResult<HttpResponse> {
    let path = req.path().to_owned();
    warn!(path = %path, "no route for path");
    Err(Error::not_found(format!("no screen at {path}")).with_details(json!({ "path": path })))
}

/// Register every screen route on a service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(login_screen)
        .service(register_screen)
        .service(dashboard_screen)
        .service(purchases_screen)
        .service(profile_screen)
        .service(admin_screen)
        .service(admin_users_screen)
        .service(admin_admins_screen);
}

#[cfg(test)]
#[path = "screens_tests.rs"]
mod tests;
