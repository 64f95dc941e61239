//! Tests for guarded screen routes.

use super::*;
use crate::inbound::http::auth::{LoginRequest, login};
use crate::inbound::http::test_utils::{fixture_state, test_session_middleware};
use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::Value;

const ADMIN: (&str, &str) = ("admin@pergamino.com", "admin123");
const MEMBER: (&str, &str) = ("user@pergamino.com", "user123");

fn screens_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(fixture_state()))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").service(login))
        .configure(configure)
        .default_service(web::to(not_found))
}

fn login_request((email, password): (&str, &str)) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        })
}

fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
        .expect("session cookie")
}

fn location(res: &ServiceResponse) -> Option<&str> {
    res.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

#[rstest]
#[case("/dashboard")]
#[case("/dashboard/purchases")]
#[case("/profile")]
#[case("/admin")]
#[case("/admin/admins")]
#[actix_web::test]
async fn anonymous_visitors_are_sent_to_login(#[case] path: &str) {
    let app = actix_test::init_service(screens_app()).await;
    let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(path).to_request()).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/login"));
}

#[rstest]
#[case(MEMBER, "/admin/users", "/dashboard")]
#[case(MEMBER, "/login", "/dashboard")]
#[case(ADMIN, "/register", "/admin")]
#[actix_web::test]
async fn signed_in_visitors_are_sent_to_their_landing_screen(
    #[case] account: (&str, &str),
    #[case] path: &str,
    #[case] expected: &str,
) {
    let app = actix_test::init_service(screens_app()).await;
    let signed_in = actix_test::call_service(&app, login_request(account).to_request()).await;
    let cookie = session_cookie(&signed_in);
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(path).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some(expected));
}

#[actix_web::test]
async fn login_screen_lists_demo_accounts() {
    let app = actix_test::init_service(screens_app()).await;
    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get().uri("/login").to_request(),
    )
    .await;
    assert_eq!(body["title"], "Welcome Back");
    assert_eq!(body["demoAccounts"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn member_dashboard_filters_by_tab() {
    let app = actix_test::init_service(screens_app()).await;
    let signed_in = actix_test::call_service(&app, login_request(MEMBER).to_request()).await;
    let cookie = session_cookie(&signed_in);
    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/dashboard?tab=spent")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(body["heading"], "Welcome, Regular User");
    assert_eq!(body["panel"], "points");
    assert_eq!(body["overview"]["available"], 150);
    assert_eq!(body["transactions"]["entries"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn unknown_dashboard_tab_is_rejected() {
    let app = actix_test::init_service(screens_app()).await;
    let signed_in = actix_test::call_service(&app, login_request(MEMBER).to_request()).await;
    let cookie = session_cookie(&signed_in);
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/dashboard?tab=refunds")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "unknown_tab");
}

#[actix_web::test]
async fn purchase_history_lists_the_members_purchases() {
    let app = actix_test::init_service(screens_app()).await;
    let signed_in = actix_test::call_service(&app, login_request(MEMBER).to_request()).await;
    let cookie = session_cookie(&signed_in);
    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/dashboard/purchases")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(body["purchases"].as_array().map(Vec::len), Some(5));
    assert_eq!(body["purchases"][0]["title"], "Purchase #p1");
}

#[actix_web::test]
async fn admin_users_table_sorts_and_pages() {
    let app = actix_test::init_service(screens_app()).await;
    let signed_in = actix_test::call_service(&app, login_request(ADMIN).to_request()).await;
    let cookie = session_cookie(&signed_in);
    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/admin/users?sort=points&direction=desc")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let keys: Vec<&str> = body["table"]["body"]["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .filter_map(|row| row["key"].as_str())
        .collect();
    assert_eq!(keys, ["5", "12", "9", "3", "7"]);
    assert_eq!(body["table"]["pagination"]["totalPages"], 3);
    assert_eq!(body["tabs"][0]["active"], true);
}

#[actix_web::test]
async fn admin_users_table_rejects_unsortable_columns() {
    let app = actix_test::init_service(screens_app()).await;
    let signed_in = actix_test::call_service(&app, login_request(ADMIN).to_request()).await;
    let cookie = session_cookie(&signed_in);
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/admin/users?sort=status")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["code"], "not_sortable");
}

#[actix_web::test]
async fn admin_admins_tab_lists_administrators() {
    let app = actix_test::init_service(screens_app()).await;
    let signed_in = actix_test::call_service(&app, login_request(ADMIN).to_request()).await;
    let cookie = session_cookie(&signed_in);
    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/admin/admins")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(body["table"]["title"], "Administrator Management");
    assert_eq!(body["tabs"][1]["active"], true);
    assert_eq!(body["table"]["body"]["rows"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn unknown_paths_are_not_found() {
    let app = actix_test::init_service(screens_app()).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/settings").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["details"]["path"], "/settings");
}
