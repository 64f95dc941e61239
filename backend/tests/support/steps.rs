//! Step definitions shared by the console behaviour suites.

use actix_web::http::Method;
use rstest_bdd_macros::{given, then, when};
use serde_json::Value;

use crate::harness::{WorldFixture, last_body, last_status, send, sign_in};

#[given("a running console")]
fn a_running_console(world: &WorldFixture) {
    let _ = world;
}

#[given("the visitor is signed in as {email} with {password}")]
fn the_visitor_is_signed_in(world: &WorldFixture, email: String, password: String) {
    let world = world.world();
    sign_in(&world, &email, &password);
    assert_eq!(last_status(&world), Some(200), "sign-in should succeed");
}

#[when("the visitor opens {path}")]
fn the_visitor_opens(world: &WorldFixture, path: String) {
    send(&world.world(), Method::GET, &path, None);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &WorldFixture, status: u16) {
    assert_eq!(last_status(&world.world()), Some(status));
}

#[then("the visitor is redirected to {path}")]
fn the_visitor_is_redirected_to(world: &WorldFixture, path: String) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last.status, Some(303));
    assert_eq!(ctx.last.location.as_deref(), Some(path.as_str()));
}

#[then("the session endpoint reports no identity")]
fn the_session_endpoint_reports_no_identity(world: &WorldFixture) {
    let world = world.world();
    send(&world, Method::GET, "/api/v1/session", None);
    assert_eq!(last_status(&world), Some(200));
    assert_eq!(last_body(&world).get("identity"), Some(&Value::Null));
}
