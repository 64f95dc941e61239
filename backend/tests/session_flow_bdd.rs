//! Behaviour tests for signing in, registering and signing out.
//!
//! These scenarios drive a real server over HTTP so the session cookie makes
//! the same round trip a browser would.
//
// rstest-bdd generates guard variables with double underscores, which trips
// the non_snake_case lint under -D warnings.
#![allow(non_snake_case)]

// Shared harness has helpers unused by some suites.
#[allow(dead_code)]
#[path = "support/harness.rs"]
mod harness;
#[path = "support/steps.rs"]
mod steps;

use actix_web::http::Method;
use harness::{WorldFixture, last_body, send, sign_in};
use rstest::fixture;
use rstest_bdd_macros::{scenario, then, when};
use serde_json::{Value, json};

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn session_identity(world: &WorldFixture) -> Value {
    let world = world.world();
    send(&world, Method::GET, "/api/v1/session", None);
    last_body(&world)
        .get("identity")
        .cloned()
        .expect("identity field")
}

#[when("the visitor signs in as {email} with {password}")]
fn the_visitor_signs_in(world: &WorldFixture, email: String, password: String) {
    sign_in(&world.world(), &email, &password);
}

#[when("the visitor signs out")]
fn the_visitor_signs_out(world: &WorldFixture) {
    send(&world.world(), Method::POST, "/api/v1/logout", None);
}

#[when("the visitor registers as {name} with email {email}")]
fn the_visitor_registers(world: &WorldFixture, name: String, email: String) {
    send(
        &world.world(),
        Method::POST,
        "/api/v1/register",
        Some(json!({
            "name": name,
            "email": email,
            "password": "espresso",
            "confirmPassword": "espresso"
        })),
    );
}

#[when("the visitor renames their profile to {name}")]
fn the_visitor_renames_their_profile(world: &WorldFixture, name: String) {
    send(
        &world.world(),
        Method::PUT,
        "/api/v1/profile",
        Some(json!({ "name": name, "email": "user@pergamino.com" })),
    );
}

#[then("the session identity has role {role}")]
fn the_session_identity_has_role(world: &WorldFixture, role: String) {
    let body = last_body(&world.world());
    assert_eq!(
        body.pointer("/identity/role").and_then(Value::as_str),
        Some(role.as_str())
    );
}

#[then("the landing screen is {path}")]
fn the_landing_screen_is(world: &WorldFixture, path: String) {
    let body = last_body(&world.world());
    assert_eq!(body.get("home").and_then(Value::as_str), Some(path.as_str()));
}

#[then("the identity has {points} points and {spent} points spent")]
fn the_identity_has_balances(world: &WorldFixture, points: u64, spent: u64) {
    let body = last_body(&world.world());
    assert_eq!(body.pointer("/identity/points").and_then(Value::as_u64), Some(points));
    assert_eq!(
        body.pointer("/identity/pointsSpent").and_then(Value::as_u64),
        Some(spent)
    );
}

#[then("the response is unauthorised with a trace id")]
fn the_response_is_unauthorised_with_a_trace_id(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.last.status, Some(401));

    let trace_id = ctx.last.trace_id.as_deref().expect("trace id header");
    let body = ctx.last.body.as_ref().expect("error body");
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(trace_id));
    assert_eq!(
        body.get("message").and_then(Value::as_str),
        Some("Invalid email or password")
    );
}

#[then("the session identity is named {name}")]
fn the_session_identity_is_named(world: &WorldFixture, name: String) {
    let identity = session_identity(world);
    assert_eq!(identity.get("name").and_then(Value::as_str), Some(name.as_str()));
    assert_eq!(identity.get("points").and_then(Value::as_u64), Some(150));
}

#[scenario(path = "tests/features/session_flow.feature")]
fn session_flow_scenarios(world: WorldFixture) {
    drop(world);
}
