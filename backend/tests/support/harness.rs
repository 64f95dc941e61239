//! Server harness and shared world for console behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite, time::Duration as CookieDuration};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

use pergamino::Trace;
use pergamino::domain::ports::{FixtureLoginService, FixtureRegistrationService};
use pergamino::domain::{AccountService, LoyaltyService, SeedRecords, TRACE_ID_HEADER};
use pergamino::inbound::http::configure_api;
use pergamino::inbound::http::screens;
use pergamino::inbound::http::state::{HttpState, HttpStatePorts};
use pergamino::outbound::memory::InMemoryRecordStore;

/// Last response observed by a scenario.
#[derive(Debug, Default)]
pub(crate) struct Observed {
    pub(crate) status: Option<u16>,
    pub(crate) location: Option<String>,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Option<Value>,
}

pub(crate) struct ConsoleWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) session_cookie: Option<String>,
    pub(crate) last: Observed,
}

pub(crate) type SharedWorld = Rc<RefCell<ConsoleWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

fn test_session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

fn seeded_state() -> HttpState {
    let records = SeedRecords::bundled().expect("bundled fixture");
    let store = Arc::new(InMemoryRecordStore::from_seed(records));
    let accounts = Arc::new(AccountService::new(store.clone()));
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService::default()),
        registration: Arc::new(FixtureRegistrationService::default()),
        users: accounts.clone(),
        admins: accounts.clone(),
        profile: accounts,
        loyalty: Arc::new(LoyaltyService::new(store)),
    })
}

async fn spawn_console_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let key = Key::generate();
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(test_session_middleware(key.clone()))
            .wrap(Trace)
            .service(web::scope("/api/v1").configure(configure_api))
            .configure(screens::configure)
            .default_service(web::to(screens::not_found))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

/// Start a console server over the bundled records.
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let (base_url, server) = local
        .block_on(&runtime, spawn_console_server(seeded_state()))
        .expect("console server should start");

    WorldFixture {
        world: Rc::new(RefCell::new(ConsoleWorld {
            runtime,
            local,
            base_url,
            server,
            session_cookie: None,
            last: Observed::default(),
        })),
    }
}

fn header_value(headers: &header::HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Send a request carrying the stored session cookie and record the outcome.
///
/// A `Set-Cookie` on the response replaces the stored cookie, mirroring a
/// browser.
pub(crate) fn send(world: &SharedWorld, method: Method, path: &str, payload: Option<Value>) {
    let cookie = world.borrow().session_cookie.clone();
    let path = path.to_owned();
    let (observed, set_cookie) = with_world_async(world, |base_url| async move {
        let client = Client::builder().disable_redirects().finish();
        let mut request = client.request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await,
            None => request.send().await,
        }
        .expect("console request");

        let headers = response.headers().clone();
        let bytes = response.body().await.expect("response body");
        let body = (!bytes.is_empty())
            .then(|| serde_json::from_slice::<Value>(&bytes).expect("json body"));
        let observed = Observed {
            status: Some(response.status().as_u16()),
            location: header_value(&headers, header::LOCATION),
            trace_id: header_value(&headers, TRACE_ID_HEADER),
            body,
        };
        (observed, header_value(&headers, header::SET_COOKIE))
    });

    let mut ctx = world.borrow_mut();
    if let Some(set_cookie) = set_cookie {
        let pair = set_cookie.split(';').next().unwrap_or_default().to_owned();
        ctx.session_cookie = Some(pair);
    }
    ctx.last = observed;
}

/// Sign in through the JSON action, keeping the issued cookie.
pub(crate) fn sign_in(world: &SharedWorld, email: &str, password: &str) {
    send(
        world,
        Method::POST,
        "/api/v1/login",
        Some(serde_json::json!({ "email": email, "password": password })),
    );
}

pub(crate) fn last_status(world: &SharedWorld) -> Option<u16> {
    world.borrow().last.status
}

pub(crate) fn last_body(world: &SharedWorld) -> Value {
    world.borrow().last.body.clone().expect("response body")
}
