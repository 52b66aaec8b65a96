// tests/support/helpers.rs
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::Response;
use inkpost::application::services::ApplicationServices;
use inkpost::domain::user::{NewUser, PasswordHash, UserRepository, Username};
use inkpost::infrastructure::{repositories::InMemoryStore, util::DefaultSlugGenerator};
use inkpost::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use tower::util::ServiceExt as _;

use super::mocks::{self, FixedTokenManager, StrictPasswordHasher, SteppingClock};

/// Password shared by every seeded user.
pub const PASSWORD: &str = "correct horse";

/// Store with `alice` (id 1), `bob` (id 2) and the inactive `carol` (id 3).
pub async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    for (name, active) in [("alice", true), ("bob", true), ("carol", false)] {
        let mut user = NewUser::new(
            Username::new(name).expect("valid username"),
            PasswordHash::new(format!("hash::{PASSWORD}")).expect("valid hash"),
            mocks::fixed_now(),
        );
        user.is_active = active;
        store.insert(user).await.expect("seed user");
    }
    store
}

pub fn build_services(store: Arc<InMemoryStore>) -> Arc<ApplicationServices> {
    Arc::new(ApplicationServices::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(StrictPasswordHasher),
        Arc::new(FixedTokenManager),
        Arc::new(SteppingClock::default()),
        Arc::new(DefaultSlugGenerator),
    ))
}

pub async fn build_test_state() -> HttpState {
    HttpState {
        services: build_services(seeded_store().await),
        cookie_secure: false,
    }
}

pub async fn make_test_router() -> axum::Router {
    let state = build_test_state().await;
    build_router(state, &["http://localhost:3000".to_string()])
}

pub async fn send(app: &axum::Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("router error")
}

/// JSON request with an optional bearer token.
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request")
}

/// Browser-style form post with an optional session cookie.
pub fn form_request(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).expect("request")
}

pub fn page_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn session(token: &str) -> String {
    format!("inkpost_session={token}")
}

pub async fn json_body(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn text_body(resp: Response) -> String {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_owned))
        .collect()
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024).await.expect("read body");
    let ct = parts.headers.get("content-type").and_then(|v| v.to_str().ok()).unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {}", ct);
    let json: Value =
        serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {}", err_field);
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
