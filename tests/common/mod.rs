#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use tasklist::config::Config;
use tasklist::db::TodoStorage;
use tasklist::router::{TasklistState, tasklist_router};

pub const TEST_SECRET: &str = "0123456789abcdef0123456789abcdef";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        secret_key: TEST_SECRET.to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        loglevel: "info".to_string(),
        // minimum bcrypt cost keeps the auth tests fast
        bcrypt_cost: 4,
    }
}

/// Storage over a private in-memory database. The pool is pinned to a
/// single immortal connection because an in-memory sqlite database lives and
/// dies with its connection.
pub async fn test_storage() -> TodoStorage {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");
    let storage = TodoStorage::new(pool);
    storage.init_schema().await.expect("failed to init schema");
    storage
}

pub async fn test_app() -> Router {
    test_app_with_secret(TEST_SECRET).await
}

pub async fn test_app_with_secret(secret: &str) -> Router {
    let mut cfg = test_config();
    cfg.secret_key = secret.to_string();
    let state = TasklistState::new(test_storage().await, &cfg);
    tasklist_router(state)
}

/// One request against the router. `cookie` is sent verbatim as the Cookie
/// header; a JSON body brings its content-type along.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    app.clone().oneshot(request).await.expect("request failed")
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not json")
}

/// The `name=value` pair of the session cookie the response sets, ready to
/// echo back in a Cookie header.
pub fn session_cookie(resp: &Response) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .expect("no set-cookie header")
        .to_str()
        .expect("set-cookie was not utf-8")
        .split(';')
        .next()
        .expect("empty set-cookie header")
        .to_string()
}

pub async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let resp = send(
        app,
        "POST",
        "/register",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(
        app,
        "POST",
        "/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    session_cookie(&resp)
}

/// Create a todo and hand back its JSON representation.
pub async fn create_todo(app: &Router, cookie: &str, body: Value) -> Value {
    let resp = send(app, "POST", "/create_todo", Some(cookie), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}
