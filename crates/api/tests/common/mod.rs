#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use eventhub_api::auth::jwt::{generate_access_token, JwtConfig};
use eventhub_api::config::ServerConfig;
use eventhub_api::router::build_app_router;
use eventhub_api::state::AppState;
use eventhub_core::event::EventCategory;
use eventhub_core::roles::AccountType;
use eventhub_db::models::event::{CreateEvent, Event};
use eventhub_db::models::user::{CreateUser, User};
use eventhub_db::repositories::{EventRepo, UserRepo};

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig::with_jwt(JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 60,
    })
}

/// Build the full application router, using the given database pool.
///
/// Goes through [`build_app_router`] so tests exercise the production
/// middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
    };
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// A seeded account and a valid bearer token for it.
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

/// Insert a user directly and mint a token for it. The password hash is a
/// placeholder; use the signup endpoint when a test needs to sign in.
pub async fn seed_user(pool: &PgPool, name: &str, account_type: AccountType) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            full_name: name.to_string(),
            email: format!("{}@campus.edu", name.to_lowercase().replace(' ', ".")),
            college: "North Campus".to_string(),
            account_type,
            password_hash: "unused".to_string(),
        },
    )
    .await
    .expect("seed user");
    let token = generate_access_token(user.id, account_type.as_str(), &test_config().jwt)
        .expect("token generation");
    TestUser { user, token }
}

pub async fn seed_event(pool: &PgPool, owner_id: i64, title: &str) -> Event {
    let start = Utc::now() + Duration::days(10);
    EventRepo::create(
        pool,
        &CreateEvent {
            owner_id,
            title: title.to_string(),
            description: "Seeded event".to_string(),
            category: EventCategory::Hackathon,
            location: "Main Hall".to_string(),
            start_date: start,
            end_date: start + Duration::hours(8),
            banner: None,
        },
    )
    .await
    .expect("seed event")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body is not valid JSON")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes()
        .to_vec()
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request failed")
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut b = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        b = b.header("authorization", format!("Bearer {token}"));
    }
    b
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder("GET", uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder("GET", uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    json_request(app, "POST", uri, None, body).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    json_request(app, "POST", uri, Some(token), body).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    json_request(app, "PUT", uri, Some(token), body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, builder("DELETE", uri, Some(token)).body(Body::empty()).unwrap()).await
}

async fn json_request(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response {
    let request = builder(method, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response, status: StatusCode) -> Value {
    let actual = response.status();
    let json = body_json(response).await;
    assert_eq!(actual, status, "unexpected status, body: {json}");
    json
}
