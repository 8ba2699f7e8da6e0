//! Integration tests for the health probe and the shared middleware stack.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let generated = response.headers().get("x-request-id").unwrap();
    assert_eq!(generated.to_str().unwrap().len(), 36);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "eventhub-api");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
    assert!(json["db_latency_ms"].is_u64());
    assert_eq!(json["ticket_admin_preview"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ticket_preview_setting(pool: PgPool) {
    let mut config = common::test_config();
    config.ticket_admin_preview = false;
    let app = common::build_test_app_with(pool, config);

    let json = body_json(get(app, "/health").await).await;
    assert_eq!(json["ticket_admin_preview"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn closed_pool_reports_degraded(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    pool.close().await;

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["db_healthy"], false);
    assert!(json["db_latency_ms"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn client_request_id_is_echoed(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "door-scanner-7")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "door-scanner-7");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cross_origin_reads_can_see_ticket_filename(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("Origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers["access-control-allow-origin"],
        "http://localhost:5173"
    );
    let exposed = headers["access-control-expose-headers"]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("content-disposition"), "exposed: {exposed}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn preflight_allows_registration_updates(pool: PgPool) {
    let app = common::build_test_app(pool);
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/registrations/manage")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "authorization,content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let methods = response.headers()["access-control-allow-methods"]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("PUT"), "allowed: {methods}");
}
