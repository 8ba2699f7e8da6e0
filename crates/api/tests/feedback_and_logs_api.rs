//! Integration tests for feedback and the admin log endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    delete_auth, expect_json, get, get_auth, post_json_auth, put_json_auth, seed_event, seed_user,
};
use eventhub_core::roles::AccountType;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_lifecycle_respects_authorship(pool: PgPool) {
    let admin = seed_user(&pool, "Admin", AccountType::CollegeAdmin).await;
    let author = seed_user(&pool, "Author", AccountType::Student).await;
    let other = seed_user(&pool, "Other", AccountType::Student).await;
    let event = seed_event(&pool, admin.id(), "Workshop").await;
    let app = common::build_test_app(pool);

    let created = post_json_auth(
        app.clone(),
        "/api/v1/feedback",
        json!({ "event_id": event.id, "rating": 4, "comments": "Useful" }),
        &author.token,
    )
    .await;
    let json = expect_json(created, StatusCode::CREATED).await;
    let feedback_id = json["data"]["id"].as_i64().unwrap();

    let listed = expect_json(
        get(app.clone(), &format!("/api/v1/feedback?event_id={}", event.id)).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(listed["data"][0]["user_full_name"], "Author");

    let uri = format!("/api/v1/feedback/{feedback_id}");
    let hijack = put_json_auth(app.clone(), &uri, json!({ "rating": 1 }), &other.token).await;
    assert_eq!(hijack.status(), StatusCode::FORBIDDEN);

    let edited = put_json_auth(app.clone(), &uri, json!({ "rating": 5 }), &author.token).await;
    let json = expect_json(edited, StatusCode::OK).await;
    assert_eq!(json["data"]["rating"], 5);
    assert_eq!(json["data"]["comments"], "Useful");

    let deleted = delete_auth(app, &uri, &author.token).await;
    assert_eq!(deleted.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_is_validated(pool: PgPool) {
    let admin = seed_user(&pool, "Admin", AccountType::CollegeAdmin).await;
    let student = seed_user(&pool, "Student", AccountType::Student).await;
    let event = seed_event(&pool, admin.id(), "Workshop").await;
    let app = common::build_test_app(pool);

    let out_of_range = post_json_auth(
        app.clone(),
        "/api/v1/feedback",
        json!({ "event_id": event.id, "rating": 9, "comments": "Wow" }),
        &student.token,
    )
    .await;
    assert_eq!(out_of_range.status(), StatusCode::BAD_REQUEST);

    let no_event = post_json_auth(
        app.clone(),
        "/api/v1/feedback",
        json!({ "event_id": 424242, "rating": 3, "comments": "Where?" }),
        &student.token,
    )
    .await;
    assert_eq!(no_event.status(), StatusCode::NOT_FOUND);

    let missing_filter = expect_json(get(app, "/api/v1/feedback").await, StatusCode::BAD_REQUEST).await;
    assert_eq!(missing_filter["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Admin logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn audit_log_is_readable_by_every_admin(pool: PgPool) {
    let m1 = seed_user(&pool, "Admin One", AccountType::CollegeAdmin).await;
    let m2 = seed_user(&pool, "Admin Two", AccountType::CollegeAdmin).await;
    let root = seed_user(&pool, "Root", AccountType::SuperAdmin).await;
    let student = seed_user(&pool, "Student", AccountType::Student).await;
    let event = seed_event(&pool, m1.id(), "Robotics Meetup").await;
    let app = common::build_test_app(pool);

    let registered = post_json_auth(
        app.clone(),
        "/api/v1/registrations",
        json!({ "event_id": event.id }),
        &student.token,
    )
    .await;
    assert_eq!(registered.status(), StatusCode::CREATED);

    let manual = post_json_auth(
        app.clone(),
        "/api/v1/adminlogs",
        json!({ "action": "Closed registrations" }),
        &m2.token,
    )
    .await;
    assert_eq!(manual.status(), StatusCode::CREATED);

    let student_write = post_json_auth(
        app.clone(),
        "/api/v1/adminlogs",
        json!({ "action": "Hello" }),
        &student.token,
    )
    .await;
    assert_eq!(student_write.status(), StatusCode::FORBIDDEN);

    let student_read = get_auth(app.clone(), "/api/v1/adminlogs", &student.token).await;
    assert_eq!(student_read.status(), StatusCode::FORBIDDEN);

    // The owning admin sees the student's entry as well as other admins' entries.
    for admin in [&m1, &m2, &root] {
        let json = expect_json(
            get_auth(app.clone(), "/api/v1/adminlogs", &admin.token).await,
            StatusCode::OK,
        )
        .await;
        let entries = json["data"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["action"], "Closed registrations");
        assert_eq!(entries[1]["action"], "Registered for event \"Robotics Meetup\"");
        assert_eq!(entries[1]["user_email"], "student@campus.edu");
    }

    let by_student = expect_json(
        get_auth(
            app.clone(),
            &format!("/api/v1/adminlogs?user_id={}", student.id()),
            &m1.token,
        )
        .await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(by_student["data"].as_array().unwrap().len(), 1);

    let paged = expect_json(
        get_auth(app.clone(), "/api/v1/adminlogs?limit=1&offset=1", &root.token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(paged["data"].as_array().unwrap().len(), 1);
    assert_eq!(paged["data"][0]["user_id"], student.id());

    let blank = post_json_auth(app, "/api/v1/adminlogs", json!({ "action": "  " }), &m1.token).await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
}
