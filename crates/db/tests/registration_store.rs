//! Integration tests for the registration store.
//!
//! Exercises the repository layer against a real database:
//! - One registration per (event, user) via the unique index
//! - Conditional pending -> decided update
//! - Role-scoped listing pushed into SQL
//! - Cascade delete from events
//! - Admin log scoping

use chrono::{Duration, Utc};
use eventhub_core::authz::RegistrationScope;
use eventhub_core::event::EventCategory;
use eventhub_core::registration::RegistrationStatus;
use eventhub_core::roles::AccountType;
use eventhub_db::models::admin_log::{AdminLogQuery, CreateAdminLog};
use eventhub_db::models::event::{CreateEvent, Event, EventFilter};
use eventhub_db::models::feedback::CreateFeedback;
use eventhub_db::models::user::{CreateUser, User};
use eventhub_db::repositories::{
    AdminLogRepo, EventRepo, FeedbackRepo, RegistrationRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str, account_type: AccountType) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            full_name: format!("User {email}"),
            email: email.to_string(),
            college: "North Campus".to_string(),
            account_type,
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn seed_event(pool: &PgPool, owner_id: i64, title: &str) -> Event {
    let start = Utc::now() + Duration::days(7);
    EventRepo::create(
        pool,
        &CreateEvent {
            owner_id,
            title: title.to_string(),
            description: "Seeded".to_string(),
            category: EventCategory::Hackathon,
            location: "Main Hall".to_string(),
            start_date: start,
            end_date: start + Duration::hours(6),
            banner: None,
        },
    )
    .await
    .unwrap()
}

fn unique_violation_constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            db.constraint().map(str::to_string)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_is_unique_case_insensitively(pool: PgPool) {
    let user = seed_user(&pool, "Asha@Uni.edu", AccountType::Student).await;
    assert_eq!(user.email, "asha@uni.edu");

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            full_name: "Other".into(),
            email: "ASHA@uni.edu".into(),
            college: "South".into(),
            account_type: AccountType::Student,
            password_hash: "x".into(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(unique_violation_constraint(&err).as_deref(), Some("uq_users_email"));

    let found = UserRepo::find_by_email(&pool, "asha@UNI.edu").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_registration_hits_unique_index(pool: PgPool) {
    let admin = seed_user(&pool, "admin@uni.edu", AccountType::CollegeAdmin).await;
    let student = seed_user(&pool, "s1@uni.edu", AccountType::Student).await;
    let event = seed_event(&pool, admin.id, "Hack Night").await;

    let first = RegistrationRepo::create(&pool, event.id, student.id).await.unwrap();
    assert_eq!(first.status().unwrap(), RegistrationStatus::Pending);

    let err = RegistrationRepo::create(&pool, event.id, student.id)
        .await
        .unwrap_err();
    assert_eq!(
        unique_violation_constraint(&err).as_deref(),
        Some("uq_registrations_event_user")
    );

    let existing = RegistrationRepo::find_for_user_event(&pool, student.id, event.id)
        .await
        .unwrap();
    assert_eq!(existing.map(|r| r.id), Some(first.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decide_only_applies_to_pending(pool: PgPool) {
    let admin = seed_user(&pool, "admin@uni.edu", AccountType::CollegeAdmin).await;
    let student = seed_user(&pool, "s1@uni.edu", AccountType::Student).await;
    let event = seed_event(&pool, admin.id, "Hack Night").await;
    let reg = RegistrationRepo::create(&pool, event.id, student.id).await.unwrap();

    let approved = RegistrationRepo::decide(&pool, reg.id, RegistrationStatus::Approved)
        .await
        .unwrap()
        .expect("pending row should be updated");
    assert_eq!(approved.status().unwrap(), RegistrationStatus::Approved);

    let second = RegistrationRepo::decide(&pool, reg.id, RegistrationStatus::Rejected)
        .await
        .unwrap();
    assert!(second.is_none(), "decided registrations must not change again");

    let stored = RegistrationRepo::find_by_id(&pool, reg.id).await.unwrap().unwrap();
    assert_eq!(stored.status().unwrap(), RegistrationStatus::Approved);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn scoped_listing_filters_in_sql(pool: PgPool) {
    let admin_a = seed_user(&pool, "a@uni.edu", AccountType::CollegeAdmin).await;
    let admin_b = seed_user(&pool, "b@uni.edu", AccountType::CollegeAdmin).await;
    let s1 = seed_user(&pool, "s1@uni.edu", AccountType::Student).await;
    let s2 = seed_user(&pool, "s2@uni.edu", AccountType::Student).await;
    let event_a = seed_event(&pool, admin_a.id, "A's Event").await;
    let event_b = seed_event(&pool, admin_b.id, "B's Event").await;

    RegistrationRepo::create(&pool, event_a.id, s1.id).await.unwrap();
    RegistrationRepo::create(&pool, event_b.id, s1.id).await.unwrap();
    RegistrationRepo::create(&pool, event_b.id, s2.id).await.unwrap();

    let all = RegistrationRepo::list_scoped(&pool, RegistrationScope::All)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let owned_by_a = RegistrationRepo::list_scoped(&pool, RegistrationScope::EventsOwnedBy(admin_a.id))
        .await
        .unwrap();
    assert_eq!(owned_by_a.len(), 1);
    assert_eq!(owned_by_a[0].event_title.as_deref(), Some("A's Event"));
    assert_eq!(owned_by_a[0].event_owner_id, admin_a.id);

    let mine = RegistrationRepo::list_scoped(&pool, RegistrationScope::RegisteredBy(s2.id))
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_email.as_deref(), Some("s2@uni.edu"));

    let for_b = RegistrationRepo::list_for_event(&pool, event_b.id).await.unwrap();
    assert_eq!(for_b.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_carries_ticket_fields(pool: PgPool) {
    let admin = seed_user(&pool, "admin@uni.edu", AccountType::CollegeAdmin).await;
    let student = seed_user(&pool, "s1@uni.edu", AccountType::Student).await;
    let event = seed_event(&pool, admin.id, "Hack Night").await;
    let reg = RegistrationRepo::create(&pool, event.id, student.id).await.unwrap();

    let detail = RegistrationRepo::find_detail(&pool, reg.id).await.unwrap().unwrap();
    let facts = detail.facts().unwrap();
    assert_eq!(facts.registrant_id, student.id);
    assert_eq!(facts.event_owner_id, admin.id);

    let ticket = detail.ticket_data().unwrap();
    assert_eq!(ticket.event_title.as_deref(), Some("Hack Night"));
    assert_eq!(ticket.event_category.as_deref(), Some("hackathon"));
    assert_eq!(ticket.attendee_college.as_deref(), Some("North Campus"));
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_event_cascades(pool: PgPool) {
    let admin = seed_user(&pool, "admin@uni.edu", AccountType::CollegeAdmin).await;
    let student = seed_user(&pool, "s1@uni.edu", AccountType::Student).await;
    let event = seed_event(&pool, admin.id, "Hack Night").await;
    let reg = RegistrationRepo::create(&pool, event.id, student.id).await.unwrap();
    let fb = FeedbackRepo::create(
        &pool,
        &CreateFeedback {
            event_id: event.id,
            user_id: student.id,
            rating: 5,
            comments: "Great".into(),
        },
    )
    .await
    .unwrap();

    assert!(EventRepo::delete(&pool, event.id).await.unwrap());

    assert!(RegistrationRepo::find_by_id(&pool, reg.id).await.unwrap().is_none());
    assert!(FeedbackRepo::find_by_id(&pool, fb.id).await.unwrap().is_none());
    assert!(!EventRepo::delete(&pool, event.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn event_filters_and_ordering(pool: PgPool) {
    let admin = seed_user(&pool, "admin@uni.edu", AccountType::CollegeAdmin).await;
    let later = seed_event(&pool, admin.id, "Later Hackathon").await;
    let start = Utc::now() + Duration::days(1);
    let sooner = EventRepo::create(
        &pool,
        &CreateEvent {
            owner_id: admin.id,
            title: "Football Final".into(),
            description: String::new(),
            category: EventCategory::Sports,
            location: "North Field".into(),
            start_date: start,
            end_date: start + Duration::hours(2),
            banner: None,
        },
    )
    .await
    .unwrap();

    let all = EventRepo::list(&pool, &EventFilter::default()).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|e| e.event.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);

    let sports = EventRepo::list(
        &pool,
        &EventFilter {
            category: Some(EventCategory::Sports),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(sports.len(), 1);
    assert_eq!(sports[0].owner_email, "admin@uni.edu");

    let by_location = EventRepo::list(
        &pool,
        &EventFilter {
            location: Some("north".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].event.id, sooner.id);
}

// ---------------------------------------------------------------------------
// Admin logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_log_lists_every_actor_and_filters(pool: PgPool) {
    let admin = seed_user(&pool, "admin@uni.edu", AccountType::CollegeAdmin).await;
    let student = seed_user(&pool, "s1@uni.edu", AccountType::Student).await;

    for (user_id, action) in [(admin.id, "Created event"), (student.id, "Registered")] {
        AdminLogRepo::create(
            &pool,
            &CreateAdminLog {
                user_id,
                action: action.to_string(),
            },
        )
        .await
        .unwrap();
    }

    let all = AdminLogRepo::list(&pool, &AdminLogQuery::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].log.action, "Registered", "newest first");
    assert_eq!(all[1].user_email.as_deref(), Some("admin@uni.edu"));

    let by_student = AdminLogRepo::list(
        &pool,
        &AdminLogQuery {
            user_id: Some(student.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_student.len(), 1);
    assert_eq!(by_student[0].log.user_id, student.id);

    let second_page = AdminLogRepo::list(
        &pool,
        &AdminLogQuery {
            limit: Some(1),
            offset: Some(1),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].log.action, "Created event");
}
