//! Repository for the `registrations` table.
//!
//! Role scoping is applied in SQL: [`RegistrationRepo::list_scoped`] turns a
//! [`RegistrationScope`] into a WHERE predicate so rows outside the actor's
//! visibility are never loaded.

use eventhub_core::authz::RegistrationScope;
use eventhub_core::registration::{RegistrationStatus, STATUS_PENDING};
use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::registration::{Registration, RegistrationDetail};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, user_id, status, created_at, updated_at";

/// Registration columns joined with event and registrant fields.
const DETAIL_COLUMNS: &str = "r.id, r.event_id, r.user_id, r.status, r.created_at, r.updated_at, \
                              e.title AS event_title, e.category AS event_category, \
                              e.location AS event_location, e.start_date AS event_start_date, \
                              e.end_date AS event_end_date, \
                              COALESCE(e.owner_id, 0) AS event_owner_id, \
                              u.full_name AS user_full_name, u.email AS user_email, \
                              u.college AS user_college";

const DETAIL_FROM: &str = "FROM registrations r \
                           LEFT JOIN events e ON e.id = r.event_id \
                           LEFT JOIN users u ON u.id = r.user_id";

/// Provides lifecycle operations for registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert a new `pending` registration.
    ///
    /// A second registration for the same `(event, user)` fails with a unique
    /// violation on `uq_registrations_event_user`.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (event_id, user_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(event_id)
            .bind(user_id)
            .bind(STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE id = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a registration with its event and registrant resolved.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RegistrationDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE r.id = $1");
        sqlx::query_as::<_, RegistrationDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the registration of `user_id` for `event_id`, if any.
    pub async fn find_for_user_event(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations WHERE user_id = $1 AND event_id = $2"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// List the registrations visible under `scope`, newest first.
    pub async fn list_scoped(
        pool: &PgPool,
        scope: RegistrationScope,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        let order = "ORDER BY r.created_at DESC, r.id DESC";
        match scope {
            RegistrationScope::All => {
                let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} {order}");
                sqlx::query_as::<_, RegistrationDetail>(&query)
                    .fetch_all(pool)
                    .await
            }
            RegistrationScope::EventsOwnedBy(owner_id) => {
                let query =
                    format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE e.owner_id = $1 {order}");
                sqlx::query_as::<_, RegistrationDetail>(&query)
                    .bind(owner_id)
                    .fetch_all(pool)
                    .await
            }
            RegistrationScope::RegisteredBy(user_id) => {
                let query =
                    format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE r.user_id = $1 {order}");
                sqlx::query_as::<_, RegistrationDetail>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// List all registrations of one event, oldest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<RegistrationDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE r.event_id = $1 \
             ORDER BY r.created_at ASC, r.id ASC"
        );
        sqlx::query_as::<_, RegistrationDetail>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Move a pending registration to `status`.
    ///
    /// The update only matches while the row is still `pending`, so of two
    /// concurrent decisions exactly one succeeds. Returns `None` when the row
    /// is gone or already decided.
    pub async fn decide(
        pool: &PgPool,
        id: DbId,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE registrations SET status = $2
             WHERE id = $1 AND status = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Delete a registration by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
