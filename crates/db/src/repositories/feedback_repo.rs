//! Repository for the `feedback` table.

use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{CreateFeedback, Feedback, FeedbackWithAuthor, UpdateFeedback};

const COLUMNS: &str = "id, event_id, user_id, rating, comments, created_at, updated_at";

/// Provides CRUD operations for event feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (event_id, user_id, rating, comments)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(input.event_id)
            .bind(input.user_id)
            .bind(input.rating)
            .bind(input.comments.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback WHERE id = $1");
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List feedback for an event with author names, newest first.
    pub async fn list_for_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<FeedbackWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackWithAuthor>(
            "SELECT f.id, f.event_id, f.user_id, f.rating, f.comments, f.created_at, \
                    f.updated_at, u.full_name AS user_full_name \
             FROM feedback f \
             LEFT JOIN users u ON u.id = f.user_id \
             WHERE f.event_id = $1 \
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
    }

    /// Update feedback. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFeedback,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "UPDATE feedback SET
                rating = COALESCE($2, rating),
                comments = COALESCE($3, comments)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(input.comments.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete feedback by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
