//! Feedback entity model and DTOs.

use eventhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub comments: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Feedback joined with its author's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FeedbackWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub feedback: Feedback,
    pub user_full_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub event_id: DbId,
    pub user_id: DbId,
    pub rating: i16,
    pub comments: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateFeedback {
    pub rating: Option<i16>,
    pub comments: Option<String>,
}
