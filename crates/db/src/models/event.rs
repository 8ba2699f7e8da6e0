//! Event entity model and DTOs.

use eventhub_core::event::EventCategory;
use eventhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub banner: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An event joined with its owning admin's public details.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_college: String,
}

/// DTO for creating a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub owner_id: DbId,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub banner: Option<String>,
}

/// DTO for updating an event. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub location: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub banner: Option<String>,
}

/// Filters for listing events. All are optional and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub owner_id: Option<DbId>,
    /// Case-insensitive substring match on location.
    pub location: Option<String>,
    /// Case-insensitive substring match on title.
    pub title: Option<String>,
    /// Lower bound on `start_date`.
    pub starts_after: Option<Timestamp>,
    /// Upper bound on `start_date`.
    pub starts_before: Option<Timestamp>,
}
