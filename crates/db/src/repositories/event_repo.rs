//! Repository for the `events` table.

use eventhub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventFilter, EventWithOwner, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, description, category, location, \
                       start_date, end_date, banner, created_at, updated_at";

/// Same columns qualified with the `e` alias, plus the owner's details.
const OWNER_COLUMNS: &str = "e.id, e.owner_id, e.title, e.description, e.category, e.location, \
                             e.start_date, e.end_date, e.banner, e.created_at, e.updated_at, \
                             u.full_name AS owner_name, u.email AS owner_email, \
                             u.college AS owner_college";

/// Provides CRUD and filtered listing for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (owner_id, title, description, category, location, start_date, end_date, banner)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(input.owner_id)
            .bind(input.title.trim())
            .bind(&input.description)
            .bind(input.category.as_str())
            .bind(&input.location)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.banner.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event together with its owner's name, email and college.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EventWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNER_COLUMNS} FROM events e \
             JOIN users u ON u.id = e.owner_id \
             WHERE e.id = $1"
        );
        sqlx::query_as::<_, EventWithOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events matching `filter`, soonest first.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
    ) -> Result<Vec<EventWithOwner>, sqlx::Error> {
        let (where_clause, bind_values) = build_event_filter(filter);
        let query = format!(
            "SELECT {OWNER_COLUMNS} FROM events e \
             JOIN users u ON u.id = e.owner_id \
             {where_clause} \
             ORDER BY e.start_date ASC, e.id ASC"
        );

        let mut q = sqlx::query_as::<_, EventWithOwner>(&query);
        for val in bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(v),
                BindValue::Text(v) => q.bind(v),
                BindValue::Timestamp(v) => q.bind(v),
            };
        }
        q.fetch_all(pool).await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                location = COALESCE($5, location),
                start_date = COALESCE($6, start_date),
                end_date = COALESCE($7, end_date),
                banner = COALESCE($8, banner)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(input.description.as_deref())
            .bind(input.category.map(|c| c.as_str()))
            .bind(input.location.as_deref())
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.banner.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete an event by ID. Registrations and feedback go with it.
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built event queries.
enum BindValue {
    BigInt(i64),
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from an [`EventFilter`].
///
/// The clause is empty if no filters are active, or starts with `WHERE `.
fn build_event_filter(filter: &EventFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(category) = filter.category {
        conditions.push(format!("e.category = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(category.as_str().to_string()));
    }

    if let Some(owner_id) = filter.owner_id {
        conditions.push(format!("e.owner_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(owner_id));
    }

    if let Some(location) = non_blank(&filter.location) {
        conditions.push(format!("e.location ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(contains_pattern(location)));
    }

    if let Some(title) = non_blank(&filter.title) {
        conditions.push(format!("e.title ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(contains_pattern(title)));
    }

    if let Some(after) = filter.starts_after {
        conditions.push(format!("e.start_date >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(after));
    }

    if let Some(before) = filter.starts_before {
        conditions.push(format!("e.start_date <= ${bind_idx}"));
        bind_values.push(BindValue::Timestamp(before));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (where_clause, bind_values)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// `%needle%` with LIKE metacharacters escaped.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_core::event::EventCategory;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (clause, binds) = build_event_filter(&EventFilter::default());
        assert!(clause.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn filters_are_numbered_in_order() {
        let filter = EventFilter {
            category: Some(EventCategory::Sports),
            location: Some("Main Hall".into()),
            owner_id: Some(3),
            ..Default::default()
        };
        let (clause, binds) = build_event_filter(&filter);
        assert_eq!(
            clause,
            "WHERE e.category = $1 AND e.owner_id = $2 AND e.location ILIKE $3"
        );
        assert_eq!(binds.len(), 3);
    }

    #[test]
    fn blank_text_filters_are_ignored() {
        let filter = EventFilter {
            title: Some("   ".into()),
            ..Default::default()
        };
        let (clause, _) = build_event_filter(&filter);
        assert!(clause.is_empty());
    }

    #[test]
    fn like_metacharacters_escaped() {
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }
}
