//! Handlers for the `/events` resource.
//!
//! Events are readable by anyone. Creation requires an event manager;
//! updates and deletes require the owning admin or a super-admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use eventhub_core::authz;
use eventhub_core::error::CoreError;
use eventhub_core::event::{validate_schedule, validate_title, EventCategory};
use eventhub_core::types::{parse_db_id, DbId, Timestamp};
use eventhub_db::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};
use eventhub_db::repositories::EventRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEventManager;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub location: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub banner: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub banner: Option<String>,
}

/// Query parameters for `GET /events`.
///
/// `owner` is either `me` (requires a token) or a numeric user id. The date
/// bounds accept RFC 3339 timestamps or plain `YYYY-MM-DD` dates.
#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub category: Option<String>,
    pub owner: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fetch an event by ID and verify the caller may modify it.
async fn find_and_authorize(
    pool: &sqlx::PgPool,
    event_id: DbId,
    auth: &AuthUser,
) -> AppResult<Event> {
    let event = EventRepo::find_by_id(pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Event", event_id)))?;

    authz::authorize_event_mutation(&auth.actor(), event.owner_id)?;
    Ok(event)
}

/// Parse a date bound. A bare date is midnight UTC for a lower bound and the
/// last instant of that day for an upper bound.
fn parse_date_bound(raw: &str, field: &str, end_of_day: bool) -> Result<Timestamp, CoreError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "Invalid {field} '{raw}'. Expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })?;
    let time = if end_of_day {
        date.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    time.map(|t| t.and_utc())
        .ok_or_else(|| CoreError::Validation(format!("Invalid {field} '{raw}'")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/events
///
/// Create an event owned by the caller. Returns 201 with the created event.
pub async fn create_event(
    State(state): State<AppState>,
    RequireEventManager(auth): RequireEventManager,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title)?;
    validate_schedule(input.start_date, input.end_date)?;
    let category: EventCategory = input.category.parse()?;

    let event = EventRepo::create(
        &state.pool,
        &CreateEvent {
            owner_id: auth.user_id,
            title: input.title,
            description: input.description,
            category,
            location: input.location,
            start_date: input.start_date,
            end_date: input.end_date,
            banner: non_empty(input.banner),
        },
    )
    .await?;

    tracing::info!(
        event_id = event.id,
        owner_id = auth.user_id,
        category = %category,
        "Event created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// GET /api/v1/events
///
/// List events soonest first. Public; `owner=me` needs a token.
pub async fn list_events(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let category = match non_empty(params.category) {
        Some(raw) => Some(raw.parse::<EventCategory>()?),
        None => None,
    };

    let owner_id = match non_empty(params.owner).as_deref().map(str::trim) {
        Some("me") => Some(
            auth.as_ref()
                .map(|a| a.user_id)
                .ok_or(AppError::Core(CoreError::Unauthorized(
                    "owner=me requires authentication".into(),
                )))?,
        ),
        Some(raw) => Some(parse_db_id(raw, "owner")?),
        None => None,
    };

    let starts_after = match non_empty(params.start_date) {
        Some(raw) => Some(parse_date_bound(&raw, "start_date", false)?),
        None => None,
    };
    let starts_before = match non_empty(params.end_date) {
        Some(raw) => Some(parse_date_bound(&raw, "end_date", true)?),
        None => None,
    };

    let filter = EventFilter {
        category,
        owner_id,
        location: params.location,
        title: params.title,
        starts_after,
        starts_before,
    };

    let events = EventRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event_id = parse_db_id(&raw_id, "event")?;
    let event = EventRepo::find_with_owner(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Event", event_id)))?;
    Ok(Json(DataResponse { data: event }))
}

/// PUT /api/v1/events/{id}
///
/// Partial update. The resulting schedule must still be valid.
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateEventRequest>,
) -> AppResult<impl IntoResponse> {
    let event_id = parse_db_id(&raw_id, "event")?;
    let existing = find_and_authorize(&state.pool, event_id, &auth).await?;

    if let Some(title) = input.title.as_deref() {
        validate_title(title)?;
    }
    validate_schedule(
        input.start_date.unwrap_or(existing.start_date),
        input.end_date.unwrap_or(existing.end_date),
    )?;
    let category = match input.category.as_deref() {
        Some(raw) => Some(raw.parse::<EventCategory>()?),
        None => None,
    };

    let update = UpdateEvent {
        title: input.title,
        description: input.description,
        category,
        location: input.location,
        start_date: input.start_date,
        end_date: input.end_date,
        banner: non_empty(input.banner),
    };

    let event = EventRepo::update(&state.pool, event_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Event", event_id)))?;

    tracing::info!(event_id, user_id = auth.user_id, "Event updated");

    Ok(Json(DataResponse { data: event }))
}

/// DELETE /api/v1/events/{id}
///
/// Delete an event together with its registrations and feedback.
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event_id = parse_db_id(&raw_id, "event")?;
    let event = find_and_authorize(&state.pool, event_id, &auth).await?;

    if !EventRepo::delete(&state.pool, event_id).await? {
        return Err(AppError::Core(CoreError::not_found("Event", event_id)));
    }

    tracing::info!(event_id, user_id = auth.user_id, title = %event.title, "Event deleted");

    Ok(Json(MessageResponse::new(format!(
        "Event \"{}\" deleted",
        event.title
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn date_bounds_cover_whole_day() {
        let lower = parse_date_bound("2026-11-03", "start_date", false).unwrap();
        let upper = parse_date_bound("2026-11-03", "end_date", true).unwrap();
        assert_eq!(lower.to_rfc3339(), "2026-11-03T00:00:00+00:00");
        assert!(upper > lower);
        assert_eq!(upper.date_naive(), lower.date_naive());
    }

    #[test]
    fn rfc3339_bounds_accepted() {
        let ts = parse_date_bound("2026-11-03T10:30:00+02:00", "start_date", false).unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-11-03T08:30:00+00:00");
    }

    #[test]
    fn garbage_bound_rejected() {
        assert_matches!(
            parse_date_bound("next tuesday", "end_date", true),
            Err(CoreError::Validation(_))
        );
    }
}
