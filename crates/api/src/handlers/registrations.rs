//! Handlers for the `/registrations` resource.
//!
//! This is the registration lifecycle: register, cancel, approve/reject,
//! scoped listing and ticket download. Every permission decision is made by
//! [`eventhub_core::authz`] against ids loaded from the database, and every
//! state change appends an admin log entry on a best-effort basis.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use eventhub_core::audit;
use eventhub_core::authz;
use eventhub_core::error::CoreError;
use eventhub_core::registration::{parse_decision, validate_transition, RegistrationStatus};
use eventhub_core::ticket::{render_ticket_pdf, ticket_filename, TICKET_CONTENT_TYPE};
use eventhub_core::types::{parse_db_id, DbId};
use eventhub_db::models::registration::RegistrationDetail;
use eventhub_db::repositories::{EventRepo, RegistrationRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::admin_logs::record;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /registrations`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub event_id: DbId,
}

/// Request body for `PUT /registrations/{id}`.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub status: String,
}

/// Request body for `PUT /registrations/manage`.
#[derive(Debug, Deserialize)]
pub struct ManageRequest {
    pub registration_id: DbId,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_detail(pool: &sqlx::PgPool, registration_id: DbId) -> AppResult<RegistrationDetail> {
    RegistrationRepo::find_detail(pool, registration_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found(
            "Registration",
            registration_id,
        )))
}

/// Approve or reject a registration. Shared by both decision routes.
async fn decide(
    state: &AppState,
    auth: &AuthUser,
    registration_id: DbId,
    raw_status: &str,
) -> AppResult<RegistrationDetail> {
    let next = parse_decision(raw_status)?;
    let detail = find_detail(&state.pool, registration_id).await?;
    let actor = auth.actor();

    authz::authorize_decide(&actor, detail.event_owner_id)?;
    validate_transition(detail.registration.status()?, next)?;

    // Another decision may have landed between the read and this update.
    if RegistrationRepo::decide(&state.pool, registration_id, next)
        .await?
        .is_none()
    {
        let current = RegistrationRepo::find_by_id(&state.pool, registration_id)
            .await?
            .ok_or(AppError::Core(CoreError::not_found(
                "Registration",
                registration_id,
            )))?;
        validate_transition(current.status()?, next)?;
        return Err(AppError::Core(CoreError::Conflict(
            "Registration was modified concurrently".into(),
        )));
    }

    tracing::info!(
        registration_id,
        user_id = auth.user_id,
        status = %next,
        "Registration decided",
    );

    record(
        &state.pool,
        auth.user_id,
        audit::status_changed(
            detail.user_full_name(),
            detail.user_email(),
            detail.event_title(),
            next,
        ),
    )
    .await;

    find_detail(&state.pool, registration_id).await
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

/// POST /api/v1/registrations
///
/// Register the caller for an event. Returns 201 with a `pending`
/// registration, 409 if the caller already holds one for this event.
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    authz::authorize_register(&auth.actor())?;

    let event = EventRepo::find_by_id(&state.pool, input.event_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Event", input.event_id)))?;

    if RegistrationRepo::find_for_user_event(&state.pool, auth.user_id, event.id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::duplicate_registration(event.id)));
    }

    // The unique index settles races the pre-check cannot see.
    let registration = RegistrationRepo::create(&state.pool, event.id, auth.user_id).await?;

    tracing::info!(
        registration_id = registration.id,
        event_id = event.id,
        user_id = auth.user_id,
        "Registered for event",
    );

    record(&state.pool, auth.user_id, audit::registered(&event.title)).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: registration })))
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

/// DELETE /api/v1/registrations/{id}
///
/// Hard-delete a registration. Allowed for the registrant, the owning admin
/// or a super-admin, in any status.
pub async fn cancel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let registration_id = parse_db_id(&raw_id, "registration")?;
    let detail = find_detail(&state.pool, registration_id).await?;

    authz::authorize_cancel(&auth.actor(), &detail.facts()?)?;

    if !RegistrationRepo::delete(&state.pool, registration_id).await? {
        return Err(AppError::Core(CoreError::not_found(
            "Registration",
            registration_id,
        )));
    }

    tracing::info!(
        registration_id,
        user_id = auth.user_id,
        registrant_id = detail.registration.user_id,
        "Registration cancelled",
    );

    record(
        &state.pool,
        auth.user_id,
        audit::cancelled(
            detail.user_full_name(),
            detail.user_email(),
            detail.event_title(),
        ),
    )
    .await;

    Ok(Json(MessageResponse::new("Registration cancelled successfully")))
}

// ---------------------------------------------------------------------------
// Decide
// ---------------------------------------------------------------------------

/// PUT /api/v1/registrations/{id}
///
/// Approve or reject a pending registration. Body: `{ "status": "approved" }`.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<impl IntoResponse> {
    let registration_id = parse_db_id(&raw_id, "registration")?;
    let detail = decide(&state, &auth, registration_id, &input.status).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/registrations/manage
///
/// Same as [`update_status`] with the registration id in the body.
pub async fn manage(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ManageRequest>,
) -> AppResult<impl IntoResponse> {
    if input.registration_id <= 0 {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid registration id '{}'",
            input.registration_id
        ))));
    }
    let detail = decide(&state, &auth, input.registration_id, &input.status).await?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/registrations
///
/// Students see their own registrations, college admins those of events
/// they own, super-admins everything.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<impl IntoResponse> {
    let scope = authz::registration_scope(&auth.actor());
    let registrations = RegistrationRepo::list_scoped(&state.pool, scope).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// GET /api/v1/registrations/me
pub async fn list_mine(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let registrations = RegistrationRepo::list_scoped(
        &state.pool,
        authz::RegistrationScope::RegisteredBy(auth.user_id),
    )
    .await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// GET /api/v1/registrations/event/{event_id}
///
/// All registrations of one event. Owning admin or super-admin only.
pub async fn list_for_event(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let event_id = parse_db_id(&raw_id, "event")?;
    let event = EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Event", event_id)))?;

    authz::authorize_event_registrations_read(&auth.actor(), event.owner_id)?;

    let registrations = RegistrationRepo::list_for_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// GET /api/v1/registrations/{id}/ticket
///
/// Render the ticket PDF on demand. Read-only: repeated calls return
/// equivalent documents and change no state.
pub async fn ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let registration_id = parse_db_id(&raw_id, "registration")?;
    let detail = find_detail(&state.pool, registration_id).await?;

    authz::authorize_ticket(&auth.actor(), &detail.facts()?, state.config.ticket_policy())?;

    let data = detail.ticket_data()?;
    let rendered = render_ticket_pdf(&data, Utc::now())?;
    if !rendered.qr_embedded {
        tracing::warn!(registration_id, "QR code could not be generated; ticket issued without it");
    }
    if data.status != RegistrationStatus::Approved {
        tracing::info!(
            registration_id,
            user_id = auth.user_id,
            status = %detail.registration.status,
            "Ticket preview rendered for undecided registration",
        );
    }

    let filename = ticket_filename(detail.event_title.as_deref(), registration_id);
    let headers = [
        (header::CONTENT_TYPE, TICKET_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, rendered.bytes))
}
