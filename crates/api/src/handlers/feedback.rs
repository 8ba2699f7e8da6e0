//! Handlers for the `/feedback` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventhub_core::authz;
use eventhub_core::error::CoreError;
use eventhub_core::feedback::{validate_comments, validate_rating};
use eventhub_core::types::{parse_db_id, DbId};
use eventhub_db::models::feedback::{CreateFeedback, UpdateFeedback};
use eventhub_db::repositories::{EventRepo, FeedbackRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub event_id: DbId,
    pub rating: i16,
    pub comments: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFeedbackRequest {
    pub rating: Option<i16>,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackListParams {
    pub event_id: Option<String>,
}

/// POST /api/v1/feedback
pub async fn create_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateFeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    validate_rating(input.rating)?;
    validate_comments(&input.comments)?;

    EventRepo::find_by_id(&state.pool, input.event_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Event", input.event_id)))?;

    let feedback = FeedbackRepo::create(
        &state.pool,
        &CreateFeedback {
            event_id: input.event_id,
            user_id: auth.user_id,
            rating: input.rating,
            comments: input.comments,
        },
    )
    .await?;

    tracing::info!(
        feedback_id = feedback.id,
        event_id = feedback.event_id,
        user_id = auth.user_id,
        "Feedback added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// GET /api/v1/feedback?event_id=
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(params): Query<FeedbackListParams>,
) -> AppResult<impl IntoResponse> {
    let raw = params
        .event_id
        .ok_or_else(|| AppError::BadRequest("Query parameter 'event_id' is required".into()))?;
    let event_id = parse_db_id(&raw, "event")?;
    let feedback = FeedbackRepo::list_for_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: feedback }))
}

/// PUT /api/v1/feedback/{id}
///
/// Author or super-admin only.
pub async fn update_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
    Json(input): Json<UpdateFeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    let feedback_id = parse_db_id(&raw_id, "feedback")?;
    let existing = FeedbackRepo::find_by_id(&state.pool, feedback_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Feedback", feedback_id)))?;
    authz::authorize_feedback_mutation(&auth.actor(), existing.user_id)?;

    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }
    if let Some(comments) = input.comments.as_deref() {
        validate_comments(comments)?;
    }

    let updated = FeedbackRepo::update(
        &state.pool,
        feedback_id,
        &UpdateFeedback {
            rating: input.rating,
            comments: input.comments,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::not_found("Feedback", feedback_id)))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/feedback/{id}
///
/// Author or super-admin only.
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let feedback_id = parse_db_id(&raw_id, "feedback")?;
    let existing = FeedbackRepo::find_by_id(&state.pool, feedback_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Feedback", feedback_id)))?;
    authz::authorize_feedback_mutation(&auth.actor(), existing.user_id)?;

    if !FeedbackRepo::delete(&state.pool, feedback_id).await? {
        return Err(AppError::Core(CoreError::not_found("Feedback", feedback_id)));
    }

    tracing::info!(feedback_id, user_id = auth.user_id, "Feedback deleted");

    Ok(Json(MessageResponse::new("Feedback deleted")))
}
