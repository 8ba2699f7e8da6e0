//! Handlers for the `/adminlogs` resource, plus the best-effort append used
//! by the registration lifecycle.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventhub_core::audit::validate_action;
use eventhub_core::authz;
use eventhub_core::types::DbId;
use eventhub_db::models::admin_log::{AdminLogQuery, CreateAdminLog};
use eventhub_db::repositories::AdminLogRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Append an audit entry attributed to `user_id`.
///
/// Failures are logged and swallowed: the caller's operation has already
/// committed and must still report success.
pub async fn record(pool: &sqlx::PgPool, user_id: DbId, action: String) {
    let input = CreateAdminLog { user_id, action };
    if let Err(e) = AdminLogRepo::create(pool, &input).await {
        tracing::warn!(
            user_id,
            action = %input.action,
            error = %e,
            "Failed to write admin log entry",
        );
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminLogRequest {
    pub action: String,
}

/// GET /api/v1/adminlogs
///
/// Newest first. Open to college admins and super-admins.
/// Supports `?user_id=&limit=&offset=`.
pub async fn list_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AdminLogQuery>,
) -> AppResult<impl IntoResponse> {
    authz::authorize_audit_read(&auth.actor())?;
    let entries = AdminLogRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/adminlogs
///
/// Append a manual entry attributed to the caller.
pub async fn create_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateAdminLogRequest>,
) -> AppResult<impl IntoResponse> {
    authz::authorize_audit_write(&auth.actor())?;
    validate_action(&input.action)?;

    let log = AdminLogRepo::create(
        &state.pool,
        &CreateAdminLog {
            user_id: auth.user_id,
            action: input.action,
        },
    )
    .await?;

    tracing::info!(log_id = log.id, user_id = auth.user_id, "Admin log appended");

    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}
