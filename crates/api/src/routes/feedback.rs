//! Route definitions for the `/feedback` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Routes mounted at `/feedback`.
///
/// ```text
/// POST   /                  create_feedback
/// GET    /?event_id=        list_feedback (public)
/// PUT    /{id}              update_feedback
/// DELETE /{id}              delete_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route(
            "/{id}",
            put(feedback::update_feedback).delete(feedback::delete_feedback),
        )
}
