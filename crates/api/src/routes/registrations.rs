//! Route definitions for the `/registrations` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::registrations;
use crate::state::AppState;

/// Routes mounted at `/registrations`. All require authentication.
///
/// ```text
/// POST   /                    register
/// GET    /                    list (role-scoped)
/// GET    /me                  list_mine
/// PUT    /manage              manage (approve/reject, id in body)
/// GET    /event/{event_id}    list_for_event
/// PUT    /{id}                update_status (approve/reject)
/// DELETE /{id}                cancel
/// GET    /{id}/ticket         ticket (PDF)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(registrations::list).post(registrations::register),
        )
        .route("/me", get(registrations::list_mine))
        .route("/manage", put(registrations::manage))
        .route("/event/{event_id}", get(registrations::list_for_event))
        .route(
            "/{id}",
            put(registrations::update_status).delete(registrations::cancel),
        )
        .route("/{id}/ticket", get(registrations::ticket))
}
