//! Route definitions for the `/auth` and `/users` resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup   -> signup
/// POST /signin   -> signin
/// GET  /profile  -> profile (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/profile", get(auth::profile))
}

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /   -> list_users (super-admin)
/// ```
pub fn users_router() -> Router<AppState> {
    Router::new().route("/", get(auth::list_users))
}
