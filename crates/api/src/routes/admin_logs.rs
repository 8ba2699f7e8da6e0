//! Route definitions for the `/adminlogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin_logs;
use crate::state::AppState;

/// Routes mounted at `/adminlogs`.
///
/// ```text
/// GET    /    list_logs (admins; college admins see their own)
/// POST   /    create_log (admins)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(admin_logs::list_logs).post(admin_logs::create_log))
}
