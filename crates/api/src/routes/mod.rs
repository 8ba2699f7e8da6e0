pub mod admin_logs;
pub mod auth;
pub mod events;
pub mod feedback;
pub mod health;
pub mod registrations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                        sign up (public)
/// /auth/signin                        sign in (public)
/// /auth/profile                       own profile
///
/// /users                              list accounts (super-admin)
///
/// /events                             list (public), create (admins)
/// /events/{id}                        get (public), update, delete
///
/// /registrations                      register, list (role-scoped)
/// /registrations/me                   own registrations
/// /registrations/manage               approve/reject (id in body)
/// /registrations/event/{event_id}     registrations of one event
/// /registrations/{id}                 approve/reject, cancel
/// /registrations/{id}/ticket          ticket PDF
///
/// /adminlogs                          list, append (admins)
///
/// /feedback                           list by event (public), create
/// /feedback/{id}                      update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", auth::users_router())
        .nest("/events", events::router())
        .nest("/registrations", registrations::router())
        .nest("/adminlogs", admin_logs::router())
        .nest("/feedback", feedback::router())
}
