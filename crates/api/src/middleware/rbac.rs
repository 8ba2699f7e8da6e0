//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and asks the authorization policy
//! before the handler runs. Resource-level checks (ownership) still happen
//! inside handlers once the resource is loaded.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eventhub_core::authz;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// College admin or super-admin: may create events.
///
/// ```ignore
/// async fn create(RequireEventManager(user): RequireEventManager) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEventManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireEventManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        authz::authorize_create_event(&user.actor())?;
        Ok(RequireEventManager(user))
    }
}

/// Super-admin only. Rejects with 403 Forbidden otherwise.
pub struct RequireSuperAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        authz::authorize_user_listing(&user.actor())?;
        Ok(RequireSuperAdmin(user))
    }
}
