//! Handlers for the `/auth` resource and user listing.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use eventhub_core::error::CoreError;
use eventhub_core::roles::{normalize_account_type, AccountType};
use eventhub_db::models::user::{CreateUser, User, UserResponse};
use eventhub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSuperAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, max = 200, message = "College is required"))]
    pub college: String,
    /// Free-text label, normalized onto [`AccountType`].
    pub account_type: String,
    pub password: String,
}

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
    /// When present, must match the stored account type after normalization.
    pub account_type: Option<String>,
}

/// Successful authentication response returned by signup and signin.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub account_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Create an account and return an access token. The email must be unused.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let account_type = normalize_account_type(&input.account_type);
    if account_type == AccountType::SuperAdmin && !state.config.allow_super_admin_signup {
        return Err(AppError::Core(CoreError::Forbidden(
            "Super admin accounts cannot be created through signup".into(),
        )));
    }

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            full_name: input.full_name,
            email: input.email,
            college: input.college,
            account_type,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, account_type = %account_type, "Account created");

    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

/// POST /api/v1/auth/signin
///
/// Authenticate with email + password.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    if let Some(requested) = input.account_type.as_deref() {
        if normalize_account_type(requested) != user.account_type() {
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "This account is not registered as {}",
                normalize_account_type(requested).label()
            ))));
        }
    }

    tracing::info!(user_id = user.id, "Signed in");

    Ok(Json(auth_response(&state, &user)?))
}

/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", auth.user_id)))?;
    Ok(Json(DataResponse {
        data: user.to_response(),
    }))
}

/// GET /api/v1/users
///
/// List accounts, optionally filtered by `?account_type=`. Super-admin only.
pub async fn list_users(
    State(state): State<AppState>,
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    Query(params): Query<UserListParams>,
) -> AppResult<impl IntoResponse> {
    let account_type = params
        .account_type
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(normalize_account_type);

    let users = UserRepo::list(&state.pool, account_type).await?;
    let data: Vec<UserResponse> = users.iter().map(User::to_response).collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token =
        generate_access_token(user.id, user.account_type().as_str(), &state.config.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.to_response(),
    })
}
