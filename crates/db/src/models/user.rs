//! User entity model and DTOs.

use eventhub_core::roles::{normalize_account_type, AccountType};
use eventhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub college: String,
    pub account_type: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The stored account type as a closed enum.
    pub fn account_type(&self) -> AccountType {
        normalize_account_type(&self.account_type)
    }

    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            college: self.college.clone(),
            account_type: self.account_type(),
            created_at: self.created_at,
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub college: String,
    pub account_type: AccountType,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The email is lower-cased on insert.
#[derive(Debug)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub college: String,
    pub account_type: AccountType,
    pub password_hash: String,
}
