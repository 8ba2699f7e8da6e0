//! Repository for the `users` table.

use eventhub_core::roles::AccountType;
use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, college, account_type, password_hash, \
                       created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A duplicate email fails with a unique violation on `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (full_name, email, college, account_type, password_hash)
             VALUES ($1, LOWER($2), $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.full_name.trim())
            .bind(input.email.trim())
            .bind(input.college.trim())
            .bind(input.account_type.as_str())
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// List users, newest first, optionally restricted to one account type.
    pub async fn list(
        pool: &PgPool,
        account_type: Option<AccountType>,
    ) -> Result<Vec<User>, sqlx::Error> {
        match account_type {
            Some(kind) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM users WHERE account_type = $1 \
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, User>(&query)
                    .bind(kind.as_str())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
                sqlx::query_as::<_, User>(&query).fetch_all(pool).await
            }
        }
    }
}
