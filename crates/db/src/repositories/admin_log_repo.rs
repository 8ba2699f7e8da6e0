//! Repository for the append-only `admin_logs` table.

use sqlx::PgPool;

use crate::models::admin_log::{AdminLog, AdminLogEntry, AdminLogQuery, CreateAdminLog};

const COLUMNS: &str = "id, user_id, action, created_at";

const ENTRY_COLUMNS: &str = "l.id, l.user_id, l.action, l.created_at, \
                             u.full_name AS user_full_name, u.email AS user_email";

/// Provides insert and query operations for admin logs.
pub struct AdminLogRepo;

impl AdminLogRepo {
    pub async fn create(pool: &PgPool, input: &CreateAdminLog) -> Result<AdminLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_logs (user_id, action) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminLog>(&query)
            .bind(input.user_id)
            .bind(input.action.trim())
            .fetch_one(pool)
            .await
    }

    /// Query entries newest first, optionally narrowed to one actor.
    pub async fn list(
        pool: &PgPool,
        params: &AdminLogQuery,
    ) -> Result<Vec<AdminLogEntry>, sqlx::Error> {
        let (where_clause, bind_idx) = match params.user_id {
            Some(_) => ("WHERE l.user_id = $1", 2),
            None => ("", 1),
        };

        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM admin_logs l \
             LEFT JOIN users u ON u.id = l.user_id \
             {where_clause} \
             ORDER BY l.created_at DESC, l.id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, AdminLogEntry>(&query);
        if let Some(user_id) = params.user_id {
            q = q.bind(user_id);
        }
        q.bind(params.limit())
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }
}
