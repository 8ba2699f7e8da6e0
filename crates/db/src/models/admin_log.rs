//! Admin log entity models and DTOs.
//!
//! Admin log entries are append-only: there is no `updated_at` and no
//! update or delete path.

use eventhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default and maximum page size for audit log reads.
pub const DEFAULT_LOG_LIMIT: i64 = 50;
pub const MAX_LOG_LIMIT: i64 = 500;

/// A single admin log row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminLog {
    pub id: DbId,
    pub user_id: DbId,
    pub action: String,
    pub created_at: Timestamp,
}

/// An admin log row joined with its actor's name and email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminLogEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub log: AdminLog,
    pub user_full_name: Option<String>,
    pub user_email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateAdminLog {
    pub user_id: DbId,
    pub action: String,
}

/// Filter parameters for querying admin logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminLogQuery {
    pub user_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl AdminLogQuery {
    /// Limit clamped to `1..=MAX_LOG_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LOG_LIMIT)
            .clamp(1, MAX_LOG_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(AdminLogQuery::default().limit(), DEFAULT_LOG_LIMIT);
        let q = AdminLogQuery {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(q.limit(), MAX_LOG_LIMIT);
        let q = AdminLogQuery {
            limit: Some(0),
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(q.limit(), 1);
        assert_eq!(q.offset(), 0);
    }
}
