//! Account types and role-label normalization.
//!
//! The canonical names below are what the `users.account_type` column stores
//! (enforced by a CHECK constraint in `20260301000001_create_users.sql`).

use std::fmt;

use serde::{Deserialize, Serialize};

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_COLLEGE_ADMIN: &str = "college_admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// The closed set of account types a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Student,
    CollegeAdmin,
    SuperAdmin,
}

impl AccountType {
    /// Canonical storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => ROLE_STUDENT,
            Self::CollegeAdmin => ROLE_COLLEGE_ADMIN,
            Self::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }

    /// Human-readable label used in messages and tickets.
    pub fn label(self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::CollegeAdmin => "College Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::CollegeAdmin | Self::SuperAdmin)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a free-text role label into an [`AccountType`].
///
/// Case-insensitive. Anything mentioning `super` is a super-admin, anything
/// else mentioning `admin` is a college admin, everything else (including an
/// empty string) is a student.
pub fn normalize_account_type(raw: &str) -> AccountType {
    let lower = raw.trim().to_lowercase();
    if lower.contains("super") {
        AccountType::SuperAdmin
    } else if lower.contains("admin") {
        AccountType::CollegeAdmin
    } else {
        AccountType::Student
    }
}
