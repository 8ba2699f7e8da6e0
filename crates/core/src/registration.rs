//! Registration status values and the transition rules between them.
//!
//! A registration is created `pending` and may be decided exactly once, to
//! `approved` or `rejected`. Cancellation is not a status: it removes the row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

/// All valid status values, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Approved => STATUS_APPROVED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    /// `approved` and `rejected` are terminal; only cancellation leaves them.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: RegistrationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistrationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            STATUS_PENDING => Ok(Self::Pending),
            STATUS_APPROVED => Ok(Self::Approved),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

/// Parse the status an admin asked for. Only decisions are accepted, never
/// `pending`.
pub fn parse_decision(raw: &str) -> Result<RegistrationStatus, CoreError> {
    let status: RegistrationStatus = raw.parse()?;
    if status == RegistrationStatus::Pending {
        return Err(CoreError::Validation(format!(
            "Invalid status '{raw}'. Must be one of: {STATUS_APPROVED}, {STATUS_REJECTED}"
        )));
    }
    Ok(status)
}

/// Check that `current -> next` is allowed.
///
/// A registration that has already been decided yields [`CoreError::Conflict`]
/// ("already done"), distinct from a malformed status.
pub fn validate_transition(
    current: RegistrationStatus,
    next: RegistrationStatus,
) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Registration is already {current} and cannot be changed to {next}"
        )))
    }
}
