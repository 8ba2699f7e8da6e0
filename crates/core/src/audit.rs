//! Audit log message construction.
//!
//! Audit entries are free-text descriptions attributed to the acting user.
//! The lifecycle handlers build their messages here so the wording stays
//! uniform across register, cancel and decision paths.

use crate::error::CoreError;
use crate::registration::RegistrationStatus;

/// Maximum length of a manually appended audit action.
pub const MAX_ACTION_LEN: usize = 1000;

/// Placeholder used when a referenced entity can no longer be resolved.
const UNKNOWN: &str = "Unknown";

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        UNKNOWN
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Lifecycle messages
// ---------------------------------------------------------------------------

pub fn registered(event_title: &str) -> String {
    format!("Registered for event \"{}\"", or_unknown(event_title))
}

pub fn cancelled(registrant_name: &str, registrant_email: &str, event_title: &str) -> String {
    format!(
        "Cancelled registration of {} ({}) for event \"{}\"",
        or_unknown(registrant_name),
        or_unknown(registrant_email),
        or_unknown(event_title)
    )
}

pub fn status_changed(
    registrant_name: &str,
    registrant_email: &str,
    event_title: &str,
    status: RegistrationStatus,
) -> String {
    format!(
        "Changed registration status of {} ({}) for event \"{}\" to {status}",
        or_unknown(registrant_name),
        or_unknown(registrant_email),
        or_unknown(event_title)
    )
}

// ---------------------------------------------------------------------------
// Manual entries
// ---------------------------------------------------------------------------

/// Validate a manually submitted action description.
pub fn validate_action(action: &str) -> Result<(), CoreError> {
    let trimmed = action.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Action must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_ACTION_LEN {
        return Err(CoreError::Validation(format!(
            "Action must be at most {MAX_ACTION_LEN} characters"
        )));
    }
    Ok(())
}
