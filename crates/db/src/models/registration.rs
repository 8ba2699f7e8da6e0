//! Registration entity model and joined views.

use eventhub_core::authz::RegistrationFacts;
use eventhub_core::error::CoreError;
use eventhub_core::registration::RegistrationStatus;
use eventhub_core::ticket::TicketData;
use eventhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Registration {
    /// Parsed status. A value outside the known set is an internal error,
    /// never a fallback, so a decided row cannot become decidable again.
    pub fn status(&self) -> Result<RegistrationStatus, CoreError> {
        self.status.parse().map_err(|_| {
            CoreError::Internal(format!(
                "Registration {} has unknown stored status '{}'",
                self.id, self.status
            ))
        })
    }
}

/// A registration joined with its event and registrant.
///
/// Event and registrant columns come from LEFT JOINs and are therefore
/// optional; `event_owner_id` falls back to `0`, which never matches a real
/// user id.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub registration: Registration,
    pub event_title: Option<String>,
    pub event_category: Option<String>,
    pub event_location: Option<String>,
    pub event_start_date: Option<Timestamp>,
    pub event_end_date: Option<Timestamp>,
    #[serde(skip_serializing)]
    pub event_owner_id: DbId,
    pub user_full_name: Option<String>,
    pub user_email: Option<String>,
    pub user_college: Option<String>,
}

impl RegistrationDetail {
    pub fn facts(&self) -> Result<RegistrationFacts, CoreError> {
        Ok(RegistrationFacts {
            registrant_id: self.registration.user_id,
            event_owner_id: self.event_owner_id,
            status: self.registration.status()?,
        })
    }

    pub fn event_title(&self) -> &str {
        self.event_title.as_deref().unwrap_or_default()
    }

    pub fn user_full_name(&self) -> &str {
        self.user_full_name.as_deref().unwrap_or_default()
    }

    pub fn user_email(&self) -> &str {
        self.user_email.as_deref().unwrap_or_default()
    }

    /// Values the ticket renderer needs.
    pub fn ticket_data(&self) -> Result<TicketData, CoreError> {
        Ok(TicketData {
            registration_id: self.registration.id,
            event_id: self.registration.event_id,
            user_id: self.registration.user_id,
            status: self.registration.status()?,
            registered_at: self.registration.created_at,
            event_title: self.event_title.clone(),
            event_category: self.event_category.clone(),
            event_location: self.event_location.clone(),
            event_start: self.event_start_date,
            event_end: self.event_end_date,
            attendee_name: self.user_full_name.clone(),
            attendee_email: self.user_email.clone(),
            attendee_college: self.user_college.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn row(status: &str) -> Registration {
        Registration {
            id: 7,
            event_id: 1,
            user_id: 2,
            status: status.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn known_statuses_parse() {
        assert_eq!(row("approved").status().unwrap(), RegistrationStatus::Approved);
        assert_eq!(row("pending").status().unwrap(), RegistrationStatus::Pending);
    }

    #[test]
    fn unknown_status_is_an_error_not_pending() {
        assert_matches!(row("archived").status(), Err(CoreError::Internal(_)));
    }
}
