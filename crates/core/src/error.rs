//! Domain error taxonomy.
//!
//! Every lifecycle and policy check reports one of these variants. The HTTP
//! layer maps each to a distinct status code, so "not allowed", "does not
//! exist" and "already done" stay distinguishable to callers.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced entity does not exist (404).
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed input: bad id, unknown status, out-of-range rating (400).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation collides with existing state, e.g. a duplicate
    /// registration or a decision on an already-decided registration (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No valid credential was presented (401).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but the policy denies this action (403).
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }

    /// The conflict raised when a user already holds a registration for an event.
    pub fn duplicate_registration(event_id: DbId) -> Self {
        Self::Conflict(format!("Already registered for event {event_id}"))
    }

    /// Stable, machine-readable error code for this variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_variant() {
        let codes = [
            CoreError::not_found("Event", 1).code(),
            CoreError::Validation(String::new()).code(),
            CoreError::duplicate_registration(1).code(),
            CoreError::Unauthorized(String::new()).code(),
            CoreError::Forbidden(String::new()).code(),
            CoreError::Internal(String::new()).code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn duplicate_registration_is_a_conflict() {
        let err = CoreError::duplicate_registration(9);
        assert!(matches!(err, CoreError::Conflict(_)));
        assert_eq!(err.to_string(), "Conflict: Already registered for event 9");
    }
}
