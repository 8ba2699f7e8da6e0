use crate::error::CoreError;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a raw path segment into a [`DbId`].
///
/// Identifiers are strictly positive integers. Anything else is a malformed
/// id and yields [`CoreError::Validation`] rather than a not-found, so callers
/// can tell "bad input" apart from "no such row".
pub fn parse_db_id(raw: &str, entity: &'static str) -> Result<DbId, CoreError> {
    match raw.trim().parse::<DbId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(CoreError::Validation(format!("Invalid {entity} id '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_positive_ids() {
        assert_eq!(parse_db_id("42", "Registration").unwrap(), 42);
        assert_eq!(parse_db_id(" 7 ", "Registration").unwrap(), 7);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_matches!(parse_db_id("abc", "Registration"), Err(CoreError::Validation(_)));
        assert_matches!(parse_db_id("", "Registration"), Err(CoreError::Validation(_)));
        assert_matches!(parse_db_id("0", "Registration"), Err(CoreError::Validation(_)));
        assert_matches!(parse_db_id("-3", "Registration"), Err(CoreError::Validation(_)));
        assert_matches!(
            parse_db_id("65f1c0ffee0123456789abcd", "Registration"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn error_message_names_entity() {
        let err = parse_db_id("x1", "Event").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Invalid Event id 'x1'");
    }
}
