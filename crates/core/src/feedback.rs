//! Feedback validation.

use crate::error::CoreError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

pub fn validate_comments(comments: &str) -> Result<(), CoreError> {
    if comments.trim().is_empty() {
        return Err(CoreError::Validation("Comments must not be empty".into()));
    }
    Ok(())
}
