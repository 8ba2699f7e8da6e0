//! Event categories and event field validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum length of an event title.
pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Sports,
    Hackathon,
    Cultural,
    Workshop,
    Other,
}

pub const VALID_CATEGORIES: &[&str] = &["sports", "hackathon", "cultural", "workshop", "other"];

impl EventCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sports => "sports",
            Self::Hackathon => "hackathon",
            Self::Cultural => "cultural",
            Self::Workshop => "workshop",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sports" => Ok(Self::Sports),
            "hackathon" => Ok(Self::Hackathon),
            "cultural" => Ok(Self::Cultural),
            "workshop" => Ok(Self::Workshop),
            "other" => Ok(Self::Other),
            _ => Err(CoreError::Validation(format!(
                "Invalid category '{s}'. Must be one of: {}",
                VALID_CATEGORIES.join(", ")
            ))),
        }
    }
}

/// Validate a title: non-blank and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Event title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Event title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// An event may not end before it starts.
pub fn validate_schedule(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Validation(
            "Event end_date must not be before start_date".into(),
        ));
    }
    Ok(())
}
