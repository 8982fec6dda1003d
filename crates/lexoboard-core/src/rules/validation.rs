//! Input validation for user-supplied names and titles
//!
//! Lengths are counted in characters after trimming surrounding whitespace,
//! and the trimmed text is what gets stored.

use crate::errors::{BoardError, Result};

pub const BOARD_NAME_MAX: usize = 140;
pub const COLUMN_NAME_MAX: usize = 80;
pub const CARD_TITLE_MAX: usize = 200;

/// Trim `value` and check it holds between 1 and `max` characters
///
/// # Errors
///
/// Returns `Validation` naming `field` if the trimmed text is empty or too long.
pub fn bounded_text(field: &str, value: &str, max: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BoardError::Validation {
            field: field.to_string(),
            reason: "cannot be empty or whitespace-only".to_string(),
        });
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(BoardError::Validation {
            field: field.to_string(),
            reason: format!("{} characters exceeds the limit of {}", len, max),
        });
    }
    Ok(trimmed.to_string())
}

/// # Errors
///
/// See [`bounded_text`].
pub fn board_name(name: &str) -> Result<String> {
    bounded_text("name", name, BOARD_NAME_MAX)
}

/// # Errors
///
/// See [`bounded_text`].
pub fn column_name(name: &str) -> Result<String> {
    bounded_text("name", name, COLUMN_NAME_MAX)
}

/// # Errors
///
/// See [`bounded_text`].
pub fn card_title(title: &str) -> Result<String> {
    bounded_text("title", title, CARD_TITLE_MAX)
}

/// Normalize an optional description: blank becomes `None`
pub fn description(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_trimmed() {
        assert_eq!(column_name("  Doing  ").unwrap(), "Doing");
    }

    #[test]
    fn test_blank_is_rejected() {
        let err = card_title("   ").unwrap_err();
        assert!(matches!(err, BoardError::Validation { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_length_limits_count_characters() {
        assert!(column_name(&"x".repeat(80)).is_ok());
        assert!(column_name(&"x".repeat(81)).is_err());
        // multi-byte characters count once each
        assert!(card_title(&"é".repeat(200)).is_ok());
        assert!(board_name(&"b".repeat(141)).is_err());
    }

    #[test]
    fn test_blank_description_is_dropped() {
        assert_eq!(description(Some("  ")), None);
        assert_eq!(description(Some(" notes ")), Some("notes".to_string()));
        assert_eq!(description(None), None);
    }
}
