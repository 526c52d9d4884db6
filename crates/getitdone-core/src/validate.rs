//! Field validation shared by every layer that accepts task input.

use crate::constants::{MAX_NOTES_LEN, MAX_TITLE_LEN};
use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Trims a task title and checks it is present and short enough.
///
/// ## Errors
/// Returns `CoreError::ValidationError` for an empty or over-long title.
pub fn title(raw: &str) -> CoreResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError("title is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::ValidationError(format!(
            "Title must be {MAX_TITLE_LEN} characters or less"
        )));
    }
    Ok(trimmed.to_string())
}

/// ## Summary
/// Trims task notes; blank notes become `None`.
///
/// ## Errors
/// Returns `CoreError::ValidationError` if the notes are too long.
pub fn notes(raw: Option<&str>) -> CoreResult<Option<String>> {
    let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_NOTES_LEN {
        return Err(CoreError::ValidationError(format!(
            "Notes must be {MAX_NOTES_LEN} characters or less"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// ## Summary
/// Checks weekday numbers are in `0..=6` (0 = Sunday).
///
/// ## Errors
/// Returns `CoreError::InvalidInput` naming the first out-of-range number.
pub fn weekday_numbers(days: &[u8]) -> CoreResult<()> {
    match days.iter().find(|d| **d > 6) {
        Some(bad) => Err(CoreError::InvalidInput(format!(
            "day of week {bad} is outside 0..=6"
        ))),
        None => Ok(()),
    }
}
