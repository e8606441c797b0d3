//! Free-text note handling shared by item justifications and closing notes.

use conf_model::{ConferenceError, Result};

/// Longest note the system of record accepts.
pub const MAX_NOTE_LENGTH: usize = 255;

/// Trim an optional note, dropping empty results and rejecting over-long
/// ones. Truncation is never applied; the caller re-prompts instead.
pub fn normalize_note(note: Option<&str>) -> Result<Option<String>> {
    match note.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) if trimmed.chars().count() > MAX_NOTE_LENGTH => {
            Err(ConferenceError::NoteTooLong {
                limit: MAX_NOTE_LENGTH,
            })
        }
        Some(trimmed) => Ok(Some(trimmed.to_string())),
    }
}
