pub mod lifecycle;
mod note;
pub mod reconcile;

pub use lifecycle::{
    CompletionPayload, VisibilityMode, can_finish, can_start, can_view_as_owner,
    ensure_can_finish, ensure_can_start, transition_to_completed, transition_to_in_conference,
    visibility_mode,
};
pub use note::{MAX_NOTE_LENGTH, normalize_note};
pub use reconcile::{CountVerdict, review_count};
