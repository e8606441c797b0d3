//! Manifest lifecycle rules.
//!
//! A manifest moves `Pending` → `InConference` → `Completed`, never
//! skipping a state and never moving backwards here (an upstream
//! cancellation simply shows up as a different status on the next reload).
//! The transitions below are pure state transformations; callers apply them
//! only after the corresponding remote call has been confirmed, because the
//! conference lock is granted by the server, not assumed locally.

use conf_model::{
    ConferenceError, Manifest, ManifestId, ManifestStatus, Owner, Result, UserId,
};

use crate::note::normalize_note;

/// What a given viewer may see and do on a manifest.
///
/// Ownership does not hide a running conference from other users: they keep
/// the full summary card as a lock indicator and lose only the ability to
/// act. The owner, meanwhile, trades the summary for working screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityMode {
    /// Summary shown, conference actions disabled.
    FullSummary,
    /// Summary suppressed, item interaction enabled. Only the owner of a
    /// running conference sees this mode.
    ConferenceWorking,
}

/// True iff a conference may be started on this manifest.
pub fn can_start(manifest: &Manifest) -> bool {
    matches!(manifest.status, ManifestStatus::Pending)
}

/// True iff `viewer` holds the conference lock on this manifest.
pub fn can_view_as_owner(manifest: &Manifest, viewer: &UserId) -> bool {
    manifest
        .owner()
        .is_some_and(|owner| &owner.user_id == viewer)
}

pub fn visibility_mode(manifest: &Manifest, viewer: &UserId) -> VisibilityMode {
    if can_view_as_owner(manifest, viewer) {
        VisibilityMode::ConferenceWorking
    } else {
        VisibilityMode::FullSummary
    }
}

/// True iff the conference can be closed: it must be running and every item
/// confirmed. A manifest with no items is trivially finish-eligible once in
/// conference.
pub fn can_finish(manifest: &Manifest) -> bool {
    matches!(manifest.status, ManifestStatus::InConference { .. })
        && manifest.all_items_confirmed()
}

fn invalid(action: &'static str, manifest: &Manifest) -> ConferenceError {
    ConferenceError::InvalidTransition {
        action,
        status: manifest.status.label().to_string(),
    }
}

/// Guard form of [`can_start`] for callers about to issue the remote call.
pub fn ensure_can_start(manifest: &Manifest) -> Result<()> {
    if can_start(manifest) {
        Ok(())
    } else {
        Err(invalid("starting a conference", manifest))
    }
}

/// Guard form of [`can_finish`].
pub fn ensure_can_finish(manifest: &Manifest) -> Result<()> {
    if can_finish(manifest) {
        Ok(())
    } else {
        Err(invalid("finishing a conference", manifest))
    }
}

/// Record the server-granted conference lock.
///
/// Starting anything but a `Pending` manifest is a contract violation, not
/// a no-op.
pub fn transition_to_in_conference(manifest: &mut Manifest, owner: Owner) -> Result<()> {
    if !can_start(manifest) {
        return Err(invalid("starting a conference", manifest));
    }
    manifest.status = ManifestStatus::InConference { owner };
    Ok(())
}

/// Payload handed to the transport layer when a conference is closed. The
/// closing note travels with the completion call; it is not stored on any
/// item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPayload {
    pub manifest_id: ManifestId,
    pub closing_note: Option<String>,
}

/// Close the conference, releasing the lock.
pub fn transition_to_completed(
    manifest: &mut Manifest,
    closing_note: Option<&str>,
) -> Result<CompletionPayload> {
    if !can_finish(manifest) {
        return Err(invalid("finishing a conference", manifest));
    }
    let closing_note = normalize_note(closing_note)?;
    manifest.status = ManifestStatus::Completed;
    Ok(CompletionPayload {
        manifest_id: manifest.id.clone(),
        closing_note,
    })
}
