//! Contract of the remote system of record.
//!
//! The engine never owns the truth about status, ownership, or confirmed
//! flags: every mutation goes through this interface and is followed by a
//! full reload. Domain refusals (lock already held, conflicting confirm,
//! incomplete finish) are modelled as outcomes, not errors; transport
//! failures and hard rejections surface as [`conf_model::ConferenceError`].

use chrono::NaiveDate;

use conf_model::{
    Confirmation, ItemId, Manifest, ManifestId, ManifestSummary, Owner, Result,
};

/// Result of requesting the conference lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The lock was granted to this operator.
    Started(Owner),
    /// Another operator got there first; their identity is reported so the
    /// caller can show who holds the lock.
    AlreadyOwned(Owner),
    NotFound,
}

/// Result of submitting one item confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    /// The server refused the confirmation; the message is surfaced as-is.
    Conflict(String),
    NotFound,
}

/// Result of asking to close the conference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishOutcome {
    Finished,
    /// The server still sees unconfirmed items.
    IncompleteItems(usize),
    NotFound,
}

pub trait ConferenceBackend {
    /// Manifests scheduled for a given date, summary fields only.
    fn manifests_by_date(&self, date: NaiveDate) -> Result<Vec<ManifestSummary>>;

    /// Full manifest including the item list.
    fn manifest_detail(&self, manifest: &ManifestId) -> Result<Manifest>;

    /// Request the conference lock. First writer wins, decided server-side.
    fn start_conference(&mut self, manifest: &ManifestId, operator: &Owner)
    -> Result<StartOutcome>;

    /// Record one counted item.
    fn confirm_item(
        &mut self,
        manifest: &ManifestId,
        item: &ItemId,
        confirmation: &Confirmation,
    ) -> Result<ConfirmOutcome>;

    /// Close the conference, optionally attaching a closing note.
    fn finish_conference(
        &mut self,
        manifest: &ManifestId,
        closing_note: Option<&str>,
    ) -> Result<FinishOutcome>;
}

impl<B: ConferenceBackend + ?Sized> ConferenceBackend for &mut B {
    fn manifests_by_date(&self, date: NaiveDate) -> Result<Vec<ManifestSummary>> {
        (**self).manifests_by_date(date)
    }

    fn manifest_detail(&self, manifest: &ManifestId) -> Result<Manifest> {
        (**self).manifest_detail(manifest)
    }

    fn start_conference(
        &mut self,
        manifest: &ManifestId,
        operator: &Owner,
    ) -> Result<StartOutcome> {
        (**self).start_conference(manifest, operator)
    }

    fn confirm_item(
        &mut self,
        manifest: &ManifestId,
        item: &ItemId,
        confirmation: &Confirmation,
    ) -> Result<ConfirmOutcome> {
        (**self).confirm_item(manifest, item, confirmation)
    }

    fn finish_conference(
        &mut self,
        manifest: &ManifestId,
        closing_note: Option<&str>,
    ) -> Result<FinishOutcome> {
        (**self).finish_conference(manifest, closing_note)
    }
}
