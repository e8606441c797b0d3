//! In-memory reference implementation of the backend contract.
//!
//! Mirrors the server-side rules the engine relies on: the conference lock
//! goes to the first starter, confirmations are validated again on the
//! "server", and a finish with pending items is refused. The CLI layers a
//! JSON file underneath this to persist between invocations; tests use it
//! directly.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use conf_engine::lifecycle;
use conf_model::{
    ConferenceError, Confirmation, ItemId, Manifest, ManifestId, ManifestStatus, ManifestSummary,
    Owner, Result,
};

use crate::remote::{ConferenceBackend, ConfirmOutcome, FinishOutcome, StartOutcome};

#[derive(Debug, Default)]
pub struct InMemoryBackend {
    manifests: BTreeMap<ManifestId, Manifest>,
    closing_notes: BTreeMap<ManifestId, String>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifests(manifests: impl IntoIterator<Item = Manifest>) -> Self {
        let mut backend = Self::new();
        for manifest in manifests {
            backend.insert(manifest);
        }
        backend
    }

    pub fn insert(&mut self, manifest: Manifest) {
        self.manifests.insert(manifest.id.clone(), manifest);
    }

    pub fn manifests(&self) -> impl Iterator<Item = &Manifest> {
        self.manifests.values()
    }

    pub fn into_manifests(self) -> Vec<Manifest> {
        self.manifests.into_values().collect()
    }

    /// Closing note recorded for a finished manifest, if any.
    pub fn closing_note(&self, manifest: &ManifestId) -> Option<&str> {
        self.closing_notes.get(manifest).map(String::as_str)
    }
}

impl ConferenceBackend for InMemoryBackend {
    fn manifests_by_date(&self, date: NaiveDate) -> Result<Vec<ManifestSummary>> {
        Ok(self
            .manifests
            .values()
            .filter(|manifest| manifest.date == date)
            .map(Manifest::summary)
            .collect())
    }

    fn manifest_detail(&self, manifest: &ManifestId) -> Result<Manifest> {
        self.manifests
            .get(manifest)
            .cloned()
            .ok_or_else(|| ConferenceError::RemoteNotFound(manifest.to_string()))
    }

    fn start_conference(
        &mut self,
        manifest: &ManifestId,
        operator: &Owner,
    ) -> Result<StartOutcome> {
        let Some(stored) = self.manifests.get_mut(manifest) else {
            return Ok(StartOutcome::NotFound);
        };
        match &stored.status {
            ManifestStatus::Pending => {
                lifecycle::transition_to_in_conference(stored, operator.clone())?;
                debug!(manifest = %manifest, operator = %operator.user_id, "lock granted");
                Ok(StartOutcome::Started(operator.clone()))
            }
            ManifestStatus::InConference { owner } => {
                debug!(manifest = %manifest, holder = %owner.user_id, "lock already held");
                Ok(StartOutcome::AlreadyOwned(owner.clone()))
            }
            ManifestStatus::Completed => Err(ConferenceError::RemoteConflict(format!(
                "manifest {manifest} is already completed"
            ))),
        }
    }

    fn confirm_item(
        &mut self,
        manifest: &ManifestId,
        item: &ItemId,
        confirmation: &Confirmation,
    ) -> Result<ConfirmOutcome> {
        let Some(stored) = self.manifests.get_mut(manifest) else {
            return Ok(ConfirmOutcome::NotFound);
        };
        if !matches!(stored.status, ManifestStatus::InConference { .. }) {
            return Ok(ConfirmOutcome::Conflict(format!(
                "manifest {manifest} has no conference in progress"
            )));
        }
        let Some(stored_item) = stored.item_mut(item) else {
            return Ok(ConfirmOutcome::NotFound);
        };
        if stored_item.is_confirmed() {
            return Ok(ConfirmOutcome::Conflict(format!(
                "item {item} is already confirmed"
            )));
        }
        if confirmation.quantity > stored_item.expected_quantity {
            return Ok(ConfirmOutcome::Conflict(format!(
                "counted {} exceeds declared {}",
                confirmation.quantity, stored_item.expected_quantity
            )));
        }
        if confirmation.quantity < stored_item.expected_quantity
            && confirmation
                .divergence_note
                .as_deref()
                .is_none_or(|note| note.trim().is_empty())
        {
            return Ok(ConfirmOutcome::Conflict(
                "shortfall confirmed without a justification".to_string(),
            ));
        }
        stored_item.confirmation = Some(confirmation.clone());
        debug!(manifest = %manifest, item = %item, quantity = %confirmation.quantity, "item confirmed");
        Ok(ConfirmOutcome::Confirmed)
    }

    fn finish_conference(
        &mut self,
        manifest: &ManifestId,
        closing_note: Option<&str>,
    ) -> Result<FinishOutcome> {
        let Some(stored) = self.manifests.get_mut(manifest) else {
            return Ok(FinishOutcome::NotFound);
        };
        if !matches!(stored.status, ManifestStatus::InConference { .. }) {
            return Err(ConferenceError::RemoteConflict(format!(
                "manifest {manifest} has no conference in progress"
            )));
        }
        let pending = stored.pending_count();
        if pending > 0 {
            return Ok(FinishOutcome::IncompleteItems(pending));
        }
        let payload = lifecycle::transition_to_completed(stored, closing_note)?;
        if let Some(note) = payload.closing_note {
            self.closing_notes.insert(manifest.clone(), note);
        }
        debug!(manifest = %manifest, "conference finished");
        Ok(FinishOutcome::Finished)
    }
}
