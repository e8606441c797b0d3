//! The derived per-viewer session over one manifest snapshot.

use conf_engine::lifecycle::{self, VisibilityMode};
use conf_model::{
    ConferenceError, Confirmation, ItemCategory, ItemId, Manifest, ManifestItem, ManifestSummary,
    Result, UserId,
};
use conf_search::filter_items;

/// One operator's view of one manifest: pending items split by category,
/// confirmed items, visibility, and the active search query.
///
/// Sessions are cheap derived values: one is built when a manifest view
/// opens and rebuilt from scratch on every reload or local change. They hold
/// no state a reload cannot reconstruct.
#[derive(Debug, Clone)]
pub struct ConferenceSession {
    manifest: Manifest,
    viewer: UserId,
    query: String,
    visibility: VisibilityMode,
    own_pending: Vec<ManifestItem>,
    third_party_pending: Vec<ManifestItem>,
    confirmed: Vec<ManifestItem>,
}

impl ConferenceSession {
    /// Partition the manifest for a viewer, applying the search filter to
    /// the pending set. While a query is active the confirmed list is
    /// hidden entirely, since it only adds noise during active counting.
    pub fn build(manifest: Manifest, viewer: UserId, query: &str) -> Self {
        let visibility = lifecycle::visibility_mode(&manifest, &viewer);
        let searching = !query.trim().is_empty();

        let pending: Vec<ManifestItem> = manifest
            .items
            .iter()
            .filter(|item| !item.is_confirmed())
            .cloned()
            .collect();
        let filtered: Vec<ManifestItem> =
            filter_items(&pending, query).into_iter().cloned().collect();

        let (own_pending, third_party_pending) = filtered
            .into_iter()
            .partition(|item| item.category == ItemCategory::Own);

        let confirmed = if searching {
            Vec::new()
        } else {
            manifest
                .items
                .iter()
                .filter(|item| item.is_confirmed())
                .cloned()
                .collect()
        };

        Self {
            visibility,
            own_pending,
            third_party_pending,
            confirmed,
            query: query.to_string(),
            manifest,
            viewer,
        }
    }

    /// Rebuild this session with a different search query.
    pub fn with_query(&self, query: &str) -> Self {
        Self::build(self.manifest.clone(), self.viewer.clone(), query)
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn viewer(&self) -> &UserId {
        &self.viewer
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visibility(&self) -> VisibilityMode {
        self.visibility
    }

    /// The summary card, or `None` for the owner actively working the
    /// conference (the card is suppressed to free screen space; everyone
    /// else keeps it as a lock indicator).
    pub fn summary(&self) -> Option<ManifestSummary> {
        match self.visibility {
            VisibilityMode::FullSummary => Some(self.manifest.summary()),
            VisibilityMode::ConferenceWorking => None,
        }
    }

    /// Pending own-invoice items after filtering, in declaration order.
    pub fn own_pending(&self) -> &[ManifestItem] {
        &self.own_pending
    }

    /// Pending third-party items after filtering, in declaration order.
    pub fn third_party_pending(&self) -> &[ManifestItem] {
        &self.third_party_pending
    }

    /// Confirmed items; empty while a search is active.
    pub fn confirmed_items(&self) -> &[ManifestItem] {
        &self.confirmed
    }

    pub fn is_search_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn finish_eligible(&self) -> bool {
        lifecycle::can_finish(&self.manifest)
    }

    /// Apply a confirmation to the named item, producing the next session.
    ///
    /// Only the working owner may confirm; anyone else gets
    /// `InvalidTransition`. Unknown and already-confirmed items are
    /// contract violations. Bounds and the divergence-note rule are
    /// re-checked here so a session never holds a record the
    /// reconciliation engine would not have produced; a stray note on a
    /// clean count is dropped, matching the engine's resolution rule.
    pub fn record_confirmation(
        &self,
        item_id: &ItemId,
        confirmation: Confirmation,
    ) -> Result<ConferenceSession> {
        if self.visibility != VisibilityMode::ConferenceWorking {
            return Err(ConferenceError::InvalidTransition {
                action: "confirming an item",
                status: self.manifest.status.label().to_string(),
            });
        }

        let mut manifest = self.manifest.clone();
        let Some(item) = manifest.item_mut(item_id) else {
            return Err(ConferenceError::UnknownItem(item_id.clone()));
        };
        if item.is_confirmed() {
            return Err(ConferenceError::AlreadyConfirmed(item_id.clone()));
        }
        if confirmation.quantity > item.expected_quantity {
            return Err(ConferenceError::ExceedsExpected {
                counted: confirmation.quantity,
                expected: item.expected_quantity,
            });
        }

        let divergence_note = if confirmation.quantity == item.expected_quantity {
            None
        } else {
            match confirmation
                .divergence_note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty())
            {
                Some(note) => Some(note.to_string()),
                None => return Err(ConferenceError::MissingJustification),
            }
        };
        item.confirmation = Some(Confirmation {
            quantity: confirmation.quantity,
            divergence_note,
        });

        Ok(Self::build(manifest, self.viewer.clone(), &self.query))
    }
}
