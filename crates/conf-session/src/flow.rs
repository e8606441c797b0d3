//! Sequential driver for one operator working one manifest.
//!
//! Every mutating step issues the remote call, then reloads the manifest
//! and rebuilds the session; the remote system stays the single source of
//! truth and no transition is applied optimistically. All steps are
//! synchronous; cancelling mid-call simply means not applying the reload.

use tracing::{info, warn};

use conf_engine::lifecycle::{self, CompletionPayload, VisibilityMode};
use conf_engine::reconcile::{self, CountVerdict};
use conf_model::{ConferenceError, ItemId, ManifestId, Owner, Result, UserId};

use crate::remote::{ConferenceBackend, ConfirmOutcome, FinishOutcome, StartOutcome};
use crate::session::ConferenceSession;

pub struct ConferenceFlow<B> {
    backend: B,
    operator: Owner,
    query: String,
    session: ConferenceSession,
    /// Set when a reload reveals that the lock this operator held moved to
    /// someone else; subsequent actions surface `StaleOwnership` instead of
    /// a plain transition error.
    lost_lock_to: Option<UserId>,
}

impl<B> std::fmt::Debug for ConferenceFlow<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConferenceFlow")
            .field("operator", &self.operator)
            .field("query", &self.query)
            .field("session", &self.session)
            .field("lost_lock_to", &self.lost_lock_to)
            .finish_non_exhaustive()
    }
}

impl<B: ConferenceBackend> ConferenceFlow<B> {
    /// Fetch the manifest and build the initial session.
    pub fn open(backend: B, operator: Owner, manifest: &ManifestId) -> Result<Self> {
        let detail = backend.manifest_detail(manifest)?;
        let session = ConferenceSession::build(detail, operator.user_id.clone(), "");
        Ok(Self {
            backend,
            operator,
            query: String::new(),
            session,
            lost_lock_to: None,
        })
    }

    pub fn session(&self) -> &ConferenceSession {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Re-fetch the manifest and rebuild the session, keeping the query.
    pub fn reload(&mut self) -> Result<()> {
        let id = self.session.manifest().id.clone();
        let was_working = self.session.visibility() == VisibilityMode::ConferenceWorking;
        let detail = self.backend.manifest_detail(&id)?;
        self.session = ConferenceSession::build(detail, self.operator.user_id.clone(), &self.query);

        let holder = self.session.manifest().owner();
        if was_working
            && self.session.visibility() == VisibilityMode::FullSummary
            && let Some(other) = holder
        {
            warn!(manifest = %id, holder = %other.user_id, "conference lock lost on reload");
            self.lost_lock_to = Some(other.user_id.clone());
        } else {
            self.lost_lock_to = None;
        }
        Ok(())
    }

    /// Change the search query; purely local, no remote call.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.session = self.session.with_query(query);
    }

    fn ensure_working(&self, action: &'static str) -> Result<()> {
        if self.session.visibility() == VisibilityMode::ConferenceWorking {
            return Ok(());
        }
        if let Some(owner) = &self.lost_lock_to {
            return Err(ConferenceError::StaleOwnership {
                owner: owner.clone(),
            });
        }
        Err(ConferenceError::InvalidTransition {
            action,
            status: self.session.manifest().status.label().to_string(),
        })
    }

    /// Request the conference lock.
    ///
    /// Losing the race is not an error: the outcome names the holder and
    /// the reloaded session falls back to summary visibility.
    pub fn start(&mut self) -> Result<StartOutcome> {
        lifecycle::ensure_can_start(self.session.manifest())?;
        let id = self.session.manifest().id.clone();
        let outcome = self.backend.start_conference(&id, &self.operator)?;
        match &outcome {
            StartOutcome::Started(owner) => {
                info!(manifest = %id, operator = %owner.user_id, "conference started");
            }
            StartOutcome::AlreadyOwned(owner) => {
                warn!(manifest = %id, holder = %owner.user_id, "conference already held");
            }
            StartOutcome::NotFound => {
                return Err(ConferenceError::RemoteNotFound(id.to_string()));
            }
        }
        self.reload()?;
        Ok(outcome)
    }

    /// First step of confirming an item: parse and range-check the typed
    /// count. Pure; nothing is sent or mutated.
    pub fn review(&self, item_id: &ItemId, raw: &str) -> Result<CountVerdict> {
        self.ensure_working("reviewing a count")?;
        let manifest = self.session.manifest();
        let Some(item) = manifest.item(item_id) else {
            return Err(ConferenceError::UnknownItem(item_id.clone()));
        };
        if item.is_confirmed() {
            return Err(ConferenceError::AlreadyConfirmed(item_id.clone()));
        }
        reconcile::review_count(&item.expected_quantity, raw)
    }

    /// Both steps at once: review the count, resolve the verdict with the
    /// justification (if any), submit, reload.
    ///
    /// Validation failures never reach the backend.
    pub fn confirm_item(
        &mut self,
        item_id: &ItemId,
        raw: &str,
        justification: Option<&str>,
    ) -> Result<()> {
        let verdict = self.review(item_id, raw)?;
        let confirmation = verdict.resolve(justification)?;

        let id = self.session.manifest().id.clone();
        match self.backend.confirm_item(&id, item_id, &confirmation)? {
            ConfirmOutcome::Confirmed => {
                info!(manifest = %id, item = %item_id, quantity = %confirmation.quantity,
                    divergent = confirmation.is_divergent(), "item confirmed");
                self.reload()
            }
            ConfirmOutcome::Conflict(message) => {
                self.reload()?;
                Err(ConferenceError::RemoteConflict(message))
            }
            ConfirmOutcome::NotFound => Err(ConferenceError::RemoteNotFound(item_id.to_string())),
        }
    }

    /// Close the conference with an optional closing note.
    pub fn finish(&mut self, closing_note: Option<&str>) -> Result<CompletionPayload> {
        self.ensure_working("finishing a conference")?;
        lifecycle::ensure_can_finish(self.session.manifest())?;
        let closing_note = conf_engine::normalize_note(closing_note)?;

        let id = self.session.manifest().id.clone();
        match self
            .backend
            .finish_conference(&id, closing_note.as_deref())?
        {
            FinishOutcome::Finished => {
                info!(manifest = %id, "conference finished");
                self.reload()?;
                Ok(CompletionPayload {
                    manifest_id: id,
                    closing_note,
                })
            }
            FinishOutcome::IncompleteItems(count) => {
                self.reload()?;
                Err(ConferenceError::RemoteConflict(format!(
                    "{count} item(s) still pending"
                )))
            }
            FinishOutcome::NotFound => Err(ConferenceError::RemoteNotFound(id.to_string())),
        }
    }
}
