//! Per-item reconciliation of counted against declared quantities.
//!
//! The interactive workflow has two steps (enter the count, then justify a
//! shortfall) but the rules live here as pure decision values so the step
//! sequencing stays with the caller. Re-entering the quantity step simply
//! produces a fresh verdict; there is no retained state that could carry a
//! stale justification across attempts.

use conf_model::{ConferenceError, Confirmation, Quantity, Result};

use crate::note::normalize_note;

/// Decision produced by reviewing a counted quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountVerdict {
    /// Count matches the declared quantity; the item confirms cleanly.
    ConfirmClean { counted: Quantity },
    /// Count fell short; confirmation needs a non-empty justification.
    RequiresJustification { counted: Quantity },
}

impl CountVerdict {
    pub fn counted(&self) -> &Quantity {
        match self {
            CountVerdict::ConfirmClean { counted }
            | CountVerdict::RequiresJustification { counted } => counted,
        }
    }

    /// Turn the verdict into a confirmed-count record.
    ///
    /// A clean confirmation never carries a note, even if one was typed; a
    /// shortfall without a usable note is rejected with
    /// [`ConferenceError::MissingJustification`] and the item stays pending.
    pub fn resolve(self, justification: Option<&str>) -> Result<Confirmation> {
        match self {
            CountVerdict::ConfirmClean { counted } => Ok(Confirmation {
                quantity: counted,
                divergence_note: None,
            }),
            CountVerdict::RequiresJustification { counted } => {
                let note =
                    normalize_note(justification)?.ok_or(ConferenceError::MissingJustification)?;
                Ok(Confirmation {
                    quantity: counted,
                    divergence_note: Some(note),
                })
            }
        }
    }
}

/// Review raw operator input against the declared quantity.
///
/// Empty input counts as zero. Counting more than declared is never a valid
/// outcome, it signals a scanning or data mistake upstream, so values
/// above `expected` are rejected outright with
/// [`ConferenceError::ExceedsExpected`].
pub fn review_count(expected: &Quantity, raw: &str) -> Result<CountVerdict> {
    let trimmed = raw.trim();
    let counted = if trimmed.is_empty() {
        Quantity::ZERO
    } else {
        Quantity::parse(trimmed)?
    };
    if counted > *expected {
        return Err(ConferenceError::ExceedsExpected {
            counted,
            expected: *expected,
        });
    }
    if counted == *expected {
        Ok(CountVerdict::ConfirmClean { counted })
    } else {
        Ok(CountVerdict::RequiresJustification { counted })
    }
}
