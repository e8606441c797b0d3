use thiserror::Error;

use crate::ids::{ItemId, UserId};
use crate::quantity::Quantity;

/// Errors surfaced by the conference engine.
///
/// Validation errors (`InvalidQuantity`, `ExceedsExpected`,
/// `MissingJustification`, `NoteTooLong`) are recoverable by correcting the
/// operator input; nothing is mutated and no remote call is made. The
/// remaining variants are contract violations or remote failures whose
/// remedy is to reload the manifest and re-derive the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConferenceError {
    #[error("invalid quantity input: {input:?}")]
    InvalidQuantity { input: String },
    #[error("counted quantity {counted} exceeds the declared {expected}")]
    ExceedsExpected { counted: Quantity, expected: Quantity },
    #[error("a justification is required when the counted quantity falls short")]
    MissingJustification,
    #[error("note exceeds the {limit}-character limit")]
    NoteTooLong { limit: usize },
    #[error("{action} is not allowed while the manifest is {status}")]
    InvalidTransition {
        action: &'static str,
        status: String,
    },
    #[error("identifier must not be empty: {0}")]
    EmptyIdentifier(&'static str),
    #[error("item {0} is not part of this manifest")]
    UnknownItem(ItemId),
    #[error("item {0} has already been confirmed")]
    AlreadyConfirmed(ItemId),
    #[error("conference is held by another operator ({owner})")]
    StaleOwnership { owner: UserId },
    #[error("remote rejected the request: {0}")]
    RemoteConflict(String),
    #[error("remote target not found: {0}")]
    RemoteNotFound(String),
}

pub type Result<T> = std::result::Result<T, ConferenceError>;
