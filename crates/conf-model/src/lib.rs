pub mod error;
pub mod ids;
pub mod manifest;
pub mod quantity;

pub use error::{ConferenceError, Result};
pub use ids::{ItemId, ManifestId, UserId};
pub use manifest::{
    Confirmation, ItemCategory, Manifest, ManifestItem, ManifestStatus, ManifestSummary, Owner,
};
pub use quantity::{MAX_FRACTION_DIGITS, Quantity};
