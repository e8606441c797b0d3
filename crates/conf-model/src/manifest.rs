use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{ItemId, ManifestId, UserId};
use crate::quantity::Quantity;

/// The operator currently holding the conference lock on a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub user_id: UserId,
    pub user_name: String,
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.user_id, self.user_name)
    }
}

/// Manifest lifecycle status, tagged with the system of record's status
/// codes. The owner exists exactly while a conference is in progress; the
/// other states cannot carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ManifestStatus {
    #[serde(rename = "D")]
    Pending,
    #[serde(rename = "E")]
    InConference { owner: Owner },
    #[serde(rename = "C")]
    Completed,
}

impl ManifestStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ManifestStatus::Pending => "D",
            ManifestStatus::InConference { .. } => "E",
            ManifestStatus::Completed => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ManifestStatus::Pending => "pending",
            ManifestStatus::InConference { .. } => "in conference",
            ManifestStatus::Completed => "completed",
        }
    }

    pub fn owner(&self) -> Option<&Owner> {
        match self {
            ManifestStatus::InConference { owner } => Some(owner),
            _ => None,
        }
    }
}

impl fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether a line item belongs to the company's own invoices or to a
/// third party's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    #[serde(rename = "O")]
    Own,
    #[serde(rename = "T")]
    ThirdParty,
}

impl ItemCategory {
    /// Map the upstream single-letter type code: `O` marks own invoices,
    /// anything else is treated as third party.
    pub fn from_code(code: char) -> Self {
        if code == 'O' {
            ItemCategory::Own
        } else {
            ItemCategory::ThirdParty
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemCategory::Own => "Own invoices",
            ItemCategory::ThirdParty => "Third-party invoices",
        }
    }
}

/// The outcome of counting one item: the accepted quantity, and a
/// justification when it fell short of the declared amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub quantity: Quantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divergence_note: Option<String>,
}

impl Confirmation {
    pub fn is_divergent(&self) -> bool {
        self.divergence_note.is_some()
    }
}

/// One line item of a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestItem {
    pub id: ItemId,
    pub product_code: String,
    /// Short packaging code printed beside the DUN barcode.
    pub short_barcode: String,
    pub description: String,
    /// EAN reference used for lookup and search.
    pub reference: String,
    pub category: ItemCategory,
    pub expected_quantity: Quantity,
    /// Display label for the counting unit (e.g. `CX`, `UN`).
    pub unit: String,
    pub declared_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<Confirmation>,
}

impl ManifestItem {
    pub fn is_confirmed(&self) -> bool {
        self.confirmation.is_some()
    }

    pub fn confirmed_quantity(&self) -> Option<&Quantity> {
        self.confirmation.as_ref().map(|c| &c.quantity)
    }

    pub fn divergence_note(&self) -> Option<&str> {
        self.confirmation
            .as_ref()
            .and_then(|c| c.divergence_note.as_deref())
    }
}

/// A shipment manifest under physical verification.
///
/// Totals (`declared_weight`, `declared_pallet_count`) are facts supplied by
/// the system of record; the engine stores them as given and never
/// recomputes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub id: ManifestId,
    pub date: NaiveDate,
    pub driver: String,
    pub vehicle: String,
    pub plate: String,
    pub declared_weight: f64,
    pub declared_pallet_count: u32,
    pub status: ManifestStatus,
    /// Declaration order is preserved; display order derives from it.
    pub items: Vec<ManifestItem>,
}

impl Manifest {
    pub fn owner(&self) -> Option<&Owner> {
        self.status.owner()
    }

    pub fn item(&self, id: &ItemId) -> Option<&ManifestItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut ManifestItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    pub fn all_items_confirmed(&self) -> bool {
        self.items.iter().all(ManifestItem::is_confirmed)
    }

    pub fn confirmed_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_confirmed()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.items.len() - self.confirmed_count()
    }

    pub fn summary(&self) -> ManifestSummary {
        ManifestSummary {
            id: self.id.clone(),
            date: self.date,
            driver: self.driver.clone(),
            vehicle: self.vehicle.clone(),
            plate: self.plate.clone(),
            declared_weight: self.declared_weight,
            declared_pallet_count: self.declared_pallet_count,
            status: self.status.clone(),
        }
    }
}

/// List-view projection of a manifest: the fields shown on the day's
/// overview, without the item collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestSummary {
    pub id: ManifestId,
    pub date: NaiveDate,
    pub driver: String,
    pub vehicle: String,
    pub plate: String,
    pub declared_weight: f64,
    pub declared_pallet_count: u32,
    pub status: ManifestStatus,
}

impl ManifestSummary {
    pub fn is_locked_by(&self, user: &UserId) -> bool {
        self.status
            .owner()
            .is_some_and(|owner| &owner.user_id == user)
    }
}
