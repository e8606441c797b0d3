//! Serialization and invariant tests for the manifest model.

use chrono::NaiveDate;
use conf_model::{
    Confirmation, ItemCategory, ItemId, Manifest, ManifestId, ManifestItem, ManifestStatus, Owner,
    Quantity, UserId,
};
use proptest::prelude::*;

fn sample_item(id: &str, confirmed: bool) -> ManifestItem {
    ManifestItem {
        id: ItemId::new(id).unwrap(),
        product_code: format!("P{id}"),
        short_barcode: "0417".to_string(),
        description: "Açúcar Cristal 1kg".to_string(),
        reference: "7891000100103".to_string(),
        category: ItemCategory::Own,
        expected_quantity: Quantity::parse("12").unwrap(),
        unit: "CX".to_string(),
        declared_weight: 12.5,
        confirmation: confirmed.then(|| Confirmation {
            quantity: Quantity::parse("12").unwrap(),
            divergence_note: None,
        }),
    }
}

fn sample_manifest() -> Manifest {
    Manifest {
        id: ManifestId::new("240156").unwrap(),
        date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        driver: "José da Silva".to_string(),
        vehicle: "VW Delivery 11.180".to_string(),
        plate: "ABC1D23".to_string(),
        declared_weight: 2428.68,
        declared_pallet_count: 14,
        status: ManifestStatus::InConference {
            owner: Owner {
                user_id: UserId::new("42").unwrap(),
                user_name: "Bruno".to_string(),
            },
        },
        items: vec![sample_item("1", true), sample_item("2", false)],
    }
}

#[test]
fn manifest_round_trips_through_json() {
    let manifest = sample_manifest();
    let json = serde_json::to_string_pretty(&manifest).expect("serialize manifest");
    let back: Manifest = serde_json::from_str(&json).expect("deserialize manifest");
    assert_eq!(back, manifest);
}

#[test]
fn confirmation_fields_are_omitted_until_present() {
    let pending = sample_item("9", false);
    let json = serde_json::to_value(&pending).expect("serialize item");
    assert!(json.get("confirmation").is_none());

    let confirmed = ManifestItem {
        confirmation: Some(Confirmation {
            quantity: Quantity::parse("10").unwrap(),
            divergence_note: Some("broken case".to_string()),
        }),
        ..pending
    };
    let json = serde_json::to_value(&confirmed).expect("serialize item");
    assert_eq!(json["confirmation"]["quantity"], "10");
    assert_eq!(json["confirmation"]["divergence_note"], "broken case");
}

#[test]
fn quantity_deserializes_from_strings_and_numbers() {
    let from_string: Quantity = serde_json::from_str(r#""2,10""#).expect("from comma string");
    let from_number: Quantity = serde_json::from_str("2.1").expect("from json number");
    let from_integer: Quantity = serde_json::from_str("2").expect("from integer");
    assert_eq!(from_string, from_number);
    assert!(from_integer < from_number);

    assert!(serde_json::from_str::<Quantity>("-1").is_err());
    assert!(serde_json::from_str::<Quantity>(r#""1.2.3""#).is_err());
}

#[test]
fn pending_and_confirmed_counts_partition_the_items() {
    let manifest = sample_manifest();
    assert_eq!(manifest.confirmed_count(), 1);
    assert_eq!(manifest.pending_count(), 1);
    assert!(!manifest.all_items_confirmed());
}

proptest! {
    /// Parsing never panics, whatever the operator types.
    #[test]
    fn quantity_parse_total(input in "\\PC*") {
        let _ = Quantity::parse(&input);
    }

    /// Comma and dot inputs are the same value, and trailing fraction
    /// zeros never make two equal counts diverge.
    #[test]
    fn quantity_separator_and_zeros_normalize(int in 0u64..1_000_000, frac in 0u32..1000) {
        let dotted = format!("{int}.{frac:03}");
        let comma = format!("{int},{frac:03}0");
        let a = Quantity::parse(&dotted).unwrap();
        let b = Quantity::parse(&comma).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.to_string().replace('.', ","), a.to_comma_string());
    }

    /// Display output parses back to the same value.
    #[test]
    fn quantity_display_round_trips(int in 0u64..1_000_000, frac in 0u32..1_000_000) {
        let value = Quantity::parse(&format!("{int}.{frac:06}")).unwrap();
        let back = Quantity::parse(&value.to_string()).unwrap();
        prop_assert_eq!(value, back);
    }
}
