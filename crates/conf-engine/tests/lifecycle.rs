//! State machine and visibility tests.

use chrono::NaiveDate;
use conf_engine::lifecycle::{
    VisibilityMode, can_finish, can_start, can_view_as_owner, transition_to_completed,
    transition_to_in_conference, visibility_mode,
};
use conf_engine::MAX_NOTE_LENGTH;
use conf_model::{
    ConferenceError, Confirmation, ItemCategory, ItemId, Manifest, ManifestId, ManifestItem,
    ManifestStatus, Owner, Quantity, UserId,
};

fn owner(id: &str, name: &str) -> Owner {
    Owner {
        user_id: UserId::new(id).unwrap(),
        user_name: name.to_string(),
    }
}

fn item(id: &str, confirmed: bool) -> ManifestItem {
    ManifestItem {
        id: ItemId::new(id).unwrap(),
        product_code: format!("P{id}"),
        short_barcode: "0417".to_string(),
        description: "Farinha de Trigo 5kg".to_string(),
        reference: "7891000244001".to_string(),
        category: ItemCategory::Own,
        expected_quantity: Quantity::from(8),
        unit: "FD".to_string(),
        declared_weight: 40.0,
        confirmation: confirmed.then(|| Confirmation {
            quantity: Quantity::from(8),
            divergence_note: None,
        }),
    }
}

fn manifest(status: ManifestStatus, items: Vec<ManifestItem>) -> Manifest {
    Manifest {
        id: ManifestId::new("240001").unwrap(),
        date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        driver: "Carlos Pereira".to_string(),
        vehicle: "MB Atego 2426".to_string(),
        plate: "XYZ9A88".to_string(),
        declared_weight: 1800.0,
        declared_pallet_count: 10,
        status,
        items,
    }
}

#[test]
fn only_pending_manifests_can_start() {
    assert!(can_start(&manifest(ManifestStatus::Pending, vec![])));
    assert!(!can_start(&manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana")
        },
        vec![]
    )));
    assert!(!can_start(&manifest(ManifestStatus::Completed, vec![])));
}

#[test]
fn starting_twice_is_a_contract_violation() {
    let mut m = manifest(ManifestStatus::Pending, vec![item("1", false)]);
    transition_to_in_conference(&mut m, owner("1", "Ana")).unwrap();
    assert_eq!(m.owner().unwrap().user_name, "Ana");

    let err = transition_to_in_conference(&mut m, owner("2", "Bruno")).unwrap_err();
    assert!(matches!(err, ConferenceError::InvalidTransition { .. }));
    // The first owner keeps the lock.
    assert_eq!(m.owner().unwrap().user_name, "Ana");
}

#[test]
fn visibility_splits_owner_from_everyone_else() {
    let viewer = UserId::new("1").unwrap();
    let other = UserId::new("2").unwrap();
    let running = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![],
    );

    assert!(can_view_as_owner(&running, &viewer));
    assert_eq!(
        visibility_mode(&running, &viewer),
        VisibilityMode::ConferenceWorking
    );
    // Non-owners keep the summary as a lock indicator.
    assert_eq!(
        visibility_mode(&running, &other),
        VisibilityMode::FullSummary
    );

    // Outside a conference everyone sees the summary.
    let pending = manifest(ManifestStatus::Pending, vec![]);
    assert_eq!(
        visibility_mode(&pending, &viewer),
        VisibilityMode::FullSummary
    );
}

#[test]
fn finish_needs_every_item_confirmed() {
    let in_conf = |items| {
        manifest(
            ManifestStatus::InConference {
                owner: owner("1", "Ana"),
            },
            items,
        )
    };

    assert!(!can_finish(&in_conf(vec![item("1", true), item("2", false)])));
    assert!(can_finish(&in_conf(vec![item("1", true), item("2", true)])));
    // Zero items is trivially finish-eligible once in conference.
    assert!(can_finish(&in_conf(vec![])));
    // ...but never outside one.
    assert!(!can_finish(&manifest(ManifestStatus::Pending, vec![])));
}

#[test]
fn completion_clears_the_owner_and_carries_the_note() {
    let mut m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![item("1", true)],
    );
    let payload = transition_to_completed(&mut m, Some("  no damage found  ")).unwrap();
    assert_eq!(m.status, ManifestStatus::Completed);
    assert!(m.owner().is_none());
    assert_eq!(payload.manifest_id, m.id);
    assert_eq!(payload.closing_note.as_deref(), Some("no damage found"));
}

#[test]
fn blank_closing_note_is_omitted() {
    let mut m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![],
    );
    let payload = transition_to_completed(&mut m, Some("   ")).unwrap();
    assert_eq!(payload.closing_note, None);
}

#[test]
fn over_long_closing_note_blocks_completion() {
    let mut m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![],
    );
    let long = "x".repeat(MAX_NOTE_LENGTH + 1);
    let err = transition_to_completed(&mut m, Some(&long)).unwrap_err();
    assert_eq!(
        err,
        ConferenceError::NoteTooLong {
            limit: MAX_NOTE_LENGTH
        }
    );
    // Rejection leaves the conference running.
    assert!(matches!(m.status, ManifestStatus::InConference { .. }));
}

#[test]
fn completing_with_pending_items_is_rejected() {
    let mut m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![item("1", false)],
    );
    let err = transition_to_completed(&mut m, None).unwrap_err();
    assert!(matches!(err, ConferenceError::InvalidTransition { .. }));
    assert!(matches!(m.status, ManifestStatus::InConference { .. }));
}
