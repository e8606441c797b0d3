//! Session partitioning, visibility, and confirmation-guard tests.

use chrono::NaiveDate;
use conf_engine::lifecycle::VisibilityMode;
use conf_model::{
    ConferenceError, Confirmation, ItemCategory, ItemId, Manifest, ManifestId, ManifestItem,
    ManifestStatus, Owner, Quantity, UserId,
};
use conf_session::ConferenceSession;

fn owner(id: &str, name: &str) -> Owner {
    Owner {
        user_id: UserId::new(id).unwrap(),
        user_name: name.to_string(),
    }
}

fn item(id: &str, description: &str, category: ItemCategory, expected: u64) -> ManifestItem {
    ManifestItem {
        id: ItemId::new(id).unwrap(),
        product_code: format!("4{id:0>3}"),
        short_barcode: "0417".to_string(),
        description: description.to_string(),
        reference: format!("78910001001{id:0>2}"),
        category,
        expected_quantity: Quantity::from(expected),
        unit: "CX".to_string(),
        declared_weight: 10.0,
        confirmation: None,
    }
}

fn confirmed(mut base: ManifestItem) -> ManifestItem {
    base.confirmation = Some(Confirmation {
        quantity: base.expected_quantity,
        divergence_note: None,
    });
    base
}

fn manifest(status: ManifestStatus, items: Vec<ManifestItem>) -> Manifest {
    Manifest {
        id: ManifestId::new("240099").unwrap(),
        date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        driver: "José da Silva".to_string(),
        vehicle: "VW Delivery 11.180".to_string(),
        plate: "ABC1D23".to_string(),
        declared_weight: 950.5,
        declared_pallet_count: 6,
        status,
        items,
    }
}

fn viewer(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

#[test]
fn build_partitions_by_state_and_category() {
    let m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![
            item("1", "Açúcar Cristal", ItemCategory::Own, 5),
            confirmed(item("2", "Café Torrado", ItemCategory::Own, 3)),
            item("3", "Óleo de Soja", ItemCategory::ThirdParty, 6),
            item("4", "Farinha de Trigo", ItemCategory::Own, 8),
        ],
    );
    let session = ConferenceSession::build(m, viewer("1"), "");

    let own: Vec<&str> = session
        .own_pending()
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(own, vec!["1", "4"]);
    let third: Vec<&str> = session
        .third_party_pending()
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(third, vec!["3"]);
    let done: Vec<&str> = session
        .confirmed_items()
        .iter()
        .map(|i| i.id.as_str())
        .collect();
    assert_eq!(done, vec!["2"]);
}

#[test]
fn active_search_filters_pending_and_hides_confirmed() {
    let m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![
            item("1", "Açúcar Cristal", ItemCategory::Own, 5),
            item("2", "Açúcar Refinado", ItemCategory::ThirdParty, 3),
            confirmed(item("3", "Açúcar Mascavo", ItemCategory::Own, 2)),
            item("4", "Café Torrado", ItemCategory::Own, 7),
        ],
    );
    let session = ConferenceSession::build(m, viewer("1"), "açucar");

    assert!(session.is_search_active());
    assert_eq!(session.own_pending().len(), 1);
    assert_eq!(session.third_party_pending().len(), 1);
    // Confirmed items disappear while searching, even matching ones.
    assert!(session.confirmed_items().is_empty());
}

#[test]
fn summary_is_suppressed_only_for_the_working_owner() {
    let running = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![],
    );

    let as_owner = ConferenceSession::build(running.clone(), viewer("1"), "");
    assert_eq!(as_owner.visibility(), VisibilityMode::ConferenceWorking);
    assert!(as_owner.summary().is_none());

    let as_other = ConferenceSession::build(running, viewer("2"), "");
    assert_eq!(as_other.visibility(), VisibilityMode::FullSummary);
    let summary = as_other.summary().expect("non-owner keeps the summary");
    assert_eq!(summary.status.owner().unwrap().user_name, "Ana");

    let pending = manifest(ManifestStatus::Pending, vec![]);
    let session = ConferenceSession::build(pending, viewer("1"), "");
    assert!(session.summary().is_some());
}

#[test]
fn confirmation_walkthrough_reaches_finish_eligibility() {
    // Two-item manifest: 5 counted clean, then 2 of 3 with a note.
    let m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![
            item("1", "Açúcar Cristal", ItemCategory::Own, 5),
            item("2", "Café Torrado", ItemCategory::Own, 3),
        ],
    );
    let session = ConferenceSession::build(m, viewer("1"), "");
    assert!(!session.finish_eligible());

    let session = session
        .record_confirmation(
            &ItemId::new("1").unwrap(),
            Confirmation {
                quantity: Quantity::from(5),
                divergence_note: None,
            },
        )
        .unwrap();
    assert!(!session.finish_eligible());

    let session = session
        .record_confirmation(
            &ItemId::new("2").unwrap(),
            Confirmation {
                quantity: Quantity::from(2),
                divergence_note: Some("broken case".to_string()),
            },
        )
        .unwrap();
    assert!(session.finish_eligible());

    let second = session.manifest().item(&ItemId::new("2").unwrap()).unwrap();
    assert_eq!(second.confirmed_quantity(), Some(&Quantity::from(2)));
    assert_eq!(second.divergence_note(), Some("broken case"));
}

#[test]
fn non_owner_confirmation_is_an_invalid_transition() {
    let m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![item("1", "Açúcar Cristal", ItemCategory::Own, 5)],
    );
    let session = ConferenceSession::build(m, viewer("2"), "");
    let err = session
        .record_confirmation(
            &ItemId::new("1").unwrap(),
            Confirmation {
                quantity: Quantity::from(5),
                divergence_note: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, ConferenceError::InvalidTransition { .. }));
}

#[test]
fn confirmation_guards_reject_bad_records() {
    let m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![
            item("1", "Açúcar Cristal", ItemCategory::Own, 5),
            confirmed(item("2", "Café Torrado", ItemCategory::Own, 3)),
        ],
    );
    let session = ConferenceSession::build(m, viewer("1"), "");
    let clean = |quantity: u64| Confirmation {
        quantity: Quantity::from(quantity),
        divergence_note: None,
    };

    assert!(matches!(
        session
            .record_confirmation(&ItemId::new("9").unwrap(), clean(5))
            .unwrap_err(),
        ConferenceError::UnknownItem(_)
    ));
    assert!(matches!(
        session
            .record_confirmation(&ItemId::new("2").unwrap(), clean(3))
            .unwrap_err(),
        ConferenceError::AlreadyConfirmed(_)
    ));
    assert!(matches!(
        session
            .record_confirmation(&ItemId::new("1").unwrap(), clean(7))
            .unwrap_err(),
        ConferenceError::ExceedsExpected { .. }
    ));
    // Shortfall without a note never lands.
    assert_eq!(
        session
            .record_confirmation(&ItemId::new("1").unwrap(), clean(4))
            .unwrap_err(),
        ConferenceError::MissingJustification
    );
}

#[test]
fn stray_note_on_a_clean_count_is_dropped() {
    let m = manifest(
        ManifestStatus::InConference {
            owner: owner("1", "Ana"),
        },
        vec![item("1", "Açúcar Cristal", ItemCategory::Own, 5)],
    );
    let session = ConferenceSession::build(m, viewer("1"), "");
    let next = session
        .record_confirmation(
            &ItemId::new("1").unwrap(),
            Confirmation {
                quantity: Quantity::from(5),
                divergence_note: Some("should not persist".to_string()),
            },
        )
        .unwrap();
    let item = next.manifest().item(&ItemId::new("1").unwrap()).unwrap();
    assert_eq!(item.divergence_note(), None);
}
