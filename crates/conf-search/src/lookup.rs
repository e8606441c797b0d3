//! Exact lookup for decoded barcode scans.

use conf_model::ManifestItem;

/// Find the item a decoded scan refers to.
///
/// Scans match exactly (after trimming) against the product code, the EAN
/// reference, or the short barcode, never fuzzily; partial matching is for
/// typed search only. The first match in declaration order wins.
pub fn find_by_scan<'a>(items: &'a [ManifestItem], code: &str) -> Option<&'a ManifestItem> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    items.iter().find(|item| {
        item.product_code == code || item.reference == code || item.short_barcode == code
    })
}

#[cfg(test)]
mod tests {
    use conf_model::{ItemCategory, ItemId, Quantity};

    use super::*;

    fn item(id: &str, code: &str, reference: &str, short: &str) -> ManifestItem {
        ManifestItem {
            id: ItemId::new(id).unwrap(),
            product_code: code.to_string(),
            short_barcode: short.to_string(),
            description: "Óleo de Soja 900ml".to_string(),
            reference: reference.to_string(),
            category: ItemCategory::ThirdParty,
            expected_quantity: Quantity::from(6),
            unit: "CX".to_string(),
            declared_weight: 5.4,
            confirmation: None,
        }
    }

    #[test]
    fn matches_each_identifier_exactly() {
        let items = vec![
            item("1", "4001", "7891000100103", "0417"),
            item("2", "4002", "7891000244002", "0533"),
        ];
        assert_eq!(
            find_by_scan(&items, "4002").unwrap().id.as_str(),
            "2"
        );
        assert_eq!(
            find_by_scan(&items, " 7891000100103 ").unwrap().id.as_str(),
            "1"
        );
        assert_eq!(find_by_scan(&items, "0533").unwrap().id.as_str(), "2");
    }

    #[test]
    fn partial_codes_never_match() {
        let items = vec![item("1", "4001", "7891000100103", "0417")];
        assert!(find_by_scan(&items, "400").is_none());
        assert!(find_by_scan(&items, "7891000").is_none());
        assert!(find_by_scan(&items, "").is_none());
    }
}
