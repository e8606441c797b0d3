//! Multi-term filtering of manifest items.

use conf_model::ManifestItem;

use crate::normalize::normalize;

/// The searchable text of one item: description, product code, EAN
/// reference, and short barcode, normalized into a single haystack.
fn haystack(item: &ManifestItem) -> String {
    normalize(&format!(
        "{} {} {} {}",
        item.description, item.product_code, item.reference, item.short_barcode
    ))
}

/// Keep the items matching every whitespace-separated term of `query`.
///
/// Terms are normalized and matched as substrings of the item haystack in
/// any order (AND semantics). An empty or blank query keeps every item.
/// Input order is preserved.
pub fn filter_items<'a>(items: &'a [ManifestItem], query: &str) -> Vec<&'a ManifestItem> {
    let normalized = normalize(query);
    let terms: Vec<&str> = normalized.split_whitespace().collect();
    if terms.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            let hay = haystack(item);
            terms.iter().all(|term| hay.contains(term))
        })
        .collect()
}
