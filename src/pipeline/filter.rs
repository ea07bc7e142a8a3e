//! Sold-out filtering applied to both snapshots before comparison.

use crate::models::Item;
use crate::pipeline::normalize::normalize_text;

/// Detail text marking an item as out of stock.
const SOLD_OUT_MARKER: &str = "agotado";

/// True if the item's only detail is the sold-out marker.
///
/// Asterisks and surrounding whitespace are ignored, so `"*AGOTADO*"` counts.
pub fn is_sold_out(item: &Item) -> bool {
    match item.details() {
        [only] => normalize_text(only.replace('*', "").trim()) == SOLD_OUT_MARKER,
        _ => false,
    }
}

/// Borrow every item that is not sold out, preserving input order.
pub fn available_items(items: &[Item]) -> Vec<&Item> {
    items.iter().filter(|item| !is_sold_out(item)).collect()
}
