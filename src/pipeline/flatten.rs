//! Review list and ready-to-upsert list derivation.

use std::collections::HashSet;

use crate::models::{Anomaly, Item};
use crate::pipeline::normalize::normalize_text;

/// Keep the first item per normalized title, preserving order.
pub fn dedup_by_title<'a>(items: impl IntoIterator<Item = &'a Item>) -> Vec<&'a Item> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(normalize_text(item.title())))
        .collect()
}

/// Flatten anomalies into the new-side items needing review.
pub fn flatten_anomalies<'a>(anomalies: &[Anomaly<'a>]) -> Vec<&'a Item> {
    dedup_by_title(anomalies.iter().flat_map(Anomaly::new_side_items))
}

/// Inserts followed by flagged items, one entry per normalized title.
pub fn build_ready_list<'a>(to_insert: &[&'a Item], flagged: &[&'a Item]) -> Vec<&'a Item> {
    dedup_by_title(to_insert.iter().chain(flagged).copied())
}
