//! Title-keyed classification of two snapshots.
//!
//! Each side is indexed by normalized title, then every title is placed in
//! exactly one bucket:
//!
//! - new only: `to_insert`
//! - old only: `to_remove`
//! - both, same normalized key: `unchanged`
//! - both, key differs: a mismatch anomaly

use indexmap::IndexMap;

use crate::models::{Anomaly, Classification, Item, ItemPair};
use crate::pipeline::normalize::{normalize_price, normalize_text};

/// Comparison key of an item. Detail order does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedKey {
    pub title: String,
    pub details: Vec<String>,
    pub price: String,
}

impl NormalizedKey {
    /// Compute the key for an item.
    pub fn of(item: &Item) -> Self {
        let mut details: Vec<String> = item.details().iter().map(|d| normalize_text(d)).collect();
        details.sort();
        Self {
            title: normalize_text(item.title()),
            details,
            price: normalize_price(item.price()),
        }
    }
}

/// Normalized title to the item holding it, in first-appearance order.
pub type TitleIndex<'a> = IndexMap<String, &'a Item>;

/// Index one side by normalized title.
///
/// When a title repeats, the entry keeps its first position but the last
/// item replaces earlier ones.
pub fn build_title_index<'a>(items: &[&'a Item]) -> TitleIndex<'a> {
    let mut index = TitleIndex::with_capacity(items.len());
    for item in items {
        index.insert(normalize_text(item.title()), *item);
    }
    index
}

/// Bucket every title of both snapshots.
///
/// The returned `anomalies` holds mismatches only; duplicate groups are
/// added by the caller.
pub fn classify<'a>(new_items: &[&'a Item], old_items: &[&'a Item]) -> Classification<'a> {
    let new_index = build_title_index(new_items);
    let old_index = build_title_index(old_items);

    let mut result = Classification::default();

    for (title, new_item) in &new_index {
        match old_index.get(title) {
            None => result.to_insert.push(*new_item),
            Some(old_item) if NormalizedKey::of(new_item) == NormalizedKey::of(old_item) => {
                result.unchanged.push(*new_item)
            }
            Some(old_item) => {
                log::debug!("Title '{}' differs between snapshots", title);
                result.anomalies.push(Anomaly::Mismatch(ItemPair {
                    new: *new_item,
                    old: *old_item,
                }));
            }
        }
    }

    result.to_remove = old_index
        .iter()
        .filter(|(title, _)| !new_index.contains_key(*title))
        .map(|(_, item)| *item)
        .collect();

    result
}
