//! Duplicate title detection within a single snapshot.

use indexmap::IndexMap;

use crate::models::{Anomaly, Item, Side};
use crate::pipeline::normalize::normalize_text;

/// Report every normalized title that appears more than once on one side.
///
/// Groups come out in first-appearance order and members in input order.
pub fn find_duplicates<'a>(items: &[&'a Item], side: Side) -> Vec<Anomaly<'a>> {
    let mut groups: IndexMap<String, Vec<&'a Item>> = IndexMap::new();
    for item in items {
        groups
            .entry(normalize_text(item.title()))
            .or_default()
            .push(*item);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(title, members)| {
            log::debug!(
                "{} snapshot has {} items titled '{}'",
                side,
                members.len(),
                title
            );
            Anomaly::Duplicate {
                side,
                title,
                items: members,
            }
        })
        .collect()
}
