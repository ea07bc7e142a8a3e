// src/models/anomaly.rs

//! Anomaly records requiring manual review.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::models::Item;

/// Which snapshot an item or duplicate group came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    New,
    Old,
}

impl Side {
    /// Wire label used in `source` fields and reasons.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::New => "new",
            Side::Old => "old",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A new/old pair sharing a normalized title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPair<'a> {
    pub new: &'a Item,
    pub old: &'a Item,
}

impl Serialize for ItemPair<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ItemPair", 2)?;
        state.serialize_field("new", self.new)?;
        state.serialize_field("old", self.old)?;
        state.end()
    }
}

/// An entry in the `anomalies` bucket.
///
/// Serialized as `{source, item, reason}`. The shape of `item` depends on
/// `source`: an array of items for `"new"`/`"old"`, a `{new, old}` object
/// for `"both"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly<'a> {
    /// One side holds several items with the same normalized title.
    Duplicate {
        side: Side,
        title: String,
        items: Vec<&'a Item>,
    },
    /// Both sides hold the title but details and/or price disagree.
    Mismatch(ItemPair<'a>),
}

impl<'a> Anomaly<'a> {
    /// Value of the `source` discriminator.
    pub fn source(&self) -> &'static str {
        match self {
            Anomaly::Duplicate { side, .. } => side.as_str(),
            Anomaly::Mismatch(_) => "both",
        }
    }

    /// Human-readable explanation.
    pub fn reason(&self) -> String {
        match self {
            Anomaly::Duplicate { side, title, items } => format!(
                "{} contains {} duplicate entries for title '{}'",
                side,
                items.len(),
                title
            ),
            Anomaly::Mismatch(_) => "same title but 'details' and/or 'price' differ".to_string(),
        }
    }

    /// Items this anomaly contributes to the review list.
    ///
    /// New-side duplicate groups contribute every member, mismatches their
    /// new item. Old-side groups contribute nothing.
    pub fn new_side_items(&self) -> Vec<&'a Item> {
        match self {
            Anomaly::Duplicate {
                side: Side::New,
                items,
                ..
            } => items.clone(),
            Anomaly::Duplicate { side: Side::Old, .. } => Vec::new(),
            Anomaly::Mismatch(pair) => vec![pair.new],
        }
    }
}

impl Serialize for Anomaly<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Anomaly", 3)?;
        state.serialize_field("source", self.source())?;
        match self {
            Anomaly::Duplicate { items, .. } => state.serialize_field("item", items)?,
            Anomaly::Mismatch(pair) => state.serialize_field("item", pair)?,
        }
        state.serialize_field("reason", &self.reason())?;
        state.end()
    }
}
