// src/models/report.rs

//! Reconciliation results.

use serde::Serialize;

use crate::models::{Anomaly, Item};

/// The four classification buckets, written as `diferencias.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classification<'a> {
    /// Titles present only in the new snapshot
    pub to_insert: Vec<&'a Item>,
    /// Titles present only in the old snapshot
    pub to_remove: Vec<&'a Item>,
    /// Titles whose normalized details and price match on both sides
    pub unchanged: Vec<&'a Item>,
    /// Duplicate groups (new, then old) followed by mismatches
    pub anomalies: Vec<Anomaly<'a>>,
}

impl Classification<'_> {
    /// Check if the new snapshot differs from the old one at all.
    pub fn has_changes(&self) -> bool {
        !self.to_insert.is_empty() || !self.to_remove.is_empty() || !self.anomalies.is_empty()
    }
}

/// Everything produced by one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct Report<'a> {
    /// Bucketed differences between the snapshots
    pub diferencias: Classification<'a>,
    /// New-side items flagged for manual review
    pub anomalies: Vec<&'a Item>,
    /// Inserts plus flagged items, one per normalized title
    pub ready_to_upsert: Vec<&'a Item>,
    /// Item counts before and after sold-out filtering
    pub stats: InputStats,
}

impl Report<'_> {
    /// Counts for the console summary, in display order.
    pub fn summary_items(&self) -> Vec<(&'static str, String)> {
        let d = &self.diferencias;
        let s = &self.stats;
        vec![
            ("New items", format!("{} ({} sold out)", s.new_total, s.new_sold_out)),
            ("Old items", format!("{} ({} sold out)", s.old_total, s.old_sold_out)),
            ("To insert", d.to_insert.len().to_string()),
            ("To remove", d.to_remove.len().to_string()),
            ("Unchanged", d.unchanged.len().to_string()),
            ("Anomalies", d.anomalies.len().to_string()),
            ("Flagged for review", self.anomalies.len().to_string()),
            ("Ready to upsert", self.ready_to_upsert.len().to_string()),
        ]
    }
}

/// Input sizes observed during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputStats {
    pub new_total: usize,
    pub old_total: usize,
    pub new_sold_out: usize,
    pub old_sold_out: usize,
}
