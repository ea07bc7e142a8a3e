//! Full reconciliation of a new snapshot against an old one.
//!
//! Stages, in order:
//!
//! 1. Drop sold-out items from both sides
//! 2. Detect duplicate titles (new side, then old side)
//! 3. Classify titles into insert/remove/unchanged/mismatch
//! 4. Flatten anomalies into the review list
//! 5. Build the ready-to-upsert list

use crate::models::{InputStats, Item, Report, Side};
use crate::pipeline::classify::classify;
use crate::pipeline::duplicates::find_duplicates;
use crate::pipeline::filter::available_items;
use crate::pipeline::flatten::{build_ready_list, flatten_anomalies};

/// Reconcile two snapshots. Output buckets borrow from the inputs.
pub fn reconcile<'a>(new_items: &'a [Item], old_items: &'a [Item]) -> Report<'a> {
    let new = available_items(new_items);
    let old = available_items(old_items);

    let stats = InputStats {
        new_total: new_items.len(),
        old_total: old_items.len(),
        new_sold_out: new_items.len() - new.len(),
        old_sold_out: old_items.len() - old.len(),
    };
    log::debug!(
        "Comparing {} new against {} old items ({} + {} sold out skipped)",
        new.len(),
        old.len(),
        stats.new_sold_out,
        stats.old_sold_out
    );

    let mut anomalies = find_duplicates(&new, Side::New);
    anomalies.extend(find_duplicates(&old, Side::Old));

    let mut diferencias = classify(&new, &old);
    anomalies.append(&mut diferencias.anomalies);
    diferencias.anomalies = anomalies;

    let flagged = flatten_anomalies(&diferencias.anomalies);
    let ready_to_upsert = build_ready_list(&diferencias.to_insert, &flagged);

    Report {
        diferencias,
        anomalies: flagged,
        ready_to_upsert,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::json;

    use super::*;
    use crate::models::Anomaly;
    use crate::pipeline::normalize::normalize_text;

    fn item(title: &str, details: &[&str], price: &str) -> Item {
        Item::new(title, details.iter().copied(), price)
    }

    #[test]
    fn test_single_insert() {
        let new = vec![item("Pizza", &["muzzarella"], "1000")];
        let old: Vec<Item> = vec![];

        let report = reconcile(&new, &old);
        let d = &report.diferencias;
        assert_eq!(d.to_insert, vec![&new[0]]);
        assert!(d.to_remove.is_empty());
        assert!(d.unchanged.is_empty());
        assert!(d.anomalies.is_empty());
        assert!(report.anomalies.is_empty());
        assert_eq!(report.ready_to_upsert, d.to_insert);
    }

    #[test]
    fn test_accent_only_difference_is_unchanged() {
        let new = vec![item("Café con leche", &["grande"], "1500")];
        let old = vec![item("Cafe con leche", &["grande"], "1500")];

        let report = reconcile(&new, &old);
        assert_eq!(report.diferencias.unchanged, vec![&new[0]]);
        assert!(report.diferencias.anomalies.is_empty());
        assert!(!report.diferencias.has_changes());
    }

    #[test]
    fn test_dot_thousands_vs_decimal_comma_is_mismatch() {
        // "1.000" keeps its single dot, "1000,00" becomes "1000.00".
        let new = vec![item("Flan", &["casero"], "1000,00")];
        let old = vec![item("Flan", &["casero"], "1.000")];

        let report = reconcile(&new, &old);
        assert!(report.diferencias.unchanged.is_empty());
        assert_eq!(report.diferencias.anomalies.len(), 1);
        assert_eq!(report.diferencias.anomalies[0].source(), "both");
        assert_eq!(report.anomalies, vec![&new[0]]);
        assert_eq!(report.ready_to_upsert, vec![&new[0]]);
    }

    #[test]
    fn test_equivalent_price_formats_are_unchanged() {
        let new = vec![item("Lomo", &["completo"], "ARS 1.234,56")];
        let old = vec![item("Lomo", &["completo"], "$1,234.56")];

        let report = reconcile(&new, &old);
        assert_eq!(report.diferencias.unchanged.len(), 1);
    }

    #[test]
    fn test_new_side_duplicates() {
        let new = vec![
            item("Empanada", &["carne"], "500"),
            item("empanada", &["carne"], "550"),
        ];
        let old: Vec<Item> = vec![];

        let report = reconcile(&new, &old);
        let anomalies = &report.diferencias.anomalies;
        assert_eq!(anomalies.len(), 1);
        match &anomalies[0] {
            Anomaly::Duplicate { side, items, .. } => {
                assert_eq!(*side, Side::New);
                assert_eq!(items, &vec![&new[0], &new[1]]);
            }
            other => panic!("unexpected anomaly {other:?}"),
        }

        // The title index keeps the later item for insertion, the review
        // list keeps the first duplicate.
        assert_eq!(report.diferencias.to_insert, vec![&new[1]]);
        assert_eq!(report.anomalies, vec![&new[0]]);
        assert_eq!(report.ready_to_upsert, vec![&new[1]]);
    }

    #[test]
    fn test_sold_out_old_item_not_removed() {
        let new: Vec<Item> = vec![];
        let old = vec![item("Tiramisú", &["AGOTADO"], "900")];

        let report = reconcile(&new, &old);
        assert!(report.diferencias.to_remove.is_empty());
        assert_eq!(report.stats.old_sold_out, 1);
    }

    #[test]
    fn test_sold_out_excluded_everywhere() {
        let new = vec![
            item("Pizza", &["*AGOTADO*"], "1000"),
            item("Pizza", &["muzza"], "1000"),
        ];
        let old = vec![item("pizza", &["*AGOTADO*"], "1000")];

        let report = reconcile(&new, &old);
        let d = &report.diferencias;

        // Only the available new pizza remains, so no duplicate group and
        // nothing to compare against on the old side.
        assert_eq!(d.to_insert, vec![&new[1]]);
        assert!(d.to_remove.is_empty());
        assert!(d.unchanged.is_empty());
        assert!(d.anomalies.is_empty());

        let wire = serde_json::to_string(&d).unwrap();
        assert!(!wire.contains("AGOTADO"));
    }

    #[test]
    fn test_sold_out_new_item_with_live_old_counterpart_is_removed() {
        let new = vec![item("Pizza", &["*AGOTADO*"], "1000")];
        let old = vec![item("Pizza", &["muzza"], "1000")];

        let report = reconcile(&new, &old);
        let d = &report.diferencias;

        assert_eq!(d.to_remove, vec![&old[0]]);
        assert!(d.to_insert.is_empty());
        assert!(d.unchanged.is_empty());
        assert!(d.anomalies.is_empty());
        assert!(report.anomalies.is_empty());
        assert!(report.ready_to_upsert.is_empty());

        let wire = serde_json::to_string(&d).unwrap();
        assert!(!wire.contains("AGOTADO"));
    }

    #[test]
    fn test_sold_out_old_item_with_live_new_counterpart_is_inserted() {
        let new = vec![item("Pizza", &["muzza"], "1000")];
        let old = vec![item("Pizza", &["*AGOTADO*"], "1000")];

        let report = reconcile(&new, &old);
        let d = &report.diferencias;

        assert_eq!(d.to_insert, vec![&new[0]]);
        assert!(d.to_remove.is_empty());
        assert!(d.unchanged.is_empty());
        assert!(d.anomalies.is_empty());
        assert!(report.anomalies.is_empty());
        assert_eq!(report.ready_to_upsert, vec![&new[0]]);

        let wire = serde_json::to_string(&d).unwrap();
        assert!(!wire.contains("AGOTADO"));
    }

    #[test]
    fn test_anomaly_emission_order() {
        let new = vec![
            item("Flan", &["a"], "1"),
            item("flan", &["b"], "2"),
            item("Tarta", &["x"], "10"),
        ];
        let old = vec![
            item("Budín", &["a"], "1"),
            item("budin", &["b"], "2"),
            item("Tarta", &["x"], "12"),
        ];

        let report = reconcile(&new, &old);
        let sources: Vec<&str> = report
            .diferencias
            .anomalies
            .iter()
            .map(Anomaly::source)
            .collect();
        assert_eq!(sources, vec!["new", "old", "both"]);
    }

    #[test]
    fn test_ready_list_unique_titles() {
        let new = vec![
            item("A", &["1"], "1"),
            item("a", &["2"], "1"),
            item("B", &["1"], "1"),
            item("C", &["1"], "5"),
            item("c ", &["1"], "6"),
        ];
        let old = vec![item("B", &["1"], "2"), item("C", &["1"], "5")];

        let report = reconcile(&new, &old);
        let titles: HashSet<String> = report
            .ready_to_upsert
            .iter()
            .map(|i| normalize_text(i.title()))
            .collect();
        assert_eq!(titles.len(), report.ready_to_upsert.len());
    }

    #[test]
    fn test_report_wire_format() {
        let new = vec![
            item("Pizza", &["muzza"], "1000"),
            item("Flan", &["casero"], "600"),
        ];
        let old = vec![
            item("Flan", &["casero"], "500"),
            item("Budín", &["pan"], "400"),
        ];

        let report = reconcile(&new, &old);
        let value = serde_json::to_value(&report.diferencias).unwrap();

        assert_eq!(
            value,
            json!({
                "to_insert": [{"title": "Pizza", "details": ["muzza"], "price": "1000"}],
                "to_remove": [{"title": "Budín", "details": ["pan"], "price": "400"}],
                "unchanged": [],
                "anomalies": [{
                    "source": "both",
                    "item": {
                        "new": {"title": "Flan", "details": ["casero"], "price": "600"},
                        "old": {"title": "Flan", "details": ["casero"], "price": "500"}
                    },
                    "reason": "same title but 'details' and/or 'price' differ"
                }]
            })
        );
    }
}
