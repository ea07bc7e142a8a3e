// src/pipeline/exact.rs

//! Exact duplicate record search within a single file.
//!
//! Unlike the reconciler this applies no normalization: two records are
//! duplicates only if their JSON values are structurally equal.

use std::path::Path;

use serde_json::Value;

use crate::error::Result;
use crate::storage::CatalogStorage;
use crate::utils::console;

/// Records equal to an earlier record, once per distinct value.
///
/// Results follow the order in which each value was first repeated.
pub fn find_exact_duplicates(records: &[Value]) -> Vec<&Value> {
    let mut seen: Vec<&Value> = Vec::new();
    let mut duplicates: Vec<&Value> = Vec::new();

    for record in records {
        if seen.contains(&record) {
            if !duplicates.contains(&record) {
                duplicates.push(record);
            }
        } else {
            seen.push(record);
        }
    }
    duplicates
}

/// Scan a file for exact duplicates and print them as JSON.
pub async fn run_find_duplicates(storage: &dyn CatalogStorage, path: &Path) -> Result<usize> {
    let records = storage.load_records(path).await?;
    let duplicates = find_exact_duplicates(&records);

    if duplicates.is_empty() {
        console::success(&format!("No duplicate objects found in {}", path.display()));
    } else {
        console::success(&format!(
            "{} duplicate objects found in {}",
            duplicates.len(),
            path.display()
        ));
        println!("{}", serde_json::to_string_pretty(&duplicates)?);
    }

    Ok(duplicates.len())
}
