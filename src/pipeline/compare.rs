// src/pipeline/compare.rs

//! Snapshot comparison pipeline.

use std::path::Path;

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::reconcile;
use crate::storage::{CatalogStorage, WriteMetadata};
use crate::utils::console;

/// Compare the configured snapshots and write the three reports.
///
/// Both inputs are loaded before anything is written, so an input error
/// leaves no output behind.
pub async fn run_compare(config: &Config, storage: &dyn CatalogStorage) -> Result<WriteMetadata> {
    console::header("Catalog comparison");

    let new_items = storage.load_items(Path::new(&config.paths.new_file)).await?;
    let old_items = storage.load_items(Path::new(&config.paths.old_file)).await?;

    let report = reconcile(&new_items, &old_items);
    if report.stats.new_sold_out + report.stats.old_sold_out > 0 {
        log::info!(
            "Skipped sold-out items: {} new, {} old",
            report.stats.new_sold_out,
            report.stats.old_sold_out
        );
    }
    if !report.diferencias.has_changes() {
        log::info!("Snapshots match, nothing to insert, remove or review");
    }

    let targets = config.paths.output_targets();
    let meta = storage.write_report(&report, &targets).await?;
    log::info!(
        "Wrote {} bytes across {} files at {}",
        meta.bytes_written,
        meta.files.len(),
        meta.timestamp.to_rfc3339()
    );

    console::success(&format!("Result written to {}", targets.diff.display()));
    for file in meta.files.iter().skip(1) {
        console::sub_item(&format!("Also wrote {}", file));
    }
    console::summary("Comparison summary", &report.summary_items());

    Ok(meta)
}
