// src/pipeline/validate.rs

use std::path::Path;

use crate::error::Result;
use crate::models::{Config, Side};
use crate::pipeline::duplicates::find_duplicates;
use crate::pipeline::filter::available_items;
use crate::storage::CatalogStorage;
use crate::utils::console;

/// Validate configuration and check that both snapshots load.
pub async fn run_validate(config: &Config, storage: &dyn CatalogStorage) -> Result<()> {
    console::header("Validating configuration and inputs");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    console::success("Config OK");
    let targets = config.paths.output_targets();
    console::sub_item(&format!("Diff report: {}", targets.diff.display()));
    console::sub_item(&format!("Review list: {}", targets.anomalies.display()));
    console::sub_item(&format!("Ready list: {}", targets.ready.display()));

    for (side, file) in [
        (Side::New, &config.paths.new_file),
        (Side::Old, &config.paths.old_file),
    ] {
        let items = storage.load_items(Path::new(file)).await?;
        let available = available_items(&items);
        let duplicates = find_duplicates(&available, side);

        console::success(&format!("{} snapshot OK: {}", side, file));
        console::sub_item(&format!("Items: {}", items.len()));
        console::sub_item(&format!("Sold out: {}", items.len() - available.len()));
        console::sub_item(&format!("Duplicated titles: {}", duplicates.len()));
    }

    console::success("All validations passed");
    Ok(())
}
