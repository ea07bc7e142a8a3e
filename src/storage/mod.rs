//! Storage abstractions for catalog snapshots and reports.
//!
//! A run reads two snapshot files and writes three report files:
//!
//! ```text
//! {dir}/
//! ├── nuevo.json            # New snapshot (input)
//! ├── viejo.json            # Old snapshot (input)
//! ├── diferencias.json      # to_insert / to_remove / unchanged / anomalies
//! ├── anomalies.json        # New-side items flagged for review
//! └── ready_to_upsert.json  # Inserts + flagged items, unique by title
//! ```

pub mod local;

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::Result;
use crate::models::{Item, OutputTargets, Report};

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a report write.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Files written, in write order
    pub files: Vec<String>,
    /// Total bytes written across all files
    pub bytes_written: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for snapshot storage backends.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Load a snapshot as items.
    ///
    /// Fails with `MissingInput` if the file does not exist and with
    /// `MalformedInput` unless it holds a JSON array of item objects.
    async fn load_items(&self, path: &Path) -> Result<Vec<Item>>;

    /// Load a snapshot as raw JSON records (top-level array required).
    async fn load_records(&self, path: &Path) -> Result<Vec<Value>>;

    /// Write the three report files.
    async fn write_report(
        &self,
        report: &Report<'_>,
        targets: &OutputTargets,
    ) -> Result<WriteMetadata>;
}
