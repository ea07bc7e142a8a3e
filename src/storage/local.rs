//! Local filesystem storage implementation.
//!
//! Relative paths are resolved against the storage root. Reports are written
//! in two phases: every file is first staged as a temp file beside its
//! target, and only once all of them are on disk are they renamed into
//! place. A failure while staging removes the temp files and leaves any
//! previous reports untouched.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Item, OutputTargets, Report};
use crate::storage::{CatalogStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    pretty: bool,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            pretty: true,
        }
    }

    /// Toggle pretty-printed JSON output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Resolve a path against the storage root.
    fn path(&self, path: &Path) -> PathBuf {
        self.root_dir.join(path)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes to a temp file beside `path`. Returns the resolved
    /// target and the temp path.
    async fn stage_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(PathBuf, PathBuf)> {
        let path = self.path(path);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        Ok((path, tmp))
    }

    /// Stage every file, then rename them all into place.
    async fn write_all_or_nothing(&self, outputs: &[(&PathBuf, Vec<u8>)]) -> Result<()> {
        let mut staged = Vec::with_capacity(outputs.len());
        for (path, bytes) in outputs {
            match self.stage_bytes(path, bytes).await {
                Ok(pair) => staged.push(pair),
                Err(e) => {
                    for (_, tmp) in &staged {
                        if let Err(cleanup) = tokio::fs::remove_file(tmp).await {
                            log::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
                        }
                    }
                    return Err(e);
                }
            }
        }

        for (path, tmp) in &staged {
            tokio::fs::rename(tmp, path).await?;
        }
        Ok(())
    }

    /// Serialize a value as JSON, honoring the pretty flag.
    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(bytes)
    }

    /// Read bytes, mapping a missing file to `MissingInput`.
    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let full = self.path(path);
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::missing_input(&full))
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read a file whose top-level JSON value must be an array.
    async fn read_array(&self, path: &Path) -> Result<Vec<Value>> {
        let bytes = self.read_bytes(path).await?;
        let full = self.path(path);
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => Ok(records),
            Ok(_) => Err(AppError::malformed_input(
                &full,
                "top-level value must be an array of objects",
            )),
            Err(e) => Err(AppError::malformed_input(&full, e)),
        }
    }
}

#[async_trait]
impl CatalogStorage for LocalStorage {
    async fn load_items(&self, path: &Path) -> Result<Vec<Item>> {
        let records = self.read_array(path).await?;
        let items = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                serde_json::from_value(record).map_err(|e| {
                    AppError::malformed_input(self.path(path), format!("item {i}: {e}"))
                })
            })
            .collect::<Result<Vec<Item>>>()?;

        log::info!("Loaded {} items from {}", items.len(), path.display());
        Ok(items)
    }

    async fn load_records(&self, path: &Path) -> Result<Vec<Value>> {
        let records = self.read_array(path).await?;
        log::info!("Loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }

    async fn write_report(
        &self,
        report: &Report<'_>,
        targets: &OutputTargets,
    ) -> Result<WriteMetadata> {
        // Serialize everything up front so nothing is written on failure.
        let outputs = [
            (&targets.diff, self.to_json(&report.diferencias)?),
            (&targets.anomalies, self.to_json(&report.anomalies)?),
            (&targets.ready, self.to_json(&report.ready_to_upsert)?),
        ];

        self.write_all_or_nothing(&outputs).await?;

        let mut files = Vec::with_capacity(outputs.len());
        let mut bytes_written = 0;
        for (path, bytes) in &outputs {
            log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
            files.push(path.display().to_string());
            bytes_written += bytes.len();
        }

        Ok(WriteMetadata {
            files,
            bytes_written,
            timestamp: Utc::now(),
        })
    }
}
