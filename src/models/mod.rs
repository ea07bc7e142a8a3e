// src/models/mod.rs

//! Domain models for the catalog reconciler.

mod anomaly;
mod config;
mod item;
mod report;

// Re-export all public types
pub use anomaly::{Anomaly, ItemPair, Side};
pub use config::{Config, LoggingConfig, OutputConfig, OutputTargets, PathsConfig};
pub use item::Item;
pub use report::{Classification, InputStats, Report};
