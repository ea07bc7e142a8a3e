//! Reconciliation stages and pipeline entry points.
//!
//! - `reconcile`: pure snapshot comparison (no I/O)
//! - `run_compare`: load snapshots, reconcile, write reports
//! - `run_find_duplicates`: exact duplicate scan of a single file
//! - `run_validate`: check configuration and inputs

pub mod classify;
pub mod compare;
pub mod duplicates;
pub mod exact;
pub mod filter;
pub mod flatten;
pub mod normalize;
pub mod reconcile;
pub mod validate;

pub use classify::{NormalizedKey, TitleIndex, build_title_index, classify};
pub use compare::run_compare;
pub use duplicates::find_duplicates;
pub use exact::{find_exact_duplicates, run_find_duplicates};
pub use filter::{available_items, is_sold_out};
pub use flatten::{build_ready_list, dedup_by_title, flatten_anomalies};
pub use normalize::{normalize_price, normalize_text, normalize_whitespace};
pub use reconcile::reconcile;
pub use validate::run_validate;
