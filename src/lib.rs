// src/lib.rs

//! Catalog snapshot reconciliation library.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;
