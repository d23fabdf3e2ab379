//! Transformation module.
//!
//! This module turns sheet rows into the price table:
//! - Normalize: price coercion and quality labels
//! - Pivot: rows to one line per model, fixed output columns
//! - Pipeline: Main conversion pipeline

pub mod normalize;
pub mod pipeline;
pub mod pivot;

pub use normalize::{normalize_records, NormalizeResult, SkippedRow};
pub use pipeline::*;
pub use pivot::{assemble, pivot, PivotRow, PivotTable};
