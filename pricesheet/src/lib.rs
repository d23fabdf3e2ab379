//! # Pricesheet - repair price spreadsheets to Markdown reports
//!
//! Pricesheet converts a brand's repair price list (one row per model and
//! part quality) into a Markdown report with one row per model, ready for
//! the retrieval index and SQL importers that read these reports.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ XLSX / CSV  │────▶│   Parser    │────▶│  Transform  │────▶│  Markdown   │
//! │ (1st sheet) │     │ (calamine)  │     │(norm+pivot) │     │   report    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pricesheet::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! let summary = convert_file(
//!     Path::new("Apple.xlsx"),
//!     Path::new("apple.md"),
//!     &ConvertOptions::default(),
//! ).unwrap();
//! println!("Converted {} models", summary.models);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Fixed report texts
//! - [`logs`] - Console progress log
//! - [`models`] - Domain models (PriceRecord, PricedModel, PriceTable)
//! - [`parser`] - First-sheet loading with format auto-detection
//! - [`validation`] - Required column check
//! - [`transform`] - Normalization, pivot and pipeline
//! - [`report`] - Markdown rendering and reading

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Output
pub mod report;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{ErrorKind, PipelineError, RenderError, SchemaError, SheetError};

// =============================================================================
// Re-exports - Models and configuration
// =============================================================================

pub use config::ReportConfig;
pub use models::{
    Price, PriceRecord, PriceTable, PricedModel, QualityCategory, MISSING_SENTINEL, OUTPUT_COLUMNS,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use parser::{read_first_sheet, SheetTable};
pub use report::{parse_report, ParsedReport};
pub use transform::pipeline::{
    build_report, convert_file, transform_records, BuiltReport, ConversionSummary, ConvertOptions,
    TransformOutcome,
};
pub use validation::validate_headers;
