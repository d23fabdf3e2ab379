//! Error types for the price sheet conversion pipeline.
//!
//! - [`SheetError`] - Reading the input spreadsheet
//! - [`SchemaError`] - Required columns missing from the header row
//! - [`RenderError`] - Building or re-reading the Markdown report
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Sheet Reading Errors
// =============================================================================

/// Errors while loading the first sheet of the input file.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Extension is not a spreadsheet or delimited text format.
    #[error("Unsupported file format '{0}' (expected xlsx, xls, xlsb, ods or csv)")]
    UnsupportedFormat(String),

    /// Workbook could not be opened or decoded.
    #[error("Invalid workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// Delimited text could not be parsed.
    #[error("Invalid CSV content: {0}")]
    Csv(#[from] csv::Error),

    /// The workbook has no sheets, or the first sheet has no header row.
    #[error("Sheet is empty or has no header row")]
    EmptySheet,
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Header row does not carry the columns the transformation needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// One or more required columns are absent.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// =============================================================================
// Render Errors
// =============================================================================

/// Errors while rendering or reading back a report document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The document has no price table header.
    #[error("Report has no price table")]
    MissingTable,

    /// Declared row count does not match the rendered table.
    #[error("Report declares {declared} models but its table has {rendered} rows")]
    RowCountMismatch { declared: usize, rendered: usize },

    /// The metadata block has no `modelos_disponibles` entry.
    #[error("Report metadata has no model count")]
    MissingCount,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Classification used by the command line to report failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input path does not resolve to a file.
    FileNotFound,
    /// Anything that went wrong while reading, transforming or writing.
    Transformation,
}

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::convert_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Spreadsheet reading error.
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Schema validation error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Report rendering error.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Writing the output document failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Which of the two reported failure kinds this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            _ => ErrorKind::Transformation,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for sheet operations.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // SheetError -> PipelineError
        let sheet_err = SheetError::EmptySheet;
        let pipeline_err: PipelineError = sheet_err.into();
        assert!(pipeline_err.to_string().contains("empty"));
        assert_eq!(pipeline_err.kind(), ErrorKind::Transformation);

        // SchemaError -> PipelineError
        let schema_err = SchemaError::MissingColumns(vec!["Precio".into()]);
        let pipeline_err: PipelineError = schema_err.into();
        assert!(pipeline_err.to_string().contains("Precio"));
    }

    #[test]
    fn test_missing_columns_format() {
        let err = SchemaError::MissingColumns(vec!["Modelo".into(), "Calidad".into()]);
        assert_eq!(err.to_string(), "Missing required column(s): Modelo, Calidad");
    }

    #[test]
    fn test_file_not_found_kind() {
        let err = PipelineError::FileNotFound(PathBuf::from("apple.xlsx"));
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.to_string().contains("apple.xlsx"));
    }
}
