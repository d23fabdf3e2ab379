//! High-level pipeline API for spreadsheet to report conversion.
//!
//! Combines every step: loading the first sheet, header validation,
//! normalization, pivoting, column assembly, rendering and writing.
//!
//! # Example
//!
//! ```rust,no_run
//! use pricesheet::transform::pipeline::{convert_file, ConvertOptions};
//! use std::path::Path;
//!
//! let summary = convert_file(
//!     Path::new("Samsung.xlsx"),
//!     Path::new("samsung.md"),
//!     &ConvertOptions::default(),
//! )?;
//! println!("{} models written", summary.models);
//! # Ok::<(), pricesheet::PipelineError>(())
//! ```

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::normalize::{normalize_records, SkippedRow};
use super::pivot::{assemble, pivot};
use crate::config::ReportConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::PriceTable;
use crate::parser::{read_first_sheet, SheetTable};
use crate::report::{brand_from_path, parse_report, render_document};
use crate::validation::validate_headers;

/// Options for the conversion pipeline
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Fixed report texts
    pub config: ReportConfig,
    /// Date printed as last update (default: today, local time)
    pub date: Option<NaiveDate>,
}

/// Result of transforming sheet rows into a price table
#[derive(Debug, Clone, Serialize)]
pub struct TransformOutcome {
    pub table: PriceTable,
    /// Rows without a model or quality
    pub skipped: Vec<SkippedRow>,
    /// Rows kept with a missing price
    pub unparsed_prices: usize,
    /// Rows discarded as repeated `(Modelo, Servicio, Calidad)`
    pub duplicates: usize,
}

/// A rendered report, not yet written
#[derive(Debug, Clone)]
pub struct BuiltReport {
    pub brand: String,
    pub document: String,
    pub outcome: TransformOutcome,
}

/// Summary of a completed conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub brand: String,
    /// Data rows read from the sheet
    pub rows_read: usize,
    /// Rows in the output table
    pub models: usize,
    pub skipped: usize,
    pub unparsed_prices: usize,
    pub duplicates: usize,
    /// Quality categories that have no output column
    pub extra_categories: Vec<String>,
}

/// Convert a price spreadsheet into a Markdown report.
///
/// This is the main entry point. It:
/// 1. Loads the first sheet of `input`
/// 2. Validates the required columns
/// 3. Normalizes, pivots and assembles the price table
/// 4. Renders the document in memory and reads it back as a check
/// 5. Writes the document to `output`, replacing any existing file
///
/// Nothing is written unless every earlier step succeeded.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> PipelineResult<ConversionSummary> {
    if !input.exists() {
        return Err(PipelineError::FileNotFound(input.to_path_buf()));
    }

    log_info(format!("📖 Reading {}", input.display()));
    let sheet = read_first_sheet(input)?;
    if let (Some(encoding), Some(delimiter)) = (&sheet.encoding, sheet.delimiter) {
        log_success(format!(
            "Detected encoding: {}, separator: '{}'",
            encoding,
            format_delimiter(delimiter)
        ));
    }
    log_success(format!("Read {} rows", sheet.records.len()));

    let brand = brand_from_path(input);
    let report = build_report(&sheet, &brand, options)?;

    fs::write(output, report.document.as_bytes()).map_err(|source| PipelineError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    log_success(format!("💾 Report written to {}", output.display()));

    let outcome = report.outcome;
    Ok(ConversionSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        brand: report.brand,
        rows_read: sheet.records.len(),
        models: outcome.table.len(),
        skipped: outcome.skipped.len(),
        unparsed_prices: outcome.unparsed_prices,
        duplicates: outcome.duplicates,
        extra_categories: outcome
            .table
            .extra_categories()
            .iter()
            .map(|c| c.to_string())
            .collect(),
    })
}

/// Validate, transform and render an already loaded sheet.
pub fn build_report(
    sheet: &SheetTable,
    brand: &str,
    options: &ConvertOptions,
) -> PipelineResult<BuiltReport> {
    log_info("✔️  Checking columns...");
    validate_headers(&sheet.headers)?;

    let outcome = transform_records(&sheet.records, &options.config);

    log_info("📝 Rendering report...");
    let date = options.date.unwrap_or_else(|| Local::now().date_naive());
    let document = render_document(&outcome.table, brand, date, &options.config);

    parse_report(&document)?.verify()?;
    log_success(format!("{} models in table", outcome.table.len()));

    Ok(BuiltReport {
        brand: brand.to_string(),
        document,
        outcome,
    })
}

/// Normalize, pivot and assemble sheet rows.
pub fn transform_records(records: &[Value], config: &ReportConfig) -> TransformOutcome {
    log_info("⚙️  Normalizing rows...");
    let normalized = normalize_records(records);
    print_normalize_result(normalized.records.len(), &normalized.skipped, normalized.unparsed_prices);

    log_info("📦 Pivoting by model...");
    let pivoted = pivot(&normalized.records, &config.service_label);
    if pivoted.duplicates > 0 {
        log_warning(format!(
            "{} repeated model/quality rows ignored (first one kept)",
            pivoted.duplicates
        ));
    }
    let duplicates = pivoted.duplicates;

    let table = assemble(pivoted, config);
    let extra = table.extra_categories();
    if !extra.is_empty() {
        let names: Vec<&str> = extra.iter().map(|c| c.as_str()).collect();
        log_warning(format!("Qualities without a column: {}", names.join(", ")));
    }

    TransformOutcome {
        table,
        skipped: normalized.skipped,
        unparsed_prices: normalized.unparsed_prices,
        duplicates,
    }
}

fn print_normalize_result(kept: usize, skipped: &[SkippedRow], unparsed_prices: usize) {
    log_success(format!("{} rows kept", kept));
    if unparsed_prices > 0 {
        log_warning(format!("{} prices not numeric, shown as N/A", unparsed_prices));
    }
    if !skipped.is_empty() {
        log_warning(format!("{} rows skipped", skipped.len()));
        for skip in skipped.iter().take(5) {
            log_info_indent(format!("row {}: {}", skip.row, skip.reason), 1);
        }
    }
}

/// Format delimiter for display
fn format_delimiter(d: char) -> &'static str {
    match d {
        ';' => ";",
        ',' => ",",
        '\t' => "TAB",
        '|' => "|",
        _ => "?",
    }
}
