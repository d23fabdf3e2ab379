//! Markdown price report.
//!
//! Three sections, always in this order: title and general information,
//! the price table, and a fenced `yaml` metadata block for the assistant
//! that consumes the report.

use chrono::NaiveDate;
use std::fmt::Write;
use std::path::Path;

use super::table::render_pipe_table;
use crate::config::ReportConfig;
use crate::models::{PriceTable, OUTPUT_COLUMNS};

/// Heading of the table section.
pub const TABLE_HEADING: &str = "## Tabla de Precios";

/// Metadata key holding the number of table rows.
pub const COUNT_KEY: &str = "modelos_disponibles";

/// Brand name of an input file: its base name without extension.
pub fn brand_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Sin marca".to_string())
}

/// Render the full report for `brand`, dated `date`.
pub fn render_document(
    table: &PriceTable,
    brand: &str,
    date: NaiveDate,
    config: &ReportConfig,
) -> String {
    write_document(table, brand, date, config).unwrap_or_default()
}

fn write_document(
    table: &PriceTable,
    brand: &str,
    date: NaiveDate,
    config: &ReportConfig,
) -> Result<String, std::fmt::Error> {
    let mut doc = String::new();
    write_header(&mut doc, brand, date, config)?;
    write_table(&mut doc, table)?;
    write_metadata(&mut doc, table, brand, config)?;
    Ok(doc)
}

fn write_header(
    doc: &mut String,
    brand: &str,
    date: NaiveDate,
    config: &ReportConfig,
) -> std::fmt::Result {
    writeln!(doc, "# Precios {} - {}", brand, config.business_name)?;
    writeln!(doc)?;
    writeln!(doc, "## Información General")?;
    writeln!(doc, "- **Última actualización:** {}", date.format("%Y-%m-%d"))?;
    writeln!(doc, "- **Moneda:** {}", config.currency)?;
    writeln!(doc, "- **Garantía estándar:** {}", config.standard_warranty)?;
    writeln!(doc, "- **Nota:** {}", config.in_store_note)?;
    writeln!(doc, "- **A domicilio:** {}", config.at_home_note)?;
    writeln!(doc)
}

fn write_table(doc: &mut String, table: &PriceTable) -> std::fmt::Result {
    let rows: Vec<[String; 6]> = table.rows.iter().map(|r| r.cells()).collect();

    writeln!(doc, "{}", TABLE_HEADING)?;
    writeln!(doc)?;
    writeln!(doc, "{}", render_pipe_table(&OUTPUT_COLUMNS, &rows))?;
    writeln!(doc)
}

fn write_metadata(
    doc: &mut String,
    table: &PriceTable,
    brand: &str,
    config: &ReportConfig,
) -> std::fmt::Result {
    writeln!(doc, "## Metadatos para {}", config.assistant_name)?;
    writeln!(doc, "```yaml")?;
    writeln!(doc, "marca: {}", brand)?;
    writeln!(doc, "{}: {}", COUNT_KEY, table.len())?;
    writeln!(doc, "servicios: [{}]", config.services.join(", "))?;
    writeln!(doc, "tiempo_promedio: {}", config.average_time)?;
    writeln!(doc, "garantia_original: {}", config.original_warranty)?;
    writeln!(doc, "garantia_generica: {}", config.generic_warranty)?;
    writeln!(doc, "```")
}
