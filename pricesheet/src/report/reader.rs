//! Read a rendered price report back into rows.
//!
//! Downstream importers consume the Markdown report rather than the
//! spreadsheet, so the pipeline uses this reader to check every document
//! before it is written. Columns are located by header name, matching
//! `Modelo`, `Servicio`, `Original` and `Genérica`/`Generica`
//! case-insensitively.

use serde::Serialize;

use super::document::COUNT_KEY;
use super::table::{is_separator, split_row};
use crate::error::{RenderError, RenderResult};
use crate::models::{Price, PricedModel, MISSING_SENTINEL};

/// Content recovered from a report document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedReport {
    /// Brand from the `# Precios {brand} - {business}` title
    pub brand: Option<String>,
    /// Table rows
    pub rows: Vec<PricedModel>,
    /// `modelos_disponibles` from the metadata block
    pub declared_count: Option<usize>,
}

impl ParsedReport {
    /// Check the declared model count against the table.
    pub fn verify(&self) -> RenderResult<()> {
        let declared = self.declared_count.ok_or(RenderError::MissingCount)?;
        if declared != self.rows.len() {
            return Err(RenderError::RowCountMismatch {
                declared,
                rendered: self.rows.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct ColumnIndexes {
    modelo: Option<usize>,
    servicio: Option<usize>,
    original: Option<usize>,
    generica: Option<usize>,
    in_store: Option<usize>,
    at_home: Option<usize>,
}

impl ColumnIndexes {
    fn from_header(cells: &[String]) -> Self {
        let mut idx = Self::default();
        for (i, cell) in cells.iter().enumerate() {
            let name = cell.to_lowercase();
            if name.contains("modelo") {
                idx.modelo = Some(i);
            } else if name.contains("servicio") {
                idx.servicio = Some(i);
            } else if name.contains("original") {
                idx.original = Some(i);
            } else if name.contains("genérica") || name.contains("generica") {
                idx.generica = Some(i);
            } else if name.contains("establecimiento") {
                idx.in_store = Some(i);
            } else if name.contains("domicilio") {
                idx.at_home = Some(i);
            }
        }
        idx
    }
}

/// Price text as written in a report cell.
pub fn parse_price_cell(cell: &str) -> Price {
    let cell = cell.trim();
    if cell == MISSING_SENTINEL {
        return Price::Missing;
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Price::Amount)
        .unwrap_or(Price::Missing)
}

/// Parse a rendered report.
pub fn parse_report(text: &str) -> RenderResult<ParsedReport> {
    let brand = text
        .lines()
        .find_map(|l| l.trim().strip_prefix("# Precios "))
        .map(|rest| match rest.rsplit_once(" - ") {
            Some((brand, _)) => brand.trim().to_string(),
            None => rest.trim().to_string(),
        });

    let declared_count = text.lines().find_map(|l| {
        l.trim()
            .strip_prefix(COUNT_KEY)
            .and_then(|rest| rest.strip_prefix(':'))
            .and_then(|n| n.trim().parse::<usize>().ok())
    });

    let rows = parse_table(text)?;

    Ok(ParsedReport {
        brand,
        rows,
        declared_count,
    })
}

fn cell_at(cells: &[String], i: Option<usize>) -> String {
    i.and_then(|i| cells.get(i)).cloned().unwrap_or_default()
}

fn parse_table(text: &str) -> RenderResult<Vec<PricedModel>> {
    let mut lines = text.lines().skip_while(|l| {
        !split_row(l)
            .map(|cells| cells.iter().any(|c| c == "Modelo"))
            .unwrap_or(false)
    });

    let header = lines
        .next()
        .and_then(split_row)
        .ok_or(RenderError::MissingTable)?;
    let idx = ColumnIndexes::from_header(&header);

    let mut rows = Vec::new();
    for line in lines {
        let Some(cells) = split_row(line) else {
            break;
        };
        if is_separator(&cells) {
            continue;
        }
        rows.push(PricedModel {
            modelo: cell_at(&cells, idx.modelo),
            servicio: cell_at(&cells, idx.servicio),
            original: parse_price_cell(&cell_at(&cells, idx.original)),
            generica: parse_price_cell(&cell_at(&cells, idx.generica)),
            in_store: cell_at(&cells, idx.in_store),
            at_home: cell_at(&cells, idx.at_home),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
# Precios Motorola - SalvaCell

## Tabla de Precios

| Modelo  | Servicio | Original | Genérica | En establecimiento | A domicilio |
|:--------|:---------|---------:|:---------|:-------------------|:------------|
| Moto G7 | Pantalla |      700 | N/A      | Mismo día          | 45-60 min   |
| Moto G8 | Pantalla |    799.5 | 500      | Mismo día          | 45-60 min   |

## Metadatos para Sofia
```yaml
marca: Motorola
modelos_disponibles: 2
```
";

    #[test]
    fn test_parse_report() {
        let report = parse_report(REPORT).unwrap();

        assert_eq!(report.brand.as_deref(), Some("Motorola"));
        assert_eq!(report.declared_count, Some(2));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].modelo, "Moto G7");
        assert_eq!(report.rows[0].generica, Price::Missing);
        assert_eq!(report.rows[1].original, Price::Amount(799.5));
        assert_eq!(report.rows[1].at_home, "45-60 min");
        assert!(report.verify().is_ok());
    }

    #[test]
    fn test_count_mismatch() {
        let tampered = REPORT.replace("modelos_disponibles: 2", "modelos_disponibles: 3");
        let err = parse_report(&tampered).unwrap().verify().unwrap_err();
        assert_eq!(err, RenderError::RowCountMismatch { declared: 3, rendered: 2 });
    }

    #[test]
    fn test_missing_table() {
        let err = parse_report("# Precios Nokia - SalvaCell\n").unwrap_err();
        assert_eq!(err, RenderError::MissingTable);
    }

    #[test]
    fn test_missing_count() {
        let report = parse_report("| Modelo |\n|:--|\n").unwrap();
        assert_eq!(report.verify().unwrap_err(), RenderError::MissingCount);
    }

    #[test]
    fn test_parse_price_cell() {
        assert_eq!(parse_price_cell(" 850 "), Price::Amount(850.0));
        assert_eq!(parse_price_cell("N/A"), Price::Missing);
        assert_eq!(parse_price_cell("consultar"), Price::Missing);
    }
}
