//! Row normalization: sheet rows into [`PriceRecord`]s.
//!
//! - `Precio` is coerced to a number; anything non-numeric becomes
//!   [`Price::Missing`] instead of an error.
//! - `Calidad` is trimmed, title-cased and folded through the aliases.
//! - Rows without a usable `Modelo` or `Calidad` cannot be keyed and are
//!   reported as skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::models::{
    format_number, Price, PriceRecord, QualityCategory, MODEL_COLUMN, PRICE_COLUMN, QUALITY_COLUMN,
};

/// Plain decimal number: optional sign, digits, optional fraction and exponent.
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid numeric regex")
});

static NULL: Value = Value::Null;

/// A row that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    /// 1-based data row index
    pub row: usize,
    pub reason: String,
}

/// Output of [`normalize_records`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizeResult {
    pub records: Vec<PriceRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Records whose price could not be read
    pub unparsed_prices: usize,
}

/// Coerce a cell to a price.
pub fn coerce_price(value: &Value) -> Price {
    match value {
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Price::Amount)
            .unwrap_or(Price::Missing),
        Value::String(s) => {
            let s = s.trim();
            if NUMERIC.is_match(s) {
                s.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Price::Amount)
                    .unwrap_or(Price::Missing)
            } else {
                Price::Missing
            }
        }
        _ => Price::Missing,
    }
}

/// Model name of a cell; numeric models print without a trailing `.0`.
///
/// Line breaks inside a cell are folded into single spaces.
pub fn model_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::String(s) => s
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}

/// Quality label of a cell. Only text cells carry a category.
pub fn quality(value: &Value) -> Option<QualityCategory> {
    value.as_str().and_then(QualityCategory::parse)
}

/// Normalize every sheet row.
pub fn normalize_records(rows: &[Value]) -> NormalizeResult {
    let mut result = NormalizeResult::default();

    for (i, row) in rows.iter().enumerate() {
        let row_num = i + 1;
        let field = |name: &str| row.get(name).unwrap_or(&NULL);

        let Some(modelo) = model_name(field(MODEL_COLUMN)) else {
            result.skipped.push(SkippedRow {
                row: row_num,
                reason: format!("empty {}", MODEL_COLUMN),
            });
            continue;
        };
        let Some(calidad) = quality(field(QUALITY_COLUMN)) else {
            result.skipped.push(SkippedRow {
                row: row_num,
                reason: format!("empty {}", QUALITY_COLUMN),
            });
            continue;
        };

        let precio = coerce_price(field(PRICE_COLUMN));
        if precio.is_missing() {
            result.unparsed_prices += 1;
        }

        result.records.push(PriceRecord {
            modelo,
            precio,
            calidad,
        });
    }

    result
}
