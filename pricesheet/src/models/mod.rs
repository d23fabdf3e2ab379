//! Domain models for the price sheet pipeline.
//!
//! - [`PriceRecord`] - One normalized input row
//! - [`QualityCategory`] - Normalized part-quality label
//! - [`Price`] - A price or the missing-value sentinel
//! - [`PricedModel`] - One output row of the price table
//! - [`PriceTable`] - All output rows plus the categories seen in the input

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text written in place of a missing price.
pub const MISSING_SENTINEL: &str = "N/A";

/// Input column holding the device model.
pub const MODEL_COLUMN: &str = "Modelo";
/// Input column holding the price.
pub const PRICE_COLUMN: &str = "Precio";
/// Input column holding the part quality.
pub const QUALITY_COLUMN: &str = "Calidad";

/// Columns every input sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 3] = [MODEL_COLUMN, PRICE_COLUMN, QUALITY_COLUMN];

/// Output columns, in order.
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "Modelo",
    "Servicio",
    "Original",
    "Genérica",
    "En establecimiento",
    "A domicilio",
];

// =============================================================================
// Price
// =============================================================================

/// A repair price, or the marker for a value that could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value")]
pub enum Price {
    Amount(f64),
    #[default]
    Missing,
}

impl Price {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Price::Amount(v) => Some(*v),
            Price::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Price::Missing)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(v) => f.write_str(&format_number(*v)),
            Price::Missing => f.write_str(MISSING_SENTINEL),
        }
    }
}

/// Shortest text for a number: `100` for whole values, `99.5` otherwise.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// =============================================================================
// Quality Category
// =============================================================================

/// Known spellings folded onto a canonical label (after title-casing).
const QUALITY_ALIASES: [(&str, &str); 2] = [("Cal/Orig", "Original"), ("Generica", "Genérica")];

/// Normalized part-quality label.
///
/// Built from free text by trimming, title-casing and applying the
/// canonical aliases. Normalizing an already normalized label is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityCategory(String);

impl QualityCategory {
    /// Label of original-quality parts.
    pub const ORIGINAL: &'static str = "Original";
    /// Label of generic parts.
    pub const GENERIC: &'static str = "Genérica";

    /// Normalize free text. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let titled = title_case(raw.trim());
        if titled.is_empty() {
            return None;
        }
        let canonical = QUALITY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == titled)
            .map(|(_, label)| label.to_string())
            .unwrap_or(titled);
        Some(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_original(&self) -> bool {
        self.0 == Self::ORIGINAL
    }

    pub fn is_generic(&self) -> bool {
        self.0 == Self::GENERIC
    }
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
///
/// `"cal/orig"` becomes `"Cal/Orig"`, `"GENÉRICA"` becomes `"Genérica"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

// =============================================================================
// Records and Rows
// =============================================================================

/// One input row after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    /// Device model, trimmed.
    pub modelo: String,
    /// Coerced price; `Missing` when the cell was not numeric.
    pub precio: Price,
    pub calidad: QualityCategory,
}

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedModel {
    pub modelo: String,
    pub servicio: String,
    pub original: Price,
    pub generica: Price,
    pub in_store: String,
    pub at_home: String,
}

impl PricedModel {
    /// Cell texts in [`OUTPUT_COLUMNS`] order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.modelo.clone(),
            self.servicio.clone(),
            self.original.to_string(),
            self.generica.to_string(),
            self.in_store.clone(),
            self.at_home.clone(),
        ]
    }
}

/// The assembled price table.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceTable {
    /// Output rows, ordered by model.
    pub rows: Vec<PricedModel>,
    /// Every quality category seen in the input, in first-seen order.
    pub categories: Vec<QualityCategory>,
}

impl PriceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &'static [&'static str; 6] {
        &OUTPUT_COLUMNS
    }

    /// Categories that do not map onto an output price column.
    pub fn extra_categories(&self) -> Vec<&QualityCategory> {
        self.categories
            .iter()
            .filter(|c| !c.is_original() && !c.is_generic())
            .collect()
    }
}
