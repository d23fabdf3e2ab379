//! Pivot price records into one row per device model.
//!
//! ```text
//! Records (long)                         Pivot (wide)
//! ┌──────────────────────────────┐       ┌──────────────────────────────────┐
//! │ A10, 850, Original           │       │ A10 │ Pantalla │ 850 │ 600      │
//! │ A10, 600, Genérica           │  →    ├──────────────────────────────────┤
//! │ A20, abc, Original           │       │ A20 │ Pantalla │ N/A │ N/A      │
//! └──────────────────────────────┘       └──────────────────────────────────┘
//! ```
//!
//! Rows are keyed by `(Modelo, Servicio)` and ordered by model: numeric
//! models by value first, then the rest by text. For duplicate
//! `(Modelo, Servicio, Calidad)` entries the first known price wins; a
//! missing price is filled by a later duplicate that has one.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::config::ReportConfig;
use crate::models::{Price, PriceRecord, PriceTable, PricedModel, QualityCategory};

/// One pivoted row: a price per observed category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub modelo: String,
    pub servicio: String,
    pub prices: HashMap<QualityCategory, Price>,
}

impl PivotRow {
    /// Price for a category label, or `Missing` when the model has none.
    pub fn price(&self, category: &str) -> Price {
        self.prices
            .iter()
            .find(|(c, _)| c.as_str() == category)
            .map(|(_, p)| *p)
            .unwrap_or(Price::Missing)
    }
}

/// Wide table with one column per category seen in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotTable {
    /// Rows ordered by model
    pub rows: Vec<PivotRow>,
    /// Distinct categories in first-seen order
    pub categories: Vec<QualityCategory>,
    /// Records dropped because their `(Modelo, Servicio, Calidad)` already had a price
    pub duplicates: usize,
}

/// Pivot records, tagging every row with `service` as its `Servicio`.
pub fn pivot(records: &[PriceRecord], service: &str) -> PivotTable {
    let mut groups: BTreeMap<(String, String), HashMap<QualityCategory, Price>> = BTreeMap::new();
    let mut categories: Vec<QualityCategory> = Vec::new();
    let mut duplicates = 0;

    for record in records {
        if !categories.contains(&record.calidad) {
            categories.push(record.calidad.clone());
        }

        let prices = groups
            .entry((record.modelo.clone(), service.to_string()))
            .or_default();

        match prices.get(&record.calidad) {
            Some(Price::Amount(_)) => duplicates += 1,
            Some(Price::Missing) if record.precio.is_missing() => {}
            _ => {
                prices.insert(record.calidad.clone(), record.precio);
            }
        }
    }

    let mut rows: Vec<PivotRow> = groups
        .into_iter()
        .map(|((modelo, servicio), prices)| PivotRow {
            modelo,
            servicio,
            prices,
        })
        .collect();
    rows.sort_by(|a, b| compare_models(&a.modelo, &b.modelo));

    PivotTable {
        rows,
        categories,
        duplicates,
    }
}

fn numeric_model(modelo: &str) -> Option<f64> {
    modelo.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric models sort by value ahead of text models, which sort byte-wise.
fn compare_models(a: &str, b: &str) -> Ordering {
    match (numeric_model(a), numeric_model(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Assemble the fixed output columns from a pivot.
///
/// Price columns absent from the pivot are filled with the sentinel; the
/// two turnaround columns come from `config`.
pub fn assemble(pivot: PivotTable, config: &ReportConfig) -> PriceTable {
    let rows = pivot
        .rows
        .iter()
        .map(|row| PricedModel {
            modelo: row.modelo.clone(),
            servicio: row.servicio.clone(),
            original: row.price(QualityCategory::ORIGINAL),
            generica: row.price(QualityCategory::GENERIC),
            in_store: config.in_store_turnaround.clone(),
            at_home: config.at_home_turnaround.clone(),
        })
        .collect();

    PriceTable {
        rows,
        categories: pivot.categories,
    }
}
