//! Report configuration.
//!
//! Every fixed text of the generated report lives here. The defaults
//! produce the standard SalvaCell price sheet; the business and assistant
//! names can be overridden from the environment (or a `.env` file loaded
//! by the binary).

use serde::{Deserialize, Serialize};
use std::env;

/// Overrides the business name in the report title.
pub const BUSINESS_NAME_ENV: &str = "PRICESHEET_BUSINESS_NAME";

/// Overrides the assistant name in the metadata heading.
pub const ASSISTANT_NAME_ENV: &str = "PRICESHEET_ASSISTANT_NAME";

/// Fixed texts and labels used while building a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Business name shown in the title.
    pub business_name: String,
    /// Name of the assistant the metadata block is addressed to.
    pub assistant_name: String,
    /// Value of the `Servicio` column for every row.
    pub service_label: String,
    /// Value of the `En establecimiento` column.
    pub in_store_turnaround: String,
    /// Value of the `A domicilio` column.
    pub at_home_turnaround: String,
    pub currency: String,
    pub standard_warranty: String,
    pub in_store_note: String,
    pub at_home_note: String,
    /// Services listed in the metadata block.
    pub services: Vec<String>,
    pub average_time: String,
    pub original_warranty: String,
    pub generic_warranty: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            business_name: "SalvaCell".to_string(),
            assistant_name: "Sofia".to_string(),
            service_label: "Pantalla".to_string(),
            in_store_turnaround: "Mismo día (antes 4PM) / Siguiente día".to_string(),
            at_home_turnaround: "45-60 min".to_string(),
            currency: "Pesos Mexicanos (MXN)".to_string(),
            standard_warranty: "30 días original, 15 días genérica".to_string(),
            in_store_note: "En el establecimiento, si el equipo se entrega antes de las 4 PM, \
                el servicio se realiza el mismo día; si es después, se realiza al día siguiente."
                .to_string(),
            at_home_note: "El servicio toma entre 45 minutos y 1 hora una vez iniciado \
                en el lugar acordado."
                .to_string(),
            services: ["pantalla", "batería", "cámara", "puerto"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            average_time: "52 minutos".to_string(),
            original_warranty: "30 días".to_string(),
            generic_warranty: "15 días".to_string(),
        }
    }
}

impl ReportConfig {
    /// Defaults, with name overrides taken from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(name) = non_empty_var(BUSINESS_NAME_ENV) {
            config.business_name = name;
        }
        if let Some(name) = non_empty_var(ASSISTANT_NAME_ENV) {
            config.assistant_name = name;
        }
        config
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
