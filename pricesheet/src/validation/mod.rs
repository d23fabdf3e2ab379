//! Header validation for price sheets.
//!
//! A sheet is usable when its header row carries every column in
//! [`REQUIRED_COLUMNS`] once surrounding whitespace is trimmed. Extra
//! columns are ignored.

use crate::error::SchemaError;
use crate::models::REQUIRED_COLUMNS;

/// Check that all required columns are present.
///
/// # Returns
/// * `Ok(())` if every required column exists
/// * `Err(SchemaError::MissingColumns)` listing the absent ones, in
///   required-column order
///
/// # Example
/// ```
/// use pricesheet::validation::validate_headers;
///
/// let headers = vec![" Modelo ".to_string(), "Precio".into(), "Calidad".into(), "Notas".into()];
/// assert!(validate_headers(&headers).is_ok());
///
/// let headers = vec!["Modelo".to_string(), "Costo".into()];
/// assert!(validate_headers(&headers).is_err());
/// ```
pub fn validate_headers<S: AsRef<str>>(headers: &[S]) -> Result<(), SchemaError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.as_ref().trim() == **required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing))
    }
}

/// Quick check: true when all required columns are present.
pub fn has_required_columns<S: AsRef<str>>(headers: &[S]) -> bool {
    validate_headers(headers).is_ok()
}
