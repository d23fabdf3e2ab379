//! First-sheet loader for spreadsheet and delimited text files.
//!
//! Workbooks (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`) are read with calamine;
//! delimited text is decoded with encoding and delimiter auto-detection.
//! Either way the result is a header row plus one JSON object per data row,
//! keyed by the trimmed header names. No pricing logic here.

use calamine::{open_workbook_auto, Data, Reader};
use serde_json::{Map, Number, Value};
use std::path::Path;

use crate::error::{SheetError, SheetResult};
use crate::models::format_number;

/// Kind of input file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Excel or OpenDocument workbook.
    Workbook,
    /// Comma/semicolon/tab separated text.
    Delimited,
}

impl SheetFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> SheetResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlam" | "xlsb" | "xls" | "xla" | "ods" => Ok(Self::Workbook),
            "csv" | "tsv" | "txt" => Ok(Self::Delimited),
            other => Err(SheetError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// First sheet of an input file
#[derive(Debug, Clone)]
pub struct SheetTable {
    /// Column headers, trimmed
    pub headers: Vec<String>,
    /// One JSON object per data row
    pub records: Vec<Value>,
    /// Detected or used encoding (delimited text only)
    pub encoding: Option<String>,
    /// Detected delimiter (delimited text only)
    pub delimiter: Option<char>,
}

/// Load the first sheet of `path`.
pub fn read_first_sheet<P: AsRef<Path>>(path: P) -> SheetResult<SheetTable> {
    let path = path.as_ref();
    match SheetFormat::from_path(path)? {
        SheetFormat::Workbook => read_workbook(path),
        SheetFormat::Delimited => {
            let bytes = std::fs::read(path)?;
            parse_delimited_bytes(&bytes)
        }
    }
}

// =============================================================================
// Workbooks
// =============================================================================

fn read_workbook(path: &Path) -> SheetResult<SheetTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::EmptySheet)??;

    let rows: Vec<Vec<Value>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    table_from_rows(rows, None, None)
}

/// Convert a workbook cell to JSON.
///
/// Empty and error cells become `null`, dates become ISO-8601 text.
pub fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| Value::String(d.format("%Y-%m-%dT%H:%M:%S").to_string()))
            .unwrap_or(Value::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) | Data::Empty => Value::Null,
    }
}

// =============================================================================
// Delimited text
// =============================================================================

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken as is; anything else is guessed with chardet and
/// falls back to Windows-1252, the usual encoding of spreadsheet exports.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "windows-1252".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => encoding_rs::UTF_8.decode(bytes).0,
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::WINDOWS_1252.decode(bytes).0,
        other => encoding_rs::Encoding::for_label(other.as_bytes())
            .unwrap_or(encoding_rs::WINDOWS_1252)
            .decode(bytes)
            .0,
    };
    decoded.trim_start_matches('\u{feff}').to_string()
}

/// Detect the delimiter by counting occurrences in the first line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited bytes with auto-detection of encoding and delimiter.
pub fn parse_delimited_bytes(bytes: &[u8]) -> SheetResult<SheetTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_delimited_str(&content, delimiter, Some(encoding))
}

/// Parse delimited text with an explicit delimiter.
pub fn parse_delimited_str(
    content: &str,
    delimiter: char,
    encoding: Option<String>,
) -> SheetResult<SheetTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    let field = field.trim();
                    if field.is_empty() {
                        Value::Null
                    } else {
                        Value::String(field.to_string())
                    }
                })
                .collect(),
        );
    }

    table_from_rows(rows, encoding, Some(delimiter))
}

// =============================================================================
// Shared
// =============================================================================

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Header text for a cell; numbers print without a trailing `.0`.
fn header_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Build the table: first non-blank row is the header, blank rows are skipped.
fn table_from_rows(
    rows: Vec<Vec<Value>>,
    encoding: Option<String>,
    delimiter: Option<char>,
) -> SheetResult<SheetTable> {
    let mut rows = rows.into_iter().filter(|row| !row.iter().all(is_blank));

    let header_row = rows.next().ok_or(SheetError::EmptySheet)?;
    let headers: Vec<String> = header_row.iter().map(header_text).collect();

    let records = rows
        .map(|row| {
            let mut obj = Map::new();
            for (i, header) in headers.iter().enumerate() {
                if header.is_empty() {
                    continue;
                }
                let value = row.get(i).cloned().unwrap_or(Value::Null);
                // Duplicate header names: the leftmost column wins.
                obj.entry(header.clone()).or_insert(value);
            }
            Value::Object(obj)
        })
        .collect();

    Ok(SheetTable {
        headers,
        records,
        encoding,
        delimiter,
    })
}
