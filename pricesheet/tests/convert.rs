//! End-to-end conversions through real files.

use chrono::NaiveDate;
use pricesheet::{
    convert_file, parse_report, ConvertOptions, ErrorKind, PipelineError, Price, ReportConfig,
    SchemaError, OUTPUT_COLUMNS,
};
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Cell of a fixture sheet.
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

use Cell::{Empty, Number, Text};

fn write_xlsx(path: &Path, rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            match cell {
                Text(s) => {
                    sheet.write_string(r as u32, c as u16, *s).unwrap();
                }
                Number(n) => {
                    sheet.write_number(r as u32, c as u16, *n).unwrap();
                }
                Empty => {}
            }
        }
    }
    workbook.save(path).unwrap();
}

fn options() -> ConvertOptions {
    ConvertOptions {
        config: ReportConfig::default(),
        date: NaiveDate::from_ymd_opt(2024, 6, 1),
    }
}

fn header() -> Vec<Cell<'static>> {
    vec![Text("Modelo"), Text("Precio"), Text("Calidad")]
}

#[test]
fn test_xlsx_two_qualities() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Samsung.xlsx");
    let output = dir.path().join("samsung.md");
    write_xlsx(
        &input,
        &[
            header(),
            vec![Text("ModeloX"), Text("100"), Text("original")],
            vec![Text("ModeloX"), Number(80.0), Text("generica")],
        ],
    );

    let summary = convert_file(&input, &output, &options()).unwrap();
    assert_eq!(summary.brand, "Samsung");
    assert_eq!(summary.rows_read, 2);
    assert_eq!(summary.models, 1);

    let doc = fs::read_to_string(&output).unwrap();
    assert!(doc.starts_with("# Precios Samsung - SalvaCell\n"));
    assert!(doc.contains("- **Última actualización:** 2024-06-01"));

    let report = parse_report(&doc).unwrap();
    assert_eq!(report.declared_count, Some(1));
    let row = &report.rows[0];
    assert_eq!(row.modelo, "ModeloX");
    assert_eq!(row.servicio, "Pantalla");
    assert_eq!(row.original, Price::Amount(100.0));
    assert_eq!(row.generica, Price::Amount(80.0));
    assert_eq!(row.in_store, "Mismo día (antes 4PM) / Siguiente día");
    assert_eq!(row.at_home, "45-60 min");
}

#[test]
fn test_unparseable_price_becomes_sentinel() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Motorola.xlsx");
    let output = dir.path().join("motorola.md");
    write_xlsx(
        &input,
        &[
            header(),
            vec![Text("Moto G7"), Text("abc"), Text("Cal/Orig")],
            vec![Text("Moto G8"), Empty, Text("original")],
        ],
    );

    let summary = convert_file(&input, &output, &options()).unwrap();
    assert_eq!(summary.unparsed_prices, 2);
    assert_eq!(summary.models, 2);

    let report = parse_report(&fs::read_to_string(&output).unwrap()).unwrap();
    for row in &report.rows {
        assert_eq!(row.original, Price::Missing);
        assert_eq!(row.generica, Price::Missing);
    }
}

#[test]
fn test_missing_column_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Apple.xlsx");
    let output = dir.path().join("apple.md");
    write_xlsx(
        &input,
        &[
            vec![Text("Modelo"), Text("Costo"), Text("Calidad")],
            vec![Text("iPhone 11"), Number(1500.0), Text("original")],
        ],
    );

    let err = convert_file(&input, &output, &options()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transformation);
    assert!(matches!(
        err,
        PipelineError::Schema(SchemaError::MissingColumns(ref cols)) if cols == &vec!["Precio".to_string()]
    ));
    assert!(!output.exists());
}

#[test]
fn test_padded_headers_and_extra_columns() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Xiaomi.xlsx");
    let output = dir.path().join("xiaomi.md");
    write_xlsx(
        &input,
        &[
            vec![Text("Notas"), Text(" Modelo "), Text("Precio  "), Text(" Calidad")],
            vec![Text("stock"), Text("Redmi 9"), Number(650.0), Text(" GENERICA ")],
        ],
    );

    convert_file(&input, &output, &options()).unwrap();
    let report = parse_report(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report.rows[0].generica, Price::Amount(650.0));
    assert_eq!(report.rows[0].original, Price::Missing);
}

#[test]
fn test_zero_data_rows() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Nokia.xlsx");
    let output = dir.path().join("nokia.md");
    write_xlsx(&input, &[header()]);

    let summary = convert_file(&input, &output, &options()).unwrap();
    assert_eq!(summary.models, 0);

    let doc = fs::read_to_string(&output).unwrap();
    let table_lines: Vec<&str> = doc.lines().filter(|l| l.starts_with('|')).collect();
    assert_eq!(table_lines.len(), 2);
    for column in OUTPUT_COLUMNS {
        assert!(table_lines[0].contains(column));
    }
    assert!(doc.contains("modelos_disponibles: 0\n"));
}

#[test]
fn test_always_six_columns() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Huawei.xlsx");
    let output = dir.path().join("huawei.md");
    write_xlsx(
        &input,
        &[
            header(),
            vec![Text("P30"), Number(900.0), Text("incell")],
            vec![Text("P40"), Number(1100.0), Text("oled")],
        ],
    );

    let summary = convert_file(&input, &output, &options()).unwrap();
    assert_eq!(summary.extra_categories, vec!["Incell", "Oled"]);

    let doc = fs::read_to_string(&output).unwrap();
    for line in doc.lines().filter(|l| l.starts_with('|')) {
        assert_eq!(line.matches('|').count(), OUTPUT_COLUMNS.len() + 1, "line: {line}");
    }
}

#[test]
fn test_csv_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("LG.csv");
    let output = dir.path().join("lg.md");
    fs::write(
        &input,
        "Modelo;Precio;Calidad\nK40;450;Original\nK40;300;Genérica\nK40;999;original\n",
    )
    .unwrap();

    let summary = convert_file(&input, &output, &options()).unwrap();
    assert_eq!(summary.duplicates, 1);

    let report = parse_report(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report.brand.as_deref(), Some("LG"));
    assert_eq!(report.rows[0].original, Price::Amount(450.0));
    assert_eq!(report.rows[0].generica, Price::Amount(300.0));
}

#[test]
fn test_later_price_fills_missing_first() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("LG.csv");
    let output = dir.path().join("lg.md");
    fs::write(
        &input,
        "Modelo;Precio;Calidad\nK40;consultar;Original\nK40;450;Original\nK40;500;Original\n",
    )
    .unwrap();

    let summary = convert_file(&input, &output, &options()).unwrap();
    assert_eq!(summary.duplicates, 1);

    let report = parse_report(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report.rows[0].original, Price::Amount(450.0));
}

#[test]
fn test_multiline_model_cell() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("LG.xlsx");
    let output = dir.path().join("lg.md");
    write_xlsx(
        &input,
        &[
            header(),
            vec![Text("K40\nPlus"), Number(450.0), Text("Original")],
            vec![Text("K50"), Number(500.0), Text("Original")],
        ],
    );

    let summary = convert_file(&input, &output, &options()).unwrap();
    assert_eq!(summary.models, 2);

    let report = parse_report(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report.declared_count, Some(2));
    assert_eq!(report.rows[0].modelo, "K40 Plus");
    assert_eq!(report.rows[1].modelo, "K50");
}

#[test]
fn test_output_overwritten() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Oppo.csv");
    let output = dir.path().join("oppo.md");
    fs::write(&input, "Modelo,Precio,Calidad\nA15,500,original\n").unwrap();
    fs::write(&output, "stale content that is much longer than nothing".repeat(100)).unwrap();

    convert_file(&input, &output, &options()).unwrap();
    let doc = fs::read_to_string(&output).unwrap();
    assert!(doc.starts_with("# Precios Oppo"));
    assert!(!doc.contains("stale content"));
}

#[test]
fn test_input_not_found() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("out.md");

    let err = convert_file(&dir.path().join("missing.xlsx"), &output, &options()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert!(!output.exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("precios.pdf");
    fs::write(&input, "not a sheet").unwrap();

    let err = convert_file(&input, &dir.path().join("out.md"), &options()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transformation);
    assert!(err.to_string().contains("pdf"));
}
