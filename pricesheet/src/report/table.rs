//! Plain-text pipe table markup.
//!
//! ```text
//! | Modelo | Servicio | Original |
//! |:-------|:---------|---------:|
//! | A10    | Pantalla |      850 |
//! ```
//!
//! Columns are padded to their widest cell. A column whose data cells are
//! all numeric is right-aligned; every other column is left-aligned.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

fn is_numeric(cell: &str) -> bool {
    cell.trim().parse::<f64>().map(|v| v.is_finite()).unwrap_or(false)
}

/// Cell text safe for a single table line: line breaks become spaces and
/// `|` is escaped.
pub fn escape_cell(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .replace('|', "\\|")
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, cols: usize, align: Align) -> String {
    let fill = " ".repeat(cols.saturating_sub(width(text)));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

/// Alignment of every column of `rows`.
pub fn column_alignments<R: AsRef<[String]>>(column_count: usize, rows: &[R]) -> Vec<Align> {
    (0..column_count)
        .map(|col| {
            let numeric = !rows.is_empty()
                && rows
                    .iter()
                    .all(|r| r.as_ref().get(col).map(|c| is_numeric(c)).unwrap_or(false));
            if numeric {
                Align::Right
            } else {
                Align::Left
            }
        })
        .collect()
}

/// Render `headers` and `rows` as a pipe table, without a row index.
///
/// Rows shorter than the header are padded with empty cells. The result
/// has no trailing newline.
pub fn render_pipe_table<R: AsRef<[String]>>(headers: &[&str], rows: &[R]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|r| r.as_ref().iter().map(|c| escape_cell(c)).collect())
        .collect();
    let aligns = column_alignments(headers.len(), &rows);

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .map(|c| width(c))
                .chain(std::iter::once(width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: Vec<String>| format!("| {} |", cells.join(" | "));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| pad(h, widths[i], aligns[i]))
            .collect(),
    ));
    lines.push(format!(
        "|{}|",
        widths
            .iter()
            .zip(&aligns)
            .map(|(w, a)| match a {
                Align::Left => format!(":{}", "-".repeat(w + 1)),
                Align::Right => format!("{}:", "-".repeat(w + 1)),
            })
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in &rows {
        lines.push(line(
            (0..headers.len())
                .map(|i| pad(row.get(i).map(String::as_str).unwrap_or(""), widths[i], aligns[i]))
                .collect(),
        ));
    }

    lines.join("\n")
}

/// Split a pipe table line into trimmed cells, unescaping `\|`.
///
/// Returns `None` when the line is not a table line.
pub fn split_row(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    let inner = line.strip_prefix('|')?;
    let inner = match inner.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => inner,
    };

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                cell.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(ch),
        }
    }
    cells.push(cell.trim().to_string());
    Some(cells)
}

/// True for the `|:---|---:|` line under the header.
pub fn is_separator(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|c| {
            let c = c.trim_matches(':');
            !c.is_empty() && c.chars().all(|ch| ch == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_render_alignment_and_padding() {
        let table = render_pipe_table(
            &["Modelo", "Original"],
            &rows(&[&["A10", "850"], &["Galaxy S20", "1299.5"]]),
        );
        let expected = "\
| Modelo     | Original |
|:-----------|---------:|
| A10        |      850 |
| Galaxy S20 |   1299.5 |";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_sentinel_makes_column_left_aligned() {
        let table = render_pipe_table(&["Original"], &rows(&[&["850"], &["N/A"]]));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[1], "|:---------|");
        assert_eq!(lines[2], "| 850      |");
    }

    #[test]
    fn test_header_only() {
        let table = render_pipe_table(&["Modelo", "Genérica"], &Vec::<Vec<String>>::new());
        assert_eq!(table, "| Modelo | Genérica |\n|:-------|:---------|");
    }

    #[test]
    fn test_split_row() {
        let cells = split_row("| A10  | Pantalla |   850 |").unwrap();
        assert_eq!(cells, vec!["A10", "Pantalla", "850"]);
        assert!(split_row("## Tabla de Precios").is_none());
    }

    #[test]
    fn test_multiline_and_pipe_cells_stay_on_one_line() {
        let table = render_pipe_table(
            &["Modelo", "Original"],
            &rows(&[&["K40\nPlus", "450"], &["A|B", "500"]]),
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(split_row(lines[2]).unwrap(), vec!["K40 Plus", "450"]);
        assert_eq!(split_row(lines[3]).unwrap(), vec!["A|B", "500"]);
    }

    #[test]
    fn test_is_separator() {
        assert!(is_separator(&split_row("|:-----|------:|").unwrap()));
        assert!(!is_separator(&split_row("| A10 | 850 |").unwrap()));
    }
}
