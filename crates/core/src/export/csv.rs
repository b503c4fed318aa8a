//! CSV renderer.

use crate::project::{COLUMN_HEADERS, Cell, ProjectRow};

/// UTF-8 byte order mark, so spreadsheet applications detect the encoding.
pub const BOM: char = '\u{feff}';

/// Renders rows as CSV: BOM, header row, one line per row.
///
/// Text cells are always quoted with `"` doubled; numbers are written bare.
pub fn render_csv(rows: &[ProjectRow]) -> String {
    let mut output = String::new();
    output.push(BOM);

    let headers: Vec<String> = COLUMN_HEADERS.iter().map(|h| quote(h)).collect();
    output.push_str(&headers.join(","));
    output.push('\n');

    for row in rows {
        let cells: Vec<String> = row.cells().iter().map(render_cell).collect();
        output.push_str(&cells.join(","));
        output.push('\n');
    }

    output
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => n.to_string(),
        Cell::Text(s) => quote(s),
    }
}

/// Quote a CSV text field
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}
