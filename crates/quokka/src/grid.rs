//! Plain-text rendering of a table grid.

use quokka_core::{Cell, TableModel};

/// Marker drawn in the delete column.
const DELETE_MARKER: &str = "[x]";

/// Format the model as a bordered table with a leading row-number column.
///
/// The trailing delete column shows a marker on every row; its header is blank.
pub fn format_grid(model: &TableModel) -> String {
    let columns = model.column_count();

    let mut headers = vec!["#".to_string()];
    headers.extend((0..columns).map(|col| model.header(col).unwrap_or_default().to_string()));

    let rows: Vec<Vec<String>> = (0..model.row_count())
        .map(|row| {
            let mut cells = vec![row.to_string()];
            cells.extend((0..columns).map(|col| match model.cell(row, col) {
                Some(Cell::DeleteAction) => DELETE_MARKER.to_string(),
                Some(cell) => cell.display_text(),
                None => String::new(),
            }));
            cells
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, text) in row.iter().enumerate() {
            widths[i] = widths[i].max(text.chars().count());
        }
    }

    let separator: String =
        widths.iter().map(|w| "-".repeat(*w + 2)).collect::<Vec<_>>().join("+");
    let separator = format!("+{separator}+\n");

    let line = |cells: &[String]| {
        let body = cells
            .iter()
            .zip(&widths)
            .map(|(text, w)| format!(" {text:<width$} ", width = *w))
            .collect::<Vec<_>>()
            .join("|");
        format!("|{body}|\n")
    };

    let mut output = String::new();
    output.push_str(&format!("{}\n", model.table()));
    output.push_str(&separator);
    output.push_str(&line(&headers));
    output.push_str(&separator);
    for row in &rows {
        output.push_str(&line(row));
    }
    if !rows.is_empty() {
        output.push_str(&separator);
    }
    output.push_str(&format!("{} row(s)\n", rows.len()));
    output
}
