//! Table construction: locate the true header row inside a raw cell grid.
//!
//! Roster exports routinely carry metadata preamble rows (report title,
//! issue date, filters) above the real header. The loader scans a bounded
//! window of leading rows for the identifier header marker and re-bases
//! the table there.

use crate::error::ReconError;
use crate::model::{Cell, RawTable, SourceTag};

/// Cell text that marks the true header row. Matched trimmed and
/// case-insensitively.
pub const HEADER_MARKER: &str = "cpf";

/// Default number of leading rows scanned for the header marker.
pub const DEFAULT_HEADER_SCAN_WINDOW: usize = 10;

/// Index of the first row within the scan window containing the header
/// marker, if any.
pub fn find_header_row(grid: &[Vec<Cell>], window: usize) -> Option<usize> {
    grid.iter().take(window).position(|row| {
        row.iter().any(|cell| {
            cell.as_str()
                .is_some_and(|s| s.trim().eq_ignore_ascii_case(HEADER_MARKER))
        })
    })
}

/// Header texts of a row, trimmed; non-text cells render through the same
/// textual collapse as data cells.
pub fn header_texts(row: &[Cell]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.to_text().unwrap_or_default())
        .collect()
}

impl RawTable {
    /// Build a table from a raw imported grid.
    ///
    /// The first row within `window` containing the header marker becomes
    /// the header row; everything below becomes data. Data rows are resized
    /// to header width so the table is rectangular.
    pub fn from_grid(
        grid: Vec<Vec<Cell>>,
        source: SourceTag,
        window: usize,
    ) -> Result<RawTable, ReconError> {
        let header_idx = find_header_row(&grid, window).ok_or_else(|| {
            ReconError::MalformedTable {
                source,
                reason: format!(
                    "no row containing a '{}' header within the first {} rows",
                    HEADER_MARKER.to_uppercase(),
                    window
                ),
            }
        })?;

        let mut headers = header_texts(&grid[header_idx]);
        while headers.last().is_some_and(|h| h.is_empty()) {
            headers.pop();
        }
        if headers.is_empty() {
            return Err(ReconError::MalformedTable {
                source,
                reason: "header row has no columns".to_string(),
            });
        }

        let width = headers.len();
        let rows = grid
            .into_iter()
            .skip(header_idx + 1)
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Ok(RawTable {
            source,
            headers,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn skips_metadata_preamble() {
        let grid = vec![
            vec![text("Relatório de Beneficiários"), Cell::Empty],
            vec![text("Emitido em 05/08/2026"), Cell::Empty],
            vec![text("CPF"), text("Nome")],
            vec![text("123.456.789-00"), text("Ana Souza")],
        ];
        let table = RawTable::from_grid(grid, SourceTag::Plan, DEFAULT_HEADER_SCAN_WINDOW).unwrap();
        assert_eq!(table.headers, vec!["CPF", "Nome"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn marker_matches_case_insensitively() {
        let grid = vec![
            vec![text("cpf"), text("Funcionario")],
            vec![text("11111111111"), text("Bruno Lima")],
        ];
        let table =
            RawTable::from_grid(grid, SourceTag::Concierge, DEFAULT_HEADER_SCAN_WINDOW).unwrap();
        assert_eq!(table.headers[0], "cpf");
    }

    #[test]
    fn missing_marker_is_malformed() {
        let grid = vec![
            vec![text("Documento"), text("Nome")],
            vec![text("123"), text("Ana")],
        ];
        let err = RawTable::from_grid(grid, SourceTag::Concierge, DEFAULT_HEADER_SCAN_WINDOW)
            .unwrap_err();
        assert!(matches!(err, ReconError::MalformedTable { .. }));
    }

    #[test]
    fn marker_outside_window_is_malformed() {
        let mut grid: Vec<Vec<Cell>> = (0..12)
            .map(|i| vec![text(&format!("meta {i}"))])
            .collect();
        grid.push(vec![text("CPF"), text("Nome")]);
        let err = RawTable::from_grid(grid, SourceTag::Plan, DEFAULT_HEADER_SCAN_WINDOW)
            .unwrap_err();
        assert!(matches!(err, ReconError::MalformedTable { .. }));
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let grid = vec![
            vec![text("CPF"), text("Nome"), text("Plano")],
            vec![text("22222222222")],
            vec![text("33333333333"), text("Carla Dias"), text("Ouro"), text("extra")],
        ];
        let table = RawTable::from_grid(grid, SourceTag::Plan, DEFAULT_HEADER_SCAN_WINDOW).unwrap();
        assert!(table.rows.iter().all(|r| r.len() == 3));
        assert_eq!(table.rows[0][1], Cell::Empty);
    }

    #[test]
    fn numeric_header_cells_render_as_text() {
        let row = vec![text("CPF"), Cell::Number(2026.0), Cell::Empty];
        assert_eq!(header_texts(&row), vec!["CPF", "2026", ""]);
    }
}
