// Excel file import (xlsx, xls, xlsb, ods)
//
// One-way conversion: the first worksheet is flattened into a raw cell
// grid. Header detection and column resolution happen downstream in the
// engine, so no structure is inferred here.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use rosterdiff_recon::model::Cell;
use rosterdiff_recon::ReconError;

/// Maximum number of cells to import (prevents DoS from huge files)
const MAX_CELLS: usize = 1_000_000;

/// Import the first worksheet of an Excel file as a raw cell grid.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<Cell>>, ReconError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReconError::Io(format!("failed to open {}: {e}", path.display())))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ReconError::Io(format!("{}: workbook contains no sheets", path.display())))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReconError::Io(format!("failed to read sheet '{sheet_name}': {e}")))?;

    let mut grid = Vec::new();
    let mut total = 0usize;
    for row in range.rows() {
        total += row.len();
        if total > MAX_CELLS {
            return Err(ReconError::Io(format!(
                "{}: more than {MAX_CELLS} cells",
                path.display()
            )));
        }
        grid.push(row.iter().map(convert).collect());
    }

    Ok(grid)
}

/// Collapse calamine's cell data into the engine's value domain.
fn convert(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
