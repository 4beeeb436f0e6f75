// File I/O operations

pub mod csv;
pub mod export;
pub mod xlsx;

use std::path::Path;

use rosterdiff_recon::model::Cell;
use rosterdiff_recon::ReconError;

/// Read a spreadsheet file into a raw cell grid, dispatching on extension.
/// Excel-family formats go through calamine; everything else is treated as
/// delimited text.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<Cell>>, ReconError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("xlsx" | "xlsm" | "xls" | "xlsb" | "ods") => xlsx::read_grid(path),
        _ => csv::read_grid(path),
    }
}
