// Report export (xlsx, csv)
//
// Presentation snapshot of a reconciliation result: presence flags are
// recoded to the localized yes/no pair and missing names to a visible
// marker. Not a round-trip format.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use rosterdiff_recon::model::{ReconResult, ReportRow};
use rosterdiff_recon::ReconError;

/// Localized presence markers written to exported reports.
pub const FLAG_PRESENT: &str = "Sim";
pub const FLAG_ABSENT: &str = "Não";

/// Marker for identifiers whose display name could not be resolved.
pub const MISSING_NAME_MARKER: &str = "—";

/// Fixed export column order.
pub const COLUMNS: [&str; 5] = ["CPF", "Nome", "Concierge", "Plano", "Beneficiários"];

#[derive(Debug, Default)]
pub struct ExportStats {
    pub rows_exported: usize,
    pub cells_exported: usize,
}

/// Presence flag as written to reports.
pub fn flag(present: bool) -> &'static str {
    if present {
        FLAG_PRESENT
    } else {
        FLAG_ABSENT
    }
}

/// Display name as written to reports.
pub fn display_name(row: &ReportRow) -> &str {
    row.display_name.as_deref().unwrap_or(MISSING_NAME_MARKER)
}

fn report_cells(row: &ReportRow) -> [&str; 5] {
    [
        &row.identifier,
        display_name(row),
        flag(row.in_concierge),
        flag(row.in_plan),
        flag(row.in_beneficiary_list),
    ]
}

/// Export a reconciliation result as a single-sheet XLSX workbook.
pub fn export_xlsx(result: &ReconResult, path: &Path) -> Result<ExportStats, ReconError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("Reconciliação")
        .map_err(|e| ReconError::Io(format!("failed to create worksheet: {e}")))?;

    let header_format = Format::new().set_bold();
    for (col, title) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *title, &header_format)
            .map_err(|e| ReconError::Io(format!("failed to write header: {e}")))?;
    }
    // Identifier and name columns need room; flags do not.
    worksheet
        .set_column_width(0, 16)
        .and_then(|ws| ws.set_column_width(1, 40))
        .map_err(|e| ReconError::Io(format!("failed to set layout: {e}")))?;

    let mut stats = ExportStats::default();
    for (i, row) in result.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, value) in report_cells(row).iter().enumerate() {
            worksheet
                .write_string(r, col as u16, *value)
                .map_err(|e| ReconError::Io(format!("failed to write row {r}: {e}")))?;
            stats.cells_exported += 1;
        }
        stats.rows_exported += 1;
    }

    workbook
        .save(path)
        .map_err(|e| ReconError::Io(format!("failed to save {}: {e}", path.display())))?;
    Ok(stats)
}

/// Export a reconciliation result as a comma-delimited file with the same
/// column order and recoding as the XLSX export.
pub fn export_csv(result: &ReconResult, path: &Path) -> Result<ExportStats, ReconError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| ReconError::Io(format!("failed to create {}: {e}", path.display())))?;

    writer
        .write_record(COLUMNS)
        .map_err(|e| ReconError::Io(e.to_string()))?;

    let mut stats = ExportStats::default();
    for row in &result.rows {
        writer
            .write_record(report_cells(row))
            .map_err(|e| ReconError::Io(e.to_string()))?;
        stats.rows_exported += 1;
        stats.cells_exported += COLUMNS.len();
    }

    writer
        .flush()
        .map_err(|e| ReconError::Io(format!("failed to save {}: {e}", path.display())))?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_recode_to_localized_pair() {
        assert_eq!(flag(true), "Sim");
        assert_eq!(flag(false), "Não");
    }

    #[test]
    fn missing_name_recodes_to_marker() {
        let row = ReportRow {
            identifier: "00000000001".into(),
            display_name: None,
            in_concierge: true,
            in_plan: false,
            in_beneficiary_list: false,
        };
        assert_eq!(display_name(&row), MISSING_NAME_MARKER);
        assert_eq!(report_cells(&row), ["00000000001", "—", "Sim", "Não", "Não"]);
    }
}
