// File-level round trip: write roster workbooks with rust_xlsxwriter, read
// them back through calamine, reconcile, export, and re-read the export.

use std::path::Path;

use rust_xlsxwriter::Workbook;

use rosterdiff_io::export::{export_csv, export_xlsx};
use rosterdiff_io::read_grid;
use rosterdiff_recon::model::{Cell, ReconInput, SourceTag};
use rosterdiff_recon::names::HeuristicNameClassifier;
use rosterdiff_recon::table::DEFAULT_HEADER_SCAN_WINDOW;
use rosterdiff_recon::{run, RawTable, ReconConfig, ReconResult};

fn write_roster(path: &Path, preamble: &[&str], headers: &[&str], rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let mut r = 0u32;
    for line in preamble {
        worksheet.write_string(r, 0, *line).unwrap();
        r += 1;
    }
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(r, col as u16, *header).unwrap();
    }
    r += 1;
    for row in rows {
        for (col, value) in row.iter().enumerate() {
            worksheet.write_string(r, col as u16, *value).unwrap();
        }
        r += 1;
    }

    workbook.save(path).unwrap();
}

fn load(path: &Path, source: SourceTag) -> RawTable {
    let grid = read_grid(path).unwrap();
    RawTable::from_grid(grid, source, DEFAULT_HEADER_SCAN_WINDOW).unwrap()
}

fn reconcile(dir: &Path) -> ReconResult {
    let concierge = dir.join("concierge.xlsx");
    let plan = dir.join("plano.xlsx");
    let roster = dir.join("beneficiarios.xlsx");

    write_roster(
        &concierge,
        &["Relatório Concierge", "Emitido em 05/08/2026"],
        &["CPF", "Funcionario"],
        &[&["123.456.789-00", "Ana Souza"], &["987.654.321-00", "Bruno Lima"]],
    );
    write_roster(
        &plan,
        &[],
        &["CPF", "Nome do Beneficiário", "Plano"],
        &[&["12345678900", "Ana P. Souza", "Ouro"]],
    );
    write_roster(
        &roster,
        &["Lista de Beneficiários"],
        &["CPF", "Nome do Beneficiario"],
        &[&["555.666.777-88", "Diego Ramos"]],
    );

    let input = ReconInput {
        concierge: load(&concierge, SourceTag::Concierge),
        plan: load(&plan, SourceTag::Plan),
        beneficiary_list: load(&roster, SourceTag::BeneficiaryList),
    };
    run(
        &ReconConfig::default(),
        &input,
        &HeuristicNameClassifier::new(),
    )
    .unwrap()
}

fn text_at(grid: &[Vec<Cell>], row: usize, col: usize) -> String {
    grid[row][col].to_text().unwrap_or_default()
}

#[test]
fn xlsx_rosters_reconcile_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let result = reconcile(dir.path());

    assert_eq!(result.summary.total_identifiers, 3);
    let ana = result
        .rows
        .iter()
        .find(|r| r.identifier == "12345678900")
        .unwrap();
    assert_eq!(ana.display_name.as_deref(), Some("Ana P. Souza"));
    assert!(ana.in_concierge && ana.in_plan && !ana.in_beneficiary_list);
}

#[test]
fn exported_xlsx_recodes_flags_and_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let result = reconcile(dir.path());

    let out = dir.path().join("resultado.xlsx");
    let stats = export_xlsx(&result, &out).unwrap();
    assert_eq!(stats.rows_exported, result.rows.len());

    let grid = read_grid(&out).unwrap();
    assert_eq!(
        grid[0]
            .iter()
            .map(|c| c.to_text().unwrap_or_default())
            .collect::<Vec<_>>(),
        ["CPF", "Nome", "Concierge", "Plano", "Beneficiários"]
    );

    // Rows are ordered by identifier: 123... < 555... < 987...
    assert_eq!(text_at(&grid, 1, 0), "12345678900");
    assert_eq!(text_at(&grid, 1, 1), "Ana P. Souza");
    assert_eq!(text_at(&grid, 1, 2), "Sim");
    assert_eq!(text_at(&grid, 1, 4), "Não");

    assert_eq!(text_at(&grid, 2, 0), "55566677788");
    assert_eq!(text_at(&grid, 2, 2), "Não");
    assert_eq!(text_at(&grid, 2, 4), "Sim");

    assert_eq!(text_at(&grid, 3, 0), "98765432100");
    assert_eq!(text_at(&grid, 3, 1), "Bruno Lima");
}

#[test]
fn exported_csv_matches_xlsx_recoding() {
    let dir = tempfile::tempdir().unwrap();
    let result = reconcile(dir.path());

    let out = dir.path().join("resultado.csv");
    export_csv(&result, &out).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next().unwrap(),
        "CPF,Nome,Concierge,Plano,Beneficiários"
    );
    assert_eq!(
        lines.next().unwrap(),
        "12345678900,Ana P. Souza,Sim,Sim,Não"
    );
}

#[test]
fn csv_roster_loads_like_xlsx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plano.csv");
    std::fs::write(
        &path,
        "CPF;Nome do Beneficiário;Plano\n123.456.789-00;Ana P. Souza;Ouro\n",
    )
    .unwrap();

    let table = load(&path, SourceTag::Plan);
    assert_eq!(
        table.headers,
        ["CPF", "Nome do Beneficiário", "Plano"]
    );
    assert_eq!(table.rows.len(), 1);
}
