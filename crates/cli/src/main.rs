// rosterdiff CLI - headless roster reconciliation

mod exit_codes;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use rosterdiff_io::export;
use rosterdiff_recon::columns::{identify_source, resolve_columns};
use rosterdiff_recon::model::{Cell, RawTable, ReconInput, SourceTag};
use rosterdiff_recon::names::HeuristicNameClassifier;
use rosterdiff_recon::table::{find_header_row, header_texts};
use rosterdiff_recon::{ReconConfig, ReconError};

use exit_codes::{recon_exit_code, EXIT_ERROR, EXIT_MALFORMED_TABLE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rosterdiff")]
#[command(about = "Reconcile benefit rosters by CPF across three sources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the three rosters and report per-source presence
    #[command(after_help = "\
Examples:
  rosterdiff run --concierge concierge.xlsx --plan plano.xlsx --roster beneficiarios.xlsx
  rosterdiff run --auto concierge.xlsx plano.xlsx beneficiarios.xlsx --export resultado.xlsx
  rosterdiff run --auto *.xlsx --json | jq .summary")]
    Run {
        /// Concierge roster file (xlsx, xls, ods, csv)
        #[arg(long)]
        concierge: Option<PathBuf>,

        /// Plan operator roster file
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Beneficiary list roster file
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Unassigned roster files; requires --auto
        files: Vec<PathBuf>,

        /// Identify source roles from file headers
        #[arg(long)]
        auto: bool,

        /// TOML config overriding detection defaults
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output JSON to stdout instead of the human summary only
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Export the reconciled table as a spreadsheet (.xlsx or .csv)
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Show which identifier and name columns resolve for one file
    #[command(after_help = "\
Examples:
  rosterdiff columns plano.xlsx
  rosterdiff columns concierge.xlsx --source concierge")]
    Columns {
        /// Roster file to inspect
        file: PathBuf,

        /// Source role to resolve against (identified from headers if omitted)
        #[arg(long, value_enum)]
        source: Option<SourceArg>,

        /// TOML config overriding detection defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Concierge,
    Plan,
    Roster,
}

impl SourceArg {
    fn tag(self) -> SourceTag {
        match self {
            Self::Concierge => SourceTag::Concierge,
            Self::Plan => SourceTag::Plan,
            Self::Roster => SourceTag::BeneficiaryList,
        }
    }
}

struct CliError {
    code: u8,
    message: String,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError {
        code,
        message: message.into(),
    }
}

fn engine_err(err: ReconError) -> CliError {
    CliError {
        code: recon_exit_code(&err),
        message: err.to_string(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run_command(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

fn run_command(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Run {
            concierge,
            plan,
            roster,
            files,
            auto,
            config,
            json,
            output,
            export,
        } => cmd_run(
            concierge, plan, roster, files, auto, config, json, output, export,
        ),
        Commands::Columns {
            file,
            source,
            config,
        } => cmd_columns(file, source, config),
    }
}

fn load_config(path: Option<&Path>) -> Result<ReconConfig, CliError> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(p)
                .map_err(|e| cli_err(EXIT_USAGE, format!("cannot read config {}: {e}", p.display())))?;
            ReconConfig::from_toml(&raw).map_err(engine_err)
        }
        None => Ok(ReconConfig::default()),
    }
}

fn load_grid(path: &Path) -> Result<Vec<Vec<Cell>>, CliError> {
    rosterdiff_io::read_grid(path).map_err(engine_err)
}

fn load_table(path: &Path, source: SourceTag, config: &ReconConfig) -> Result<RawTable, CliError> {
    let grid = load_grid(path)?;
    RawTable::from_grid(grid, source, config.detect.header_scan_window).map_err(engine_err)
}

/// Assign the three source roles: either all three explicit flags, or
/// `--auto` with three unassigned files identified from their headers.
fn assign_roles(
    concierge: Option<PathBuf>,
    plan: Option<PathBuf>,
    roster: Option<PathBuf>,
    files: Vec<PathBuf>,
    auto: bool,
    config: &ReconConfig,
) -> Result<ReconInput, CliError> {
    match (concierge, plan, roster) {
        (Some(c), Some(p), Some(r)) if files.is_empty() && !auto => Ok(ReconInput {
            concierge: load_table(&c, SourceTag::Concierge, config)?,
            plan: load_table(&p, SourceTag::Plan, config)?,
            beneficiary_list: load_table(&r, SourceTag::BeneficiaryList, config)?,
        }),
        (None, None, None) if auto => assign_roles_auto(files, config),
        _ => Err(cli_err(
            EXIT_USAGE,
            "pass --concierge, --plan and --roster, or --auto with three unassigned files",
        )),
    }
}

fn assign_roles_auto(files: Vec<PathBuf>, config: &ReconConfig) -> Result<ReconInput, CliError> {
    if files.len() != 3 {
        return Err(engine_err(ReconError::MissingSource(format!(
            "--auto needs exactly three files, got {}",
            files.len()
        ))));
    }

    let window = config.detect.header_scan_window;
    let mut assigned: HashMap<SourceTag, (PathBuf, Vec<Vec<Cell>>)> = HashMap::new();

    for path in files {
        let grid = load_grid(&path)?;
        let header_idx = find_header_row(&grid, window).ok_or_else(|| {
            cli_err(
                EXIT_MALFORMED_TABLE,
                format!("{}: no header row found, cannot identify role", path.display()),
            )
        })?;
        let tag = identify_source(&header_texts(&grid[header_idx])).ok_or_else(|| {
            engine_err(ReconError::MissingSource(format!(
                "{}: cannot identify source role from headers; assign it explicitly",
                path.display()
            )))
        })?;
        if let Some((previous, _)) = assigned.get(&tag) {
            return Err(engine_err(ReconError::MissingSource(format!(
                "both {} and {} identify as '{tag}'",
                previous.display(),
                path.display()
            ))));
        }
        assigned.insert(tag, (path, grid));
    }

    let mut take = |tag: SourceTag| -> Result<RawTable, CliError> {
        let (_, grid) = assigned.remove(&tag).ok_or_else(|| {
            engine_err(ReconError::MissingSource(format!(
                "no file identified as '{tag}'"
            )))
        })?;
        RawTable::from_grid(grid, tag, window).map_err(engine_err)
    };

    Ok(ReconInput {
        concierge: take(SourceTag::Concierge)?,
        plan: take(SourceTag::Plan)?,
        beneficiary_list: take(SourceTag::BeneficiaryList)?,
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    concierge: Option<PathBuf>,
    plan: Option<PathBuf>,
    roster: Option<PathBuf>,
    files: Vec<PathBuf>,
    auto: bool,
    config_path: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
    export_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let input = assign_roles(concierge, plan, roster, files, auto, &config)?;

    let classifier = HeuristicNameClassifier::new();
    let result = rosterdiff_recon::run(&config, &input, &classifier).map_err(engine_err)?;

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| cli_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_ERROR, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    if let Some(ref path) = export_file {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        let stats = if is_csv {
            export::export_csv(&result, path).map_err(engine_err)?
        } else {
            export::export_xlsx(&result, path).map_err(engine_err)?
        };
        eprintln!("exported {} rows to {}", stats.rows_exported, path.display());
    }

    // Human summary to stderr
    let s = &result.summary;
    eprintln!(
        "{} identifiers — {} in all three sources, {} without a name (concierge {}, plan {}, beneficiary list {})",
        s.total_identifiers,
        s.in_all_sources,
        s.missing_name,
        s.concierge.identifiers,
        s.plan.identifiers,
        s.beneficiary_list.identifiers,
    );

    let duplicates = s.concierge.duplicate_identifiers
        + s.plan.duplicate_identifiers
        + s.beneficiary_list.duplicate_identifiers;
    if duplicates > 0 {
        eprintln!("note: {duplicates} duplicate identifier rows (the later row wins)");
    }
    let overlength = s.concierge.overlength_identifiers
        + s.plan.overlength_identifiers
        + s.beneficiary_list.overlength_identifiers;
    if overlength > 0 {
        eprintln!("note: {overlength} identifiers exceed 11 digits");
    }

    Ok(())
}

fn cmd_columns(
    file: PathBuf,
    source: Option<SourceArg>,
    config_path: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let window = config.detect.header_scan_window;
    let grid = load_grid(&file)?;

    let tag = match source {
        Some(arg) => arg.tag(),
        None => {
            let header_idx = find_header_row(&grid, window).ok_or_else(|| {
                cli_err(
                    EXIT_MALFORMED_TABLE,
                    format!("{}: no header row found", file.display()),
                )
            })?;
            identify_source(&header_texts(&grid[header_idx])).ok_or_else(|| {
                engine_err(ReconError::MissingSource(format!(
                    "{}: cannot identify source role from headers; pass --source",
                    file.display()
                )))
            })?
        }
    };

    let table = RawTable::from_grid(grid, tag, window).map_err(engine_err)?;
    let cols = resolve_columns(&table, &config, &HeuristicNameClassifier::new())
        .map_err(engine_err)?;

    println!("source:     {tag}");
    println!(
        "identifier: column {} (\"{}\")",
        cols.identifier + 1,
        table.headers[cols.identifier]
    );
    println!(
        "name:       column {} (\"{}\")",
        cols.name + 1,
        table.headers[cols.name]
    );
    Ok(())
}
