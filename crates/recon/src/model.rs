use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A raw spreadsheet cell after import. Booleans, dates and error values
/// are collapsed to text or numbers at the import boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Borrowed text for string cells only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Textual rendering used for identifier normalization and name lookup.
    /// Fractionless numbers render without a decimal point so an identifier
    /// stored as a numeric cell compares equal to its text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{n}"))
                }
            }
        }
    }
}

/// One of the three fixed roster roles being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    Concierge,
    Plan,
    BeneficiaryList,
}

impl SourceTag {
    pub const ALL: [SourceTag; 3] = [
        SourceTag::Concierge,
        SourceTag::Plan,
        SourceTag::BeneficiaryList,
    ];

    /// Built-in name-column header substrings for this source, highest
    /// priority first. Overridable per config.
    pub fn name_header_hints(&self) -> &'static [&'static str] {
        match self {
            Self::Concierge => &["funcionario", "nome"],
            Self::Plan => &["nome do beneficiário", "nome"],
            Self::BeneficiaryList => &["nome do beneficiário", "nome do beneficiario", "nome"],
        }
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Concierge => write!(f, "concierge"),
            Self::Plan => write!(f, "plan"),
            Self::BeneficiaryList => write!(f, "beneficiary_list"),
        }
    }
}

/// A loaded tabular source: ordered headers plus rectangular data rows.
///
/// Column access is by index; headers keep their original text and order.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub source: SourceTag,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Values of one column, in row order.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(col))
    }
}

/// Column indices chosen for one table. Both must resolve or the table is
/// rejected entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub identifier: usize,
    pub name: usize,
}

/// Pre-loaded tables, one per fixed source role.
pub struct ReconInput {
    pub concierge: RawTable,
    pub plan: RawTable,
    pub beneficiary_list: RawTable,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One reconciled identifier across all three sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub in_concierge: bool,
    pub in_plan: bool,
    pub in_beneficiary_list: bool,
}

impl ReportRow {
    pub fn present_in(&self, source: SourceTag) -> bool {
        match source {
            SourceTag::Concierge => self.in_concierge,
            SourceTag::Plan => self.in_plan,
            SourceTag::BeneficiaryList => self.in_beneficiary_list,
        }
    }
}

/// Per-source input statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceStats {
    /// Distinct normalized identifiers contributed by the source.
    pub identifiers: usize,
    /// Rows whose identifier repeated an earlier row (later row wins).
    pub duplicate_identifiers: usize,
    /// Identifiers whose digit content exceeds the canonical width.
    pub overlength_identifiers: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconSummary {
    pub total_identifiers: usize,
    pub in_all_sources: usize,
    pub missing_name: usize,
    pub concierge: SourceStats,
    pub plan: SourceStats,
    pub beneficiary_list: SourceStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub rows: Vec<ReportRow>,
}
