//! Column resolution: locate the identifier and display-name columns of a
//! loaded table, and identify which source role a header row belongs to.

use crate::config::{DetectConfig, ReconConfig};
use crate::error::{ColumnKind, ReconError};
use crate::model::{Cell, RawTable, ResolvedColumns, SourceTag};
use crate::names::PersonNameClassifier;

/// Header substring (lowercase) that marks an identifier column.
pub const IDENTIFIER_HEADER_HINT: &str = "cpf";

/// First header, in original column order, containing the identifier hint
/// case-insensitively.
pub fn resolve_identifier_column(table: &RawTable) -> Result<usize, ReconError> {
    table
        .headers
        .iter()
        .position(|h| h.to_lowercase().contains(IDENTIFIER_HEADER_HINT))
        .ok_or(ReconError::ColumnNotFound {
            kind: ColumnKind::Identifier,
            source: table.source,
        })
}

/// Resolve the display-name column.
///
/// Header pass first: the first header containing any of the source's
/// ordered hint substrings wins, making resolution dependent on column
/// layout rather than alphabetic order. Only when no header matches does
/// the content fallback run, picking the first column whose non-empty
/// text values look name-shaped more often than the threshold.
pub fn resolve_name_column(
    table: &RawTable,
    hints: &[String],
    classifier: &dyn PersonNameClassifier,
    detect: &DetectConfig,
) -> Result<usize, ReconError> {
    for (idx, header) in table.headers.iter().enumerate() {
        let lower = header.to_lowercase();
        if hints.iter().any(|hint| lower.contains(hint.as_str())) {
            return Ok(idx);
        }
    }

    for col in 0..table.headers.len() {
        if name_shaped_fraction(table, col, classifier, detect.max_name_samples)
            > detect.name_match_threshold
        {
            return Ok(col);
        }
    }

    Err(ReconError::ColumnNotFound {
        kind: ColumnKind::Name,
        source: table.source,
    })
}

/// Resolve both columns for a table. Fail-fast: a table with either column
/// unresolved is rejected entirely.
pub fn resolve_columns(
    table: &RawTable,
    config: &ReconConfig,
    classifier: &dyn PersonNameClassifier,
) -> Result<ResolvedColumns, ReconError> {
    Ok(ResolvedColumns {
        identifier: resolve_identifier_column(table)?,
        name: resolve_name_column(
            table,
            config.name_hints(table.source),
            classifier,
            &config.detect,
        )?,
    })
}

/// Fraction of a column's non-empty text values the classifier accepts.
/// Numeric cells never count as names and are left out of the sample.
fn name_shaped_fraction(
    table: &RawTable,
    col: usize,
    classifier: &dyn PersonNameClassifier,
    cap: Option<usize>,
) -> f64 {
    let mut seen = 0usize;
    let mut hits = 0usize;
    for cell in table.column(col) {
        let Cell::Text(value) = cell else { continue };
        if value.trim().is_empty() {
            continue;
        }
        seen += 1;
        if classifier.is_person_name(value) {
            hits += 1;
        }
        if cap.is_some_and(|cap| seen >= cap) {
            break;
        }
    }
    if seen == 0 {
        0.0
    } else {
        hits as f64 / seen as f64
    }
}

/// Identify which source role a header row belongs to, for callers that do
/// not assign roles explicitly.
///
/// The concierge roster is the only one carrying an employee column; the
/// accentless beneficiary-name spelling only appears in beneficiary-list
/// exports. Returns `None` when no distinguishing header is present.
pub fn identify_source(headers: &[String]) -> Option<SourceTag> {
    let lower: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let has = |needle: &str| lower.iter().any(|h| h.contains(needle));

    if has("funcionario") || has("funcionário") {
        return Some(SourceTag::Concierge);
    }
    if has("nome do beneficiario") {
        return Some(SourceTag::BeneficiaryList);
    }
    if has("nome do beneficiário") {
        return Some(SourceTag::Plan);
    }
    None
}
