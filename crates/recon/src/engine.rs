//! Reconciliation: resolve columns, derive per-source identifier indices,
//! union the identifiers and merge names by source priority.

use std::collections::{BTreeMap, BTreeSet};

use crate::columns::resolve_columns;
use crate::config::ReconConfig;
use crate::error::ReconError;
use crate::model::{
    RawTable, ReconInput, ReconMeta, ReconResult, ReconSummary, ReportRow, ResolvedColumns,
    SourceStats,
};
use crate::names::PersonNameClassifier;
use crate::normalize::{is_overlength, normalize_identifier};

/// Derived view of one source: normalized identifier → display name.
/// The input table stays untouched; when an identifier repeats, the later
/// row's name wins.
struct SourceIndex {
    names: BTreeMap<String, Option<String>>,
    stats: SourceStats,
}

impl SourceIndex {
    fn build(table: &RawTable, cols: ResolvedColumns) -> SourceIndex {
        let mut names: BTreeMap<String, Option<String>> = BTreeMap::new();
        let mut stats = SourceStats::default();

        for row in &table.rows {
            let Some(raw) = row.get(cols.identifier).and_then(|c| c.to_text()) else {
                continue;
            };
            // A cell with no digits at all (placeholders like "n/d") would
            // otherwise normalize to the all-zeros identifier.
            if !raw.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }

            let identifier = normalize_identifier(&raw);
            if is_overlength(&identifier) {
                stats.overlength_identifiers += 1;
            }

            let name = row.get(cols.name).and_then(|c| c.to_text());
            if names.insert(identifier, name).is_some() {
                stats.duplicate_identifiers += 1;
            }
        }

        stats.identifiers = names.len();
        SourceIndex { names, stats }
    }

    fn contains(&self, identifier: &str) -> bool {
        self.names.contains_key(identifier)
    }

    fn name(&self, identifier: &str) -> Option<String> {
        self.names.get(identifier).cloned().flatten()
    }
}

/// Run the three-source reconciliation.
///
/// Every identifier appearing in at least one source produces exactly one
/// row, ordered ascending by identifier. The display name follows source
/// priority: plan, then concierge, then beneficiary list. Any resolution
/// failure aborts the whole run; no partial results.
pub fn run(
    config: &ReconConfig,
    input: &ReconInput,
    classifier: &dyn PersonNameClassifier,
) -> Result<ReconResult, ReconError> {
    let concierge_cols = resolve_columns(&input.concierge, config, classifier)?;
    let plan_cols = resolve_columns(&input.plan, config, classifier)?;
    let roster_cols = resolve_columns(&input.beneficiary_list, config, classifier)?;

    let concierge = SourceIndex::build(&input.concierge, concierge_cols);
    let plan = SourceIndex::build(&input.plan, plan_cols);
    let roster = SourceIndex::build(&input.beneficiary_list, roster_cols);

    let mut identifiers: BTreeSet<String> = BTreeSet::new();
    for index in [&concierge, &plan, &roster] {
        identifiers.extend(index.names.keys().cloned());
    }

    let mut rows = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        let in_concierge = concierge.contains(&identifier);
        let in_plan = plan.contains(&identifier);
        let in_beneficiary_list = roster.contains(&identifier);

        let display_name = if in_plan {
            plan.name(&identifier)
        } else if in_concierge {
            concierge.name(&identifier)
        } else {
            roster.name(&identifier)
        };

        rows.push(ReportRow {
            identifier,
            display_name,
            in_concierge,
            in_plan,
            in_beneficiary_list,
        });
    }

    let summary = ReconSummary {
        total_identifiers: rows.len(),
        in_all_sources: rows
            .iter()
            .filter(|r| r.in_concierge && r.in_plan && r.in_beneficiary_list)
            .count(),
        missing_name: rows.iter().filter(|r| r.display_name.is_none()).count(),
        concierge: concierge.stats,
        plan: plan.stats,
        beneficiary_list: roster.stats,
    };

    Ok(ReconResult {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        rows,
    })
}
