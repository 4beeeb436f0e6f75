use serde::Deserialize;

use crate::error::ReconError;
use crate::model::SourceTag;
use crate::table::DEFAULT_HEADER_SCAN_WINDOW;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Engine configuration. Every field defaults, so zero-config runs work.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    pub detect: DetectConfig,
    pub columns: ColumnHints,
}

// ---------------------------------------------------------------------------
// Detection knobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Leading rows scanned for the header marker row.
    pub header_scan_window: usize,
    /// Fraction of sampled values that must look name-shaped for the
    /// content fallback to pick a column. Strict: the fraction must
    /// exceed the threshold.
    pub name_match_threshold: f64,
    /// Cap on values sampled per column during the content fallback.
    /// Absent scans every non-empty value, matching the original report
    /// behavior; set it to bound latency on very tall rosters.
    pub max_name_samples: Option<usize>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            header_scan_window: DEFAULT_HEADER_SCAN_WINDOW,
            name_match_threshold: 0.5,
            max_name_samples: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-source name-column hints
// ---------------------------------------------------------------------------

/// Ordered header substrings tried for the name column of each source,
/// highest priority first. Compared lowercased.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnHints {
    pub concierge: Vec<String>,
    pub plan: Vec<String>,
    pub beneficiary_list: Vec<String>,
}

impl Default for ColumnHints {
    fn default() -> Self {
        let builtin = |tag: SourceTag| {
            tag.name_header_hints()
                .iter()
                .map(|s| s.to_string())
                .collect()
        };
        Self {
            concierge: builtin(SourceTag::Concierge),
            plan: builtin(SourceTag::Plan),
            beneficiary_list: builtin(SourceTag::BeneficiaryList),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let mut config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Lowercase the hint lists once so resolution compares without
    /// re-allocating per header.
    fn normalize(&mut self) {
        for tag in SourceTag::ALL {
            for hint in self.name_hints_mut(tag) {
                *hint = hint.to_lowercase();
            }
        }
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.detect.header_scan_window == 0 {
            return Err(ReconError::ConfigValidation(
                "detect.header_scan_window must be at least 1".into(),
            ));
        }
        let threshold = self.detect.name_match_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ReconError::ConfigValidation(format!(
                "detect.name_match_threshold must be in (0, 1], got {threshold}"
            )));
        }
        if self.detect.max_name_samples == Some(0) {
            return Err(ReconError::ConfigValidation(
                "detect.max_name_samples must be at least 1 when set".into(),
            ));
        }
        for tag in SourceTag::ALL {
            if self.name_hints(tag).is_empty() {
                return Err(ReconError::ConfigValidation(format!(
                    "columns.{tag}: hint list must not be empty"
                )));
            }
        }
        Ok(())
    }

    pub fn name_hints(&self, source: SourceTag) -> &[String] {
        match source {
            SourceTag::Concierge => &self.columns.concierge,
            SourceTag::Plan => &self.columns.plan,
            SourceTag::BeneficiaryList => &self.columns.beneficiary_list,
        }
    }

    fn name_hints_mut(&mut self, source: SourceTag) -> &mut Vec<String> {
        match source {
            SourceTag::Concierge => &mut self.columns.concierge,
            SourceTag::Plan => &mut self.columns.plan,
            SourceTag::BeneficiaryList => &mut self.columns.beneficiary_list,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
