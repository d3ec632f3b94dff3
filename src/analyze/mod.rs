//! Biomarker analysis of extracted report text.
//!
//! Scans the text for the four known biomarkers with fixed patterns and
//! flags each found value Normal or Abnormal against its static reference
//! range. First match per biomarker wins; biomarkers without a match are
//! simply absent from the result.

pub mod metadata;
pub mod patterns;
pub mod ranges;

use log::debug;
use serde::Serialize;

pub use metadata::{ReportMetadata, detect_sex, extract_metadata};
pub use patterns::pattern;
pub use ranges::{Biomarker, ReferenceRange, Sex};

/// Normal/Abnormal flag for a found value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Normal,
    Abnormal,
}

/// One biomarker found in the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiomarkerResult {
    /// Which biomarker this is
    pub biomarker: Biomarker,
    /// Display name for UI tables
    pub name: &'static str,
    /// The extracted numeric value, in the reference unit
    pub value: f64,
    /// Reporting unit
    pub unit: &'static str,
    /// Normal/Abnormal flag
    pub status: Status,
    /// The reference interval used, e.g. `13.5 - 17.5`
    pub reference: String,
}

/// Full analysis of one report
#[derive(Debug, Clone, Serialize)]
pub struct ReportAnalysis {
    /// Header metadata recovered from the text
    pub metadata: ReportMetadata,
    /// The sex whose reference ranges were applied
    pub sex_used: Sex,
    /// Every biomarker found, in report order
    pub results: Vec<BiomarkerResult>,
}

/// Scan text for biomarker values and flag them against `sex`-specific ranges
#[must_use]
pub fn analyze_text(text: &str, sex: Sex) -> Vec<BiomarkerResult> {
    Biomarker::ALL
        .iter()
        .filter_map(|&biomarker| {
            let caps = pattern(biomarker).captures(text)?;
            // Non-parseable captures are skipped, not errors
            let value: f64 = caps[1].parse().ok()?;
            let reference = biomarker.reference(sex);
            let status = if reference.contains(value) {
                Status::Normal
            } else {
                Status::Abnormal
            };
            debug!("{}: {value} {} -> {status:?}", biomarker.name(), reference.unit);
            Some(BiomarkerResult {
                biomarker,
                name: biomarker.display_name(),
                value,
                unit: reference.unit,
                status,
                reference: reference.display(),
            })
        })
        .collect()
}

/// Analyze a report end to end: metadata, sex resolution, biomarker flags
///
/// Sex resolution order: explicit override, then the sex detected in the
/// text, then male (the analyzer's historical default).
#[must_use]
pub fn analyze_report(text: &str, sex_override: Option<Sex>) -> ReportAnalysis {
    let metadata = extract_metadata(text);
    let sex_used = sex_override.or(metadata.sex).unwrap_or(Sex::Male);
    let results = analyze_text(text, sex_used);
    ReportAnalysis {
        metadata,
        sex_used,
        results,
    }
}
