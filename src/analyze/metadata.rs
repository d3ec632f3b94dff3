//! Best-effort report metadata extraction.
//!
//! Pulls the patient name, lab name, age, and sex out of the report header
//! with a handful of line-oriented patterns. Every field is optional; a
//! missing field is normal, not an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::analyze::ranges::Sex;

static PATIENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:Patient(?:'s)?\s*Name|Name)\s*[:\-]\s*([^\r\n]+?)\s*$").unwrap()
});

static LAB_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[^\r\n]*\b(?:Pathology|Laborator(?:y|ies)|Diagnostics?)\b[^\r\n]*$")
        .unwrap()
});

static AGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bAge\s*[:\-]?\s*(\d{1,3})").unwrap());

static SEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Sex|Gender)\s*[:\-]?\s*(Male|Female|M|F)\b").unwrap()
});

/// Header fields recovered from a report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub patient_name: Option<String>,
    pub lab_name: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
}

/// Extract whatever header metadata the report exposes
#[must_use]
pub fn extract_metadata(text: &str) -> ReportMetadata {
    ReportMetadata {
        patient_name: PATIENT_NAME
            .captures(text)
            .map(|caps| caps[1].to_string()),
        lab_name: LAB_NAME
            .find(text)
            .map(|found| found.as_str().trim().to_string()),
        age: AGE.captures(text).and_then(|caps| caps[1].parse().ok()),
        sex: detect_sex(text),
    }
}

/// Detect patient sex from the report text
///
/// A labeled `Sex:`/`Gender:` field wins; otherwise the text is scanned for
/// the bare words, checking "female" first since "male" is a substring.
#[must_use]
pub fn detect_sex(text: &str) -> Option<Sex> {
    if let Some(caps) = SEX.captures(text) {
        return Sex::parse(&caps[1]);
    }

    let lower = text.to_ascii_lowercase();
    if lower.contains("female") {
        Some(Sex::Female)
    } else if lower.contains("male") {
        Some(Sex::Male)
    } else {
        None
    }
}
