//! Biomarkers and their fixed reference ranges.
//!
//! Ranges are static and not user-configurable. Hemoglobin is the one
//! sex-dependent marker; everything else shares a single range.

use serde::{Deserialize, Serialize};

/// Patient sex, used to select hemoglobin reference ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse a user- or report-supplied sex value
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }
}

/// A healthy reference interval, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
    /// Reporting unit; values are assumed to already be in this unit
    pub unit: &'static str,
    /// Decimal places the bounds are reported with
    pub decimals: usize,
}

impl ReferenceRange {
    /// Whether a value falls inside the healthy interval
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Human-readable interval, e.g. `13.5 - 17.5`
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{:.prec$} - {:.prec$}",
            self.low,
            self.high,
            prec = self.decimals
        )
    }
}

const fn range(low: f64, high: f64, unit: &'static str, decimals: usize) -> ReferenceRange {
    ReferenceRange {
        low,
        high,
        unit,
        decimals,
    }
}

/// The four biomarkers the analyzer knows how to find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Biomarker {
    Hemoglobin,
    WbcCount,
    PlateletCount,
    Glucose,
}

impl Biomarker {
    /// All biomarkers, in report order
    pub const ALL: [Self; 4] = [
        Self::Hemoglobin,
        Self::WbcCount,
        Self::PlateletCount,
        Self::Glucose,
    ];

    /// Stable snake_case identifier
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hemoglobin => "hemoglobin",
            Self::WbcCount => "wbc_count",
            Self::PlateletCount => "platelet_count",
            Self::Glucose => "glucose",
        }
    }

    /// Display name for UI tables
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hemoglobin => "Hemoglobin",
            Self::WbcCount => "WBC Count",
            Self::PlateletCount => "Platelet Count",
            Self::Glucose => "Glucose",
        }
    }

    /// The reference range for this biomarker
    #[must_use]
    pub fn reference(self, sex: Sex) -> ReferenceRange {
        match (self, sex) {
            (Self::Hemoglobin, Sex::Male) => range(13.5, 17.5, "g/dL", 1),
            (Self::Hemoglobin, Sex::Female) => range(12.0, 15.5, "g/dL", 1),
            (Self::WbcCount, _) => range(4.5, 11.0, "10^9/L", 1),
            (Self::PlateletCount, _) => range(150.0, 450.0, "10^9/L", 0),
            (Self::Glucose, _) => range(70.0, 100.0, "mg/dL", 0),
        }
    }
}
