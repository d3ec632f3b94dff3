//! Biomarker value patterns.
//!
//! One fixed regular expression per biomarker: a label alternation, any run
//! of non-digit characters on the same line, then a signed decimal capture.
//! Heuristic by design — no unit normalization, no scientific notation, no
//! `12-15`-style range values.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyze::ranges::Biomarker;

static HEMOGLOBIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Hemoglobin|HGB)[^\d\n]*([+-]?\d+(?:\.\d+)?)").unwrap()
});

static WBC_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:WBC|White\s*Blood\s*Cell)[^\d\n]*([+-]?\d+(?:\.\d+)?)").unwrap()
});

static PLATELET_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Platelet|PLT)[^\d\n]*([+-]?\d+(?:\.\d+)?)").unwrap()
});

static GLUCOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Glucose|Blood\s*Sugar)[^\d\n]*([+-]?\d+(?:\.\d+)?)").unwrap()
});

/// The pattern for one biomarker
#[must_use]
pub fn pattern(biomarker: Biomarker) -> &'static Regex {
    match biomarker {
        Biomarker::Hemoglobin => &HEMOGLOBIN,
        Biomarker::WbcCount => &WBC_COUNT,
        Biomarker::PlateletCount => &PLATELET_COUNT,
        Biomarker::Glucose => &GLUCOSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_capture(biomarker: Biomarker, text: &str) -> Option<String> {
        pattern(biomarker)
            .captures(text)
            .map(|caps| caps[1].to_string())
    }

    #[test]
    fn matches_the_known_label_formats() {
        let cases = [
            (Biomarker::Hemoglobin, "Hemoglobin: 14.2 g/dL", "14.2"),
            (Biomarker::Hemoglobin, "HGB 12.5", "12.5"),
            (Biomarker::WbcCount, "WBC Count: 8.5 x10^9/L", "8.5"),
            (Biomarker::WbcCount, "White Blood Cell 9.2", "9.2"),
            (Biomarker::PlateletCount, "Platelet 250", "250"),
            (Biomarker::PlateletCount, "PLT: 220 x10^9/L", "220"),
            (Biomarker::Glucose, "Glucose 95 mg/dL", "95"),
            (Biomarker::Glucose, "Blood Sugar: 110", "110"),
        ];

        for (biomarker, text, expected) in cases {
            assert_eq!(
                first_capture(biomarker, text).as_deref(),
                Some(expected),
                "pattern for {biomarker:?} failed on {text:?}"
            );
        }
    }

    #[test]
    fn label_and_value_must_share_a_line() {
        assert_eq!(first_capture(Biomarker::Glucose, "Glucose\n95"), None);
    }

    #[test]
    fn ignores_intervening_non_digit_text() {
        assert_eq!(
            first_capture(Biomarker::Glucose, "Glucose (Fasting)   95 mg/dL").as_deref(),
            Some("95")
        );
    }

    #[test]
    fn first_occurrence_wins() {
        let text = "Hemoglobin 14.0\nHemoglobin 9.0";
        assert_eq!(
            first_capture(Biomarker::Hemoglobin, text).as_deref(),
            Some("14.0")
        );
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(
            first_capture(Biomarker::Glucose, "GLUCOSE: 88").as_deref(),
            Some("88")
        );
    }
}
