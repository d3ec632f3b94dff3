//! Integration tests for the biomarker analyzer over the sample report.

use medreport::analyze::{Biomarker, Sex, Status, analyze_report, analyze_text};

const SAMPLE_REPORT: &str = include_str!("fixtures/sample_report.txt");

#[test]
fn extracts_all_four_biomarkers_with_expected_values() {
    let analysis = analyze_report(SAMPLE_REPORT, None);
    assert_eq!(analysis.results.len(), 4);

    let expected = [
        (Biomarker::Hemoglobin, 12.1, Status::Abnormal),
        (Biomarker::WbcCount, 9.2, Status::Normal),
        (Biomarker::PlateletCount, 120.0, Status::Abnormal),
        (Biomarker::Glucose, 95.0, Status::Normal),
    ];

    for ((biomarker, value, status), result) in expected.iter().zip(&analysis.results) {
        assert_eq!(result.biomarker, *biomarker);
        assert_eq!(result.value, *value);
        assert_eq!(result.status, *status);
    }
}

#[test]
fn reads_the_report_header() {
    let analysis = analyze_report(SAMPLE_REPORT, None);
    assert_eq!(
        analysis.metadata.patient_name.as_deref(),
        Some("John Doe")
    );
    assert_eq!(
        analysis.metadata.lab_name.as_deref(),
        Some("City Diagnostics Pathology Lab")
    );
    assert_eq!(analysis.metadata.age, Some(45));
    assert_eq!(analysis.metadata.sex, Some(Sex::Male));
    assert_eq!(analysis.sex_used, Sex::Male);
}

#[test]
fn female_override_changes_the_hemoglobin_flag() {
    let analysis = analyze_report(SAMPLE_REPORT, Some(Sex::Female));
    assert_eq!(analysis.sex_used, Sex::Female);

    let hemoglobin = analysis
        .results
        .iter()
        .find(|r| r.biomarker == Biomarker::Hemoglobin)
        .unwrap();
    // 12.1 g/dL is inside the female range, below the male one
    assert_eq!(hemoglobin.status, Status::Normal);
}

#[test]
fn reference_strings_match_the_applied_ranges() {
    let results = analyze_text(SAMPLE_REPORT, Sex::Male);
    let by_marker = |marker| {
        results
            .iter()
            .find(|r| r.biomarker == marker)
            .unwrap()
            .reference
            .clone()
    };
    assert_eq!(by_marker(Biomarker::Hemoglobin), "13.5 - 17.5");
    assert_eq!(by_marker(Biomarker::WbcCount), "4.5 - 11.0");
    assert_eq!(by_marker(Biomarker::PlateletCount), "150 - 450");
    assert_eq!(by_marker(Biomarker::Glucose), "70 - 100");
}
