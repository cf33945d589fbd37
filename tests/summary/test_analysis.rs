//! End-to-end analysis with group comparisons

use approx::assert_relative_eq;
use longplot::prelude::*;

fn trial() -> Dataset {
    Dataset::builder()
        .categorical("USUBJID", ["P1", "P2", "A1", "A2", "P1", "P2", "A1", "A2"])
        .categorical(
            "AVISIT",
            ["Baseline", "Baseline", "Baseline", "Baseline", "Week 4", "Week 4", "Week 4", "Week 4"],
        )
        .categorical(
            "TRT01A",
            ["Placebo", "Placebo", "Active", "Active", "Placebo", "Placebo", "Active", "Active"],
        )
        .numeric("AVAL", [-1.0, 1.0, 1.0, 3.0, 10.0, 12.0, 30.0, 32.0])
        .build()
        .unwrap()
}

#[test]
fn test_clinical_analysis() {
    let analysis = analyze(
        &trial(),
        "AVAL ~ AVISIT | TRT01A",
        "USUBJID",
        "Baseline",
        &AnalysisOptions::clinical(),
    )
    .unwrap();

    assert_eq!(analysis.spec.groups(), &["TRT01A"]);
    assert_eq!(analysis.time_levels.len(), 2);
    assert_eq!(analysis.rows.len(), 4);

    let week4: Vec<&AnnotatedRow> = analysis
        .rows
        .iter()
        .filter(|r| r.row.time == TimeValue::from("Week 4"))
        .collect();
    assert_eq!(week4.len(), 2);
    for row in week4 {
        assert_eq!(row.test, Some(TestKind::WelchT));
        // Two tests: the week 4 p-value is doubled by the adjustment
        assert_relative_eq!(
            row.adjusted_p_value.unwrap(),
            2.0 * row.p_value.unwrap(),
            epsilon = 1e-12
        );
        assert_eq!(row.significance, Significance::High);
    }
}

#[test]
fn test_annotate_directly() {
    let data = trial();
    let spec = parse("AVAL ~ AVISIT | TRT01A").unwrap();
    let rows = compute(&data, &spec, "USUBJID", "Baseline", &SummaryOptions::default()).unwrap();
    let annotated = annotate(rows.clone(), &data, &spec, "USUBJID").unwrap();

    assert_eq!(annotated.len(), rows.len());
    for (a, r) in annotated.iter().zip(&rows) {
        assert_eq!(&a.row, r);
    }
}

#[test]
fn test_exploratory_analysis_has_no_tests() {
    let analysis = analyze(
        &trial(),
        "AVAL ~ AVISIT | TRT01A",
        "USUBJID",
        "Baseline",
        &AnalysisOptions::exploratory(),
    )
    .unwrap();
    assert!(analysis.rows.iter().all(|r| r.test.is_none()));
    assert!(analysis.rows.iter().all(|r| r.row.observed.q25.is_some()));
}

#[test]
fn test_errors_convert_to_crate_error() {
    let err = analyze(&trial(), "AVAL ~ VISIT", "USUBJID", "Baseline", &AnalysisOptions::default())
        .unwrap_err();
    assert!(matches!(err, LongplotError::SummaryError(_)));
    assert!(err.to_string().contains("VISIT"));
}

#[test]
fn test_json_output() {
    let analysis = analyze(
        &trial(),
        "AVAL ~ AVISIT | TRT01A",
        "USUBJID",
        "Baseline",
        &AnalysisOptions::clinical(),
    )
    .unwrap();
    let json = analysis.to_json().unwrap();
    let back: Analysis = serde_json::from_str(&json).unwrap();
    assert_eq!(back.rows.len(), analysis.rows.len());
    assert_eq!(back.time_levels, analysis.time_levels);
}
