//! Behavioural guarantees of the statistics engine

use approx::assert_relative_eq;
use longplot::data::{Dataset, TimeValue};
use longplot::formula::parse;
use longplot::summary::{compute, SummaryError, SummaryOptions, SummaryStatistic};

/// Three subjects, days 0/1/2, each rising by 3 per visit
fn three_subjects() -> Dataset {
    Dataset::builder()
        .categorical("USUBJID", ["S1", "S1", "S1", "S2", "S2", "S2", "S3", "S3", "S3"])
        .numeric("ADY", [0.0, 1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 2.0])
        .numeric("AVAL", [9.0, 12.0, 15.0, 10.0, 13.0, 16.0, 11.0, 14.0, 17.0])
        .build()
        .unwrap()
}

#[test]
fn test_change_is_zero_at_baseline() {
    let spec = parse("AVAL ~ ADY").unwrap();
    for statistic in [
        SummaryStatistic::Mean,
        SummaryStatistic::MeanSe,
        SummaryStatistic::Median,
        SummaryStatistic::Boxplot,
    ] {
        let rows = compute(&three_subjects(), &spec, "USUBJID", 0, &SummaryOptions::new(statistic)).unwrap();
        let baseline = rows.iter().find(|r| r.time == TimeValue::Numeric(0.0)).unwrap();
        let change = baseline.change.as_ref().unwrap();
        assert_eq!(change.center, 0.0, "{statistic}");
        assert_eq!(change.n, 3);
    }
}

#[test]
fn test_single_subject_round_trip() {
    let data = Dataset::builder()
        .categorical("id", ["only", "only", "only"])
        .numeric("t", [0.0, 1.0, 2.0])
        .numeric("y", [50.0, 55.0, 60.0])
        .build()
        .unwrap();
    let spec = parse("y ~ t").unwrap();
    let rows = compute(&data, &spec, "id", 0, &SummaryOptions::default()).unwrap();

    let observed: Vec<f64> = rows.iter().map(|r| r.observed.center).collect();
    let change: Vec<f64> = rows.iter().map(|r| r.change.as_ref().unwrap().center).collect();
    assert_eq!(observed, vec![50.0, 55.0, 60.0]);
    assert_eq!(change, vec![0.0, 5.0, 10.0]);

    for row in &rows {
        assert_eq!(row.observed.n, 1);
        // Insufficient data for a spread
        assert_eq!(row.observed.spread, None);
        assert_eq!(row.observed.bounds(), None);
    }
}

#[test]
fn test_missing_fields_are_reported_together() {
    let data = Dataset::builder()
        .numeric("AVISITN", [0.0, 1.0])
        .categorical("TRT01A", ["A", "B"])
        .build()
        .unwrap();
    let spec = parse("AVAL ~ AVISITN | TRT01A").unwrap();
    let err = compute(&data, &spec, "USUBJID", 0, &SummaryOptions::default()).unwrap_err();

    assert_eq!(
        err,
        SummaryError::MissingFields {
            fields: vec!["AVAL".to_string(), "USUBJID".to_string()]
        }
    );
    let message = err.to_string();
    assert!(message.contains("AVAL"));
    assert!(message.contains("USUBJID"));
}

#[test]
fn test_baseline_not_found() {
    let data = Dataset::builder()
        .categorical("id", ["a", "a", "a", "a"])
        .numeric("AVISITN", [0.0, 1.0, 2.0, 3.0])
        .numeric("y", [1.0, 2.0, 3.0, 4.0])
        .build()
        .unwrap();
    let spec = parse("y ~ AVISITN").unwrap();
    let err = compute(&data, &spec, "id", 999, &SummaryOptions::default()).unwrap_err();

    assert!(matches!(err, SummaryError::BaselineNotFound { .. }));
    let message = err.to_string();
    assert!(message.contains("999"));
    assert!(message.contains("AVISITN"));
}

#[test]
fn test_statistic_does_not_change_row_count() {
    let spec = parse("AVAL ~ ADY").unwrap();
    let mean = compute(&three_subjects(), &spec, "USUBJID", 0, &SummaryOptions::new(SummaryStatistic::Mean)).unwrap();
    let median = compute(&three_subjects(), &spec, "USUBJID", 0, &SummaryOptions::new(SummaryStatistic::Median)).unwrap();
    assert_eq!(mean.len(), median.len());
    for (a, b) in mean.iter().zip(&median) {
        assert_eq!(a.time, b.time);
        assert_eq!(a.group, b.group);
    }
}

#[test]
fn test_categorical_time_order() {
    let data = Dataset::builder()
        .categorical("id", ["a", "a", "a", "b", "b", "b"])
        .categorical("AVISIT", ["Week 8", "Baseline", "Week 4", "Week 8", "Baseline", "Week 4"])
        .numeric("y", [3.0, 1.0, 2.0, 6.0, 2.0, 4.0])
        .build()
        .unwrap();
    let spec = parse("y ~ AVISIT").unwrap();
    let rows = compute(&data, &spec, "id", "Baseline", &SummaryOptions::default()).unwrap();

    let times: Vec<String> = rows.iter().map(|r| r.time.to_string()).collect();
    assert_eq!(times, vec!["Baseline", "Week 4", "Week 8"]);
    assert_eq!(
        rows.iter().map(|r| r.time_index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert!(rows.iter().all(|r| !r.continuous));
}

#[test]
fn test_categorical_time_order_ignores_row_order() {
    let orders = [
        ["Week 8", "Baseline", "Week 4"],
        ["Week 4", "Week 8", "Baseline"],
        ["Baseline", "Week 8", "Week 4"],
    ];
    let spec = parse("y ~ AVISIT").unwrap();
    for visits in orders {
        let data = Dataset::builder()
            .categorical("id", ["a", "a", "a"])
            .categorical("AVISIT", visits)
            .numeric("y", [1.0, 2.0, 3.0])
            .build()
            .unwrap();
        for _ in 0..2 {
            let rows = compute(&data, &spec, "id", "Baseline", &SummaryOptions::default()).unwrap();
            let times: Vec<String> = rows.iter().map(|r| r.time.to_string()).collect();
            assert_eq!(times, vec!["Baseline", "Week 4", "Week 8"], "{visits:?}");
        }
    }
}

#[test]
fn test_groups_are_isolated() {
    let data = Dataset::builder()
        .categorical("id", ["a1", "a1", "a2", "a2", "b1", "b1", "b2", "b2"])
        .numeric("t", [0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0])
        .categorical("arm", ["A", "A", "A", "A", "B", "B", "B", "B"])
        .numeric("y", [1.0, 2.0, 3.0, 5.0, 100.0, 150.0, 200.0, 260.0])
        .build()
        .unwrap();
    let spec = parse("y ~ t | arm").unwrap();
    let both = compute(&data, &spec, "id", 0, &SummaryOptions::default()).unwrap();

    let only_b = data.filter_rows(|row| row >= 4);
    let alone = compute(&only_b, &spec, "id", 0, &SummaryOptions::default()).unwrap();

    let b_rows: Vec<_> = both.into_iter().filter(|r| r.group.to_string() == "B").collect();
    assert_eq!(b_rows, alone);
}

#[test]
fn test_end_to_end_three_subjects() {
    let spec = parse("AVAL ~ ADY").unwrap();
    let rows = compute(&three_subjects(), &spec, "USUBJID", 0, &SummaryOptions::default()).unwrap();

    assert_eq!(rows.len(), 3);
    let expected = [(10.0, 0.0), (13.0, 3.0), (16.0, 6.0)];
    for (row, (observed, change)) in rows.iter().zip(expected) {
        assert_relative_eq!(row.observed.center, observed, epsilon = 1e-12);
        assert_relative_eq!(row.observed.spread.unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(row.observed.n, 3);

        let delta = row.change.as_ref().unwrap();
        assert_relative_eq!(delta.center, change, epsilon = 1e-12);
        assert_eq!(delta.spread, Some(0.0));
        assert_eq!(delta.n, 3);
    }
    assert!(rows.iter().all(|r| r.continuous));
}
