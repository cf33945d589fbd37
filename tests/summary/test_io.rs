//! Loading data from CSV and rows, and exporting summaries

use longplot::data::parser::{from_reader, read_csv};
use longplot::data::{build_dataset, DataRow};
use longplot::formula::parse;
use longplot::summary::{compute, rows_to_csv, SummaryOptions, SummaryStatistic};

const ADVS: &str = "\
USUBJID , AVISIT , TRT01A , PARAMCD , AVAL
# Vital signs, long format
S1,Baseline,Placebo,SYSBP,120
S1,Week 2,Placebo,SYSBP,118
S2,Baseline,Placebo,SYSBP,130
S2,Week 2,Placebo,SYSBP,NA
S3,Baseline,Active,SYSBP,125
S3,Week 2,Active,SYSBP,110
S4,Baseline,Active,SYSBP,135
S4,Week 2,Active,SYSBP,121
";

#[test]
fn test_summary_from_csv() {
    let data = from_reader(ADVS.as_bytes()).unwrap();
    assert_eq!(data.n_rows(), 8);
    assert!(data.column("AVAL").unwrap().is_numeric());

    let spec = parse("AVAL ~ AVISIT | TRT01A ~ PARAMCD").unwrap();
    let rows = compute(&data, &spec, "USUBJID", "Baseline", &SummaryOptions::default()).unwrap();
    assert_eq!(rows.len(), 4);

    let placebo_week2 = &rows[1];
    assert_eq!(placebo_week2.group.to_string(), "Placebo");
    assert_eq!(placebo_week2.facet.to_string(), "SYSBP");
    assert_eq!(placebo_week2.observed.n, 1);
    assert_eq!(placebo_week2.observed.center, 118.0);
    assert_eq!(placebo_week2.change.as_ref().unwrap().center, -2.0);

    let active_week2 = &rows[3];
    assert_eq!(active_week2.observed.center, 115.5);
    assert_eq!(active_week2.change.as_ref().unwrap().center, -14.5);
}

#[test]
fn test_csv_nan_and_infinity_are_missing() {
    let text = "id,t,y\na,0,1\nb,0,2\nc,0,3\nd,0,4\na,1,4\nb,1,-nan\nc,1,6\nd,1,inf\n";
    let data = from_reader(text.as_bytes()).unwrap();
    assert!(data.column("y").unwrap().is_numeric());
    let spec = parse("y ~ t").unwrap();

    for statistic in [
        SummaryStatistic::Mean,
        SummaryStatistic::MeanSe,
        SummaryStatistic::Median,
        SummaryStatistic::Boxplot,
    ] {
        let rows = compute(&data, &spec, "id", 0, &SummaryOptions::new(statistic)).unwrap();
        let times: Vec<String> = rows.iter().map(|r| r.time.to_string()).collect();
        assert_eq!(times, vec!["0", "1"], "{statistic:?}");
        assert_eq!(rows[1].observed.n, 2);
        assert_eq!(rows[1].observed.center, 5.0);
        assert_eq!(rows[1].change.as_ref().unwrap().center, 3.0);
    }
}

#[test]
fn test_read_csv_file() {
    let path = std::env::temp_dir().join(format!("longplot-{}.csv", std::process::id()));
    std::fs::write(&path, ADVS).unwrap();
    let data = read_csv(&path);
    std::fs::remove_file(&path).unwrap();

    let data = data.unwrap();
    assert_eq!(data.names(), &["USUBJID", "AVISIT", "TRT01A", "PARAMCD", "AVAL"]);
}

#[test]
fn test_summary_from_rows() {
    let rows = vec![
        DataRow::builder().text("id", "a").number("week", 0.0).number("score", 4.0).build(),
        DataRow::builder().text("id", "a").number("week", 2.0).number("score", 7.0).build(),
        DataRow::builder().text("id", "b").number("week", 0.0).number("score", 6.0).build(),
        DataRow::builder().text("id", "b").number("week", 2.0).build(),
    ];
    let data = build_dataset(rows).unwrap();

    let spec = parse("score ~ week").unwrap();
    let summary = compute(&data, &spec, "id", 0, &SummaryOptions::default()).unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].observed.center, 5.0);
    assert_eq!(summary[1].observed.n, 1);
    assert_eq!(summary[1].change.as_ref().unwrap().center, 3.0);
}

#[test]
fn test_rows_to_csv_from_summary() {
    let data = from_reader(ADVS.as_bytes()).unwrap();
    let spec = parse("AVAL ~ AVISIT | TRT01A").unwrap();
    let rows = compute(&data, &spec, "USUBJID", "Baseline", &SummaryOptions::default()).unwrap();

    let csv = rows_to_csv(&rows).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), rows.len() + 1);
    assert!(lines[1].starts_with("all,Placebo,Baseline,0,false,2,125,"));
    // Every line has the same number of fields
    let width = lines[0].split(',').count();
    assert!(lines.iter().all(|l| l.split(',').count() == width));
}
