use super::error::SummaryError;
use super::types::{SummaryRow, ViewStats};

pub(crate) const HEADER: [&str; 21] = [
    "facet",
    "group",
    "time",
    "time_index",
    "continuous",
    "n",
    "center",
    "spread",
    "standard_error",
    "lower",
    "upper",
    "q25",
    "q75",
    "change_n",
    "change_center",
    "change_spread",
    "change_standard_error",
    "change_lower",
    "change_upper",
    "change_q25",
    "change_q75",
];

/// Write summary rows as CSV
///
/// One line per row; undefined values are left empty. Facet and group keys
/// use their display form (`all` when empty).
///
/// # Example
///
/// ```rust,ignore
/// let csv = longplot::summary::rows_to_csv(&rows)?;
/// std::fs::write("summary.csv", csv)?;
/// ```
pub fn rows_to_csv(rows: &[SummaryRow]) -> Result<String, SummaryError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| SummaryError::Export(e.to_string()))?;

    for row in rows {
        writer
            .write_record(row_fields(row))
            .map_err(|e| SummaryError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SummaryError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| SummaryError::Export(e.to_string()))
}

/// The CSV fields of one row, in [`HEADER`] order
pub(crate) fn row_fields(row: &SummaryRow) -> Vec<String> {
    let mut record: Vec<String> = vec![
        row.facet.to_string(),
        row.group.to_string(),
        row.time.to_string(),
        row.time_index.to_string(),
        row.continuous.to_string(),
    ];
    record.extend(view_fields(Some(&row.observed)));
    record.extend(view_fields(row.change.as_ref()));
    record
}

fn view_fields(view: Option<&ViewStats>) -> [String; 8] {
    let opt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    match view {
        Some(v) => [
            v.n.to_string(),
            v.center.to_string(),
            opt(v.spread),
            opt(v.standard_error),
            opt(v.lower),
            opt(v.upper),
            opt(v.q25),
            opt(v.q75),
        ],
        None => [
            "0".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ],
    }
}
