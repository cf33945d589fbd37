use crate::data::{Column, DataError, Dataset};
use std::io::Read;
use std::path::Path;

/// Cell contents treated as missing (compared case-insensitively)
const MISSING_TOKENS: [&str; 4] = ["", "na", "nan", "."];

/// Read a long-format CSV file into a [Dataset]
///
/// The file must have a header row. Lines starting with `#` are skipped and
/// header names are trimmed. A column is numeric when every non-missing cell
/// parses as a number; otherwise it is categorical.
///
/// # Example
///
/// ```rust,no_run
/// use longplot::data::parser::read_csv;
///
/// let data = read_csv("path/to/adlb.csv").unwrap();
/// println!("{}", data);
/// ```
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, DataError> {
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())
        .map_err(|e| DataError::Csv(e.to_string()))?;
    collect(reader)
}

/// Read long-format CSV data from any reader
///
/// See [`read_csv`] for the format rules.
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, DataError> {
    let reader = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    collect(reader)
}

fn collect<R: Read>(mut reader: csv::Reader<R>) -> Result<Dataset, DataError> {
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(DataError::Empty);
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| DataError::Csv(e.to_string()))?;
        for (i, column) in cells.iter_mut().enumerate() {
            let cell = record.get(i).filter(|c| !is_missing(c));
            column.push(cell.map(str::to_string));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, values)| (name, infer_column(values)))
        .collect();

    Dataset::new(columns)
}

fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS
        .iter()
        .any(|token| cell.eq_ignore_ascii_case(token))
}

fn infer_column(values: Vec<Option<String>>) -> Column {
    let parsed: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|cell| match cell {
            // `inf` or `-nan` still make the column numeric, as missing cells
            Some(text) => text
                .parse::<f64>()
                .ok()
                .map(|v| Some(v).filter(|v| v.is_finite())),
            None => Some(None),
        })
        .collect();

    match parsed {
        Some(numbers) => Column::Numeric(numbers),
        None => Column::Categorical(values),
    }
}
