//! Row representation of a [Dataset] for record-by-record construction
//!
//! # Example
//!
//! ```rust
//! use longplot::data::{build_dataset, DataRow};
//!
//! let rows = vec![
//!     DataRow::builder().text("USUBJID", "S1").number("AVISITN", 0.0).number("AVAL", 10.0).build(),
//!     DataRow::builder().text("USUBJID", "S1").number("AVISITN", 1.0).missing("AVAL").build(),
//!     DataRow::builder().text("USUBJID", "S2").number("AVISITN", 0.0).number("AVAL", 12.0).build(),
//! ];
//!
//! let data = build_dataset(rows).unwrap();
//! assert_eq!(data.n_rows(), 3);
//! assert_eq!(data.column("AVAL").unwrap().number(1), None);
//! ```

use crate::data::{Column, DataError, Dataset};

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

/// A format-agnostic record: ordered `(field, value)` pairs
///
/// Fields absent from a row are treated as missing when rows are assembled
/// with [`build_dataset`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    values: Vec<(String, Value)>,
}

impl DataRow {
    /// Create a new builder for constructing a DataRow
    pub fn builder() -> DataRowBuilder {
        DataRowBuilder::default()
    }

    /// Get the value of a field, if the row carries it
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.iter().find(|(f, _)| f == field).map(|(_, v)| v)
    }

    /// Field names in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(f, _)| f.as_str())
    }
}

/// Builder for constructing a DataRow with a fluent API
///
/// Setting the same field twice keeps the last value.
#[derive(Debug, Clone, Default)]
pub struct DataRowBuilder {
    row: DataRow,
}

impl DataRowBuilder {
    fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        let field = field.into();
        match self.row.values.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.row.values.push((field, value)),
        }
        self
    }

    /// Set a numeric value
    pub fn number(self, field: impl Into<String>, value: f64) -> Self {
        self.set(field, Value::Number(value))
    }

    /// Set a text value
    pub fn text(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, Value::Text(value.into()))
    }

    /// Mark a field as explicitly missing
    pub fn missing(self, field: impl Into<String>) -> Self {
        self.set(field, Value::Missing)
    }

    pub fn build(self) -> DataRow {
        self.row
    }
}

/// Build a [Dataset] from an iterator of [DataRow]s
///
/// Columns appear in first-encountered field order. A column is numeric when
/// every present value is a [`Value::Number`]; otherwise it is categorical and
/// numbers are rendered as labels.
pub fn build_dataset(rows: impl IntoIterator<Item = DataRow>) -> Result<Dataset, DataError> {
    let rows: Vec<DataRow> = rows.into_iter().collect();

    let mut fields: Vec<String> = Vec::new();
    for row in &rows {
        for field in row.fields() {
            if !fields.iter().any(|f| f == field) {
                fields.push(field.to_string());
            }
        }
    }

    let columns = fields
        .into_iter()
        .map(|field| {
            let cells: Vec<Option<&Value>> = rows
                .iter()
                .map(|row| row.get(&field).filter(|v| **v != Value::Missing))
                .collect();

            let numeric = cells
                .iter()
                .flatten()
                .all(|v| matches!(v, Value::Number(_)));

            let column = if numeric {
                Column::Numeric(
                    cells
                        .iter()
                        .map(|cell| match cell {
                            Some(Value::Number(n)) => Some(*n),
                            _ => None,
                        })
                        .collect(),
                )
            } else {
                Column::Categorical(
                    cells
                        .iter()
                        .map(|cell| match cell {
                            Some(Value::Number(n)) => Some(n.to_string()),
                            Some(Value::Text(s)) => Some(s.clone()),
                            _ => None,
                        })
                        .collect(),
                )
            };
            (field, column)
        })
        .collect();

    Dataset::new(columns)
}
