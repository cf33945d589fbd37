use crate::data::{Column, DataError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A long-format table of named, typed columns
///
/// Every column has the same number of rows and names are unique. A [Dataset]
/// is never modified in place: methods that change it return a new one.
///
/// # Examples
///
/// ```
/// use longplot::data::Dataset;
///
/// let data = Dataset::builder()
///     .categorical("USUBJID", ["S1", "S1", "S2", "S2"])
///     .numeric("AVISITN", [0.0, 1.0, 0.0, 1.0])
///     .numeric("AVAL", [10.0, 12.0, 11.0, 15.0])
///     .build()
///     .unwrap();
///
/// assert_eq!(data.n_rows(), 4);
/// assert!(data.column("AVAL").unwrap().is_numeric());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Construct a dataset from `(name, column)` pairs
    ///
    /// # Errors
    ///
    /// [`DataError::DuplicateColumn`] if two columns share a name,
    /// [`DataError::LengthMismatch`] if the columns differ in length.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self, DataError> {
        let n_rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut names: Vec<String> = Vec::with_capacity(columns.len());
        let mut cols: Vec<Column> = Vec::with_capacity(columns.len());

        for (name, column) in columns {
            if names.contains(&name) {
                return Err(DataError::DuplicateColumn { name });
            }
            if column.len() != n_rows {
                return Err(DataError::LengthMismatch {
                    column: name,
                    expected: n_rows,
                    found: column.len(),
                });
            }
            names.push(name);
            cols.push(column);
        }

        Ok(Dataset {
            names,
            columns: cols,
            n_rows,
        })
    }

    /// Start building a dataset column by column
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Column names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Names from `fields` that are not columns of this dataset
    ///
    /// Reported in the order given, each name once.
    pub fn missing_fields<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for field in fields {
            if !self.has_column(field) && !missing.iter().any(|m| m == field) {
                missing.push(field.to_string());
            }
        }
        missing
    }

    /// Return a copy with `name` replaced by (or extended with) `column`
    pub fn with_column(&self, name: impl Into<String>, column: Column) -> Result<Dataset, DataError> {
        let name = name.into();
        let mut columns: Vec<(String, Column)> = self
            .names
            .iter()
            .cloned()
            .zip(self.columns.iter().cloned())
            .collect();
        match columns.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = column,
            None => columns.push((name, column)),
        }
        Dataset::new(columns)
    }

    /// Return a copy keeping only the rows for which `keep` returns true
    pub fn filter_rows(&self, keep: impl Fn(usize) -> bool) -> Dataset {
        let rows: Vec<usize> = (0..self.n_rows).filter(|&i| keep(i)).collect();
        let columns = self
            .columns
            .iter()
            .map(|column| match column {
                Column::Numeric(values) => Column::Numeric(rows.iter().map(|&i| values[i]).collect()),
                Column::Categorical(values) => {
                    Column::Categorical(rows.iter().map(|&i| values[i].clone()).collect())
                }
            })
            .collect();
        Dataset {
            names: self.names.clone(),
            columns,
            n_rows: rows.len(),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Dataset: {} rows x {} columns", self.n_rows, self.names.len())?;
        for (name, column) in self.names.iter().zip(&self.columns) {
            let kind = if column.is_numeric() { "numeric" } else { "categorical" };
            writeln!(f, "  {name}: {kind}")?;
        }
        Ok(())
    }
}

/// Builder for constructing a [Dataset] with a fluent API
///
/// Errors (duplicate names, uneven lengths) surface in [`DatasetBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    columns: Vec<(String, Column)>,
}

impl DatasetBuilder {
    /// Add a fully observed numeric column
    pub fn numeric(mut self, name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let values = values.into_iter().map(Some).collect();
        self.columns.push((name.into(), Column::Numeric(values)));
        self
    }

    /// Add a numeric column with missing cells
    pub fn numeric_opt(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<f64>>,
    ) -> Self {
        self.columns
            .push((name.into(), Column::Numeric(values.into_iter().collect())));
        self
    }

    /// Add a fully observed categorical column
    pub fn categorical<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        let values = values.into_iter().map(|v| Some(v.into())).collect();
        self.columns.push((name.into(), Column::Categorical(values)));
        self
    }

    /// Add a categorical column with missing cells
    pub fn categorical_opt<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        self.columns.push((name.into(), Column::Categorical(values)));
        self
    }

    /// Add an already built column
    pub fn column(mut self, name: impl Into<String>, column: Column) -> Self {
        self.columns.push((name.into(), column));
        self
    }

    pub fn build(self) -> Result<Dataset, DataError> {
        Dataset::new(self.columns)
    }
}
