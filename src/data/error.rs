use thiserror::Error;

/// Errors raised while building or reading a [`Dataset`](crate::data::Dataset)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Error encountered when reading CSV data
    #[error("CSV error: {0}")]
    Csv(String),
    /// A column does not have as many cells as the others
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    /// Two columns share a name
    #[error("Duplicate column '{name}'")]
    DuplicateColumn { name: String },
    /// The input has no header row
    #[error("No columns found")]
    Empty,
}
