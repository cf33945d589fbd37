use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed column of a [`Dataset`](crate::data::Dataset)
///
/// Missing cells are `None` in both variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// Continuous values
    Numeric(Vec<Option<f64>>),
    /// Labels
    Categorical(Vec<Option<String>>),
}

impl Column {
    /// Number of cells, including missing ones
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Categorical(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the column holds numeric values
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Numeric(_))
    }

    /// Numeric value at `row`, `None` if missing or the column is categorical
    pub fn number(&self, row: usize) -> Option<f64> {
        match self {
            Column::Numeric(values) => values.get(row).copied().flatten(),
            Column::Categorical(_) => None,
        }
    }

    /// Value at `row` rendered as a label, `None` if missing
    ///
    /// Numbers use the `Display` form of `f64`, so `1.0` becomes `"1"`.
    pub fn label(&self, row: usize) -> Option<String> {
        match self {
            Column::Numeric(values) => values.get(row).copied().flatten().map(|v| v.to_string()),
            Column::Categorical(values) => values.get(row).cloned().flatten(),
        }
    }

    /// Value at `row` as a [`TimeValue`], `None` if missing
    pub fn time_value(&self, row: usize) -> Option<TimeValue> {
        match self {
            Column::Numeric(values) => values.get(row).copied().flatten().map(TimeValue::Numeric),
            Column::Categorical(values) => values
                .get(row)
                .cloned()
                .flatten()
                .map(TimeValue::Label),
        }
    }

    /// Whether `value` occurs in the column
    ///
    /// A numeric value matches a label whose text is its `Display` form, and
    /// a label matches a number it parses to.
    pub fn contains(&self, value: &TimeValue) -> bool {
        match self {
            Column::Numeric(values) => value
                .as_number()
                .is_some_and(|v| values.iter().flatten().any(|x| *x == v)),
            Column::Categorical(values) => {
                let label = value.to_string();
                values.iter().flatten().any(|x| *x == label)
            }
        }
    }
}

/// A timepoint value, also used to designate the baseline
///
/// Serialized untagged, so JSON consumers see either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// A continuous time (e.g. study day)
    Numeric(f64),
    /// A visit label (e.g. `"Week 4"`)
    Label(String),
}

impl TimeValue {
    /// The value as a number, parsing labels when possible
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TimeValue::Numeric(v) => Some(*v),
            TimeValue::Label(label) => label.trim().parse().ok(),
        }
    }

    /// `false` for a NaN or infinite number; labels are always finite
    pub fn is_finite(&self) -> bool {
        match self {
            TimeValue::Numeric(v) => v.is_finite(),
            TimeValue::Label(_) => true,
        }
    }

    /// Identity used to compare timepoints; numeric zero is normalized
    pub(crate) fn key(&self) -> String {
        match self {
            TimeValue::Numeric(v) if *v == 0.0 => "0".to_string(),
            _ => self.to_string(),
        }
    }

    /// Bring the value onto the same footing as a time column
    pub(crate) fn conform_to(&self, column: &Column) -> Option<TimeValue> {
        if column.is_numeric() {
            self.as_number().map(TimeValue::Numeric)
        } else {
            Some(TimeValue::Label(self.to_string()))
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Numeric(v) => write!(f, "{}", v),
            TimeValue::Label(label) => write!(f, "{}", label),
        }
    }
}

impl From<f64> for TimeValue {
    fn from(value: f64) -> Self {
        TimeValue::Numeric(value)
    }
}

impl From<i32> for TimeValue {
    fn from(value: i32) -> Self {
        TimeValue::Numeric(value as f64)
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        TimeValue::Label(value.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        TimeValue::Label(value)
    }
}
