use crate::summary::SummaryRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The between-group test used at a timepoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// Two usable groups
    WelchT,
    /// Three or more usable groups
    Anova,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::WelchT => write!(f, "welch_t"),
            TestKind::Anova => write!(f, "anova"),
        }
    }
}

/// Significance marker for an adjusted p-value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Significance {
    /// p < 0.001
    #[serde(rename = "***")]
    VeryHigh,
    /// p < 0.01
    #[serde(rename = "**")]
    High,
    /// p < 0.05
    #[serde(rename = "*")]
    Significant,
    #[serde(rename = "ns")]
    NotSignificant,
    /// No test could be run
    #[default]
    #[serde(rename = "")]
    Undefined,
}

impl Significance {
    pub fn from_p(p: Option<f64>) -> Self {
        match p {
            Some(p) if p < 0.001 => Significance::VeryHigh,
            Some(p) if p < 0.01 => Significance::High,
            Some(p) if p < 0.05 => Significance::Significant,
            Some(_) => Significance::NotSignificant,
            None => Significance::Undefined,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Significance::VeryHigh => "***",
            Significance::High => "**",
            Significance::Significant => "*",
            Significance::NotSignificant => "ns",
            Significance::Undefined => "",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// A summary row with the result of the between-group test at its timepoint
///
/// All rows of one (facet, timepoint) share the same test result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRow {
    #[serde(flatten)]
    pub row: SummaryRow,
    pub test: Option<TestKind>,
    pub p_value: Option<f64>,
    /// Benjamini–Hochberg adjusted p-value
    pub adjusted_p_value: Option<f64>,
    pub significance: Significance,
}

impl AnnotatedRow {
    /// Wrap a row without a test result
    pub fn untested(row: SummaryRow) -> Self {
        AnnotatedRow {
            row,
            test: None,
            p_value: None,
            adjusted_p_value: None,
            significance: Significance::Undefined,
        }
    }
}

impl From<SummaryRow> for AnnotatedRow {
    fn from(row: SummaryRow) -> Self {
        AnnotatedRow::untested(row)
    }
}
