//! Summary types: options, cell keys and output rows

use super::error::SummaryError;
use crate::data::TimeValue;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// ============================================================================
// Configuration Types
// ============================================================================

/// Which center/spread pair is computed for every cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SummaryStatistic {
    /// Mean and SD; bounds are mean ± SE, or a t-interval when a confidence
    /// level is set
    Mean,
    /// Mean and SD; bounds are always mean ± SE
    #[default]
    MeanSe,
    /// Median and IQR; bounds are the quartiles, or the approximate
    /// `median ± 1.57·IQR/√n` interval when a confidence level is set
    Median,
    /// Median and IQR; bounds are the 1.5·IQR whiskers clipped to the data
    Boxplot,
}

impl SummaryStatistic {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStatistic::Mean => "mean",
            SummaryStatistic::MeanSe => "mean_se",
            SummaryStatistic::Median => "median",
            SummaryStatistic::Boxplot => "boxplot",
        }
    }
}

impl FromStr for SummaryStatistic {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(SummaryStatistic::Mean),
            "mean_se" => Ok(SummaryStatistic::MeanSe),
            "median" => Ok(SummaryStatistic::Median),
            "boxplot" => Ok(SummaryStatistic::Boxplot),
            _ => Err(SummaryError::InvalidSummaryStatistic {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for SummaryStatistic {
    type Error = SummaryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SummaryStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`compute`](super::compute)
///
/// Change from baseline is always computed per subject; there is no switch
/// for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Summary statistic (default: `MeanSe`)
    pub statistic: SummaryStatistic,

    /// Confidence level in (0, 1) for interval bounds (default: None)
    ///
    /// Only `Mean` (t-interval) and `Median` (normal approximation) use it.
    #[serde(default)]
    pub confidence_level: Option<f64>,
}

impl SummaryOptions {
    pub fn new(statistic: SummaryStatistic) -> Self {
        Self {
            statistic,
            confidence_level: None,
        }
    }

    /// Options for a statistic given by name (`mean`, `mean_se`, `median`, `boxplot`)
    pub fn parse(statistic: &str) -> Result<Self, SummaryError> {
        Ok(Self::new(statistic.parse()?))
    }

    /// Set the summary statistic
    pub fn with_statistic(mut self, statistic: SummaryStatistic) -> Self {
        self.statistic = statistic;
        self
    }

    /// Set the confidence level used for interval bounds
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = Some(level);
        self
    }

    /// Check the options before any data is touched
    pub fn validate(&self) -> Result<(), SummaryError> {
        match self.confidence_level {
            Some(level) if !(level > 0.0 && level < 1.0) => {
                Err(SummaryError::InvalidConfidenceLevel { level })
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Cell keys
// ============================================================================

/// The labels of the grouping (or facet) variables for one cell
///
/// Empty when the formula names no such variables; it then displays as the
/// single implicit group `all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("all")
        } else {
            f.write_str(&self.0.join(":"))
        }
    }
}

impl<S: Into<String>> FromIterator<S> for GroupKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        GroupKey(iter.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Output
// ============================================================================

/// Statistics of one series (observed values or change from baseline) in one cell
///
/// Undefined quantities are `None`, never NaN. With fewer than two values the
/// standard deviation, standard error and mean-based bounds are `None`
/// (insufficient data). `lower` and `upper` are either both set or both unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewStats {
    /// Mean or median
    pub center: f64,
    /// Standard deviation (mean statistics) or IQR (median statistics)
    pub spread: Option<f64>,
    /// Standard error of the mean (mean statistics only)
    pub standard_error: Option<f64>,
    /// Lower bound of the uncertainty band
    pub lower: Option<f64>,
    /// Upper bound of the uncertainty band
    pub upper: Option<f64>,
    /// 25th percentile (median statistics only)
    ///
    /// Quartiles use the median-unbiased definition (Hyndman and Fan type 8).
    /// R's `quantile()` defaults to type 7, so small cells can differ from R.
    pub q25: Option<f64>,
    /// 75th percentile (median statistics only), same definition as `q25`
    pub q75: Option<f64>,
    /// Number of non-missing values
    pub n: usize,
}

impl ViewStats {
    /// Bounds as a pair, if computable
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.lower.zip(self.upper)
    }
}

/// One (facet, group, timepoint) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Facet labels (empty without facets)
    pub facet: GroupKey,
    /// Group labels (empty without groups)
    pub group: GroupKey,
    /// Timepoint
    pub time: TimeValue,
    /// Position of `time` in the canonical time ordering
    pub time_index: usize,
    /// Whether the time axis is continuous (numeric) rather than categorical
    pub continuous: bool,
    /// Statistics of the observed outcome
    pub observed: ViewStats,
    /// Statistics of the change from baseline; None when no subject in the
    /// cell has a baseline observation
    pub change: Option<ViewStats>,
}
