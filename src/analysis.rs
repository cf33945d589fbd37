//! One-call analysis: formula text in, annotated summary table out
//!
//! [`analyze`] parses the formula, computes the per-timepoint summary and,
//! when requested and the design allows it, runs the between-group tests.
//! The resulting [`Analysis`] is what a rendering layer consumes, either
//! directly or through [`Analysis::to_json`] / [`Analysis::to_csv`].
//!
//! # Example
//!
//! ```rust
//! use longplot::analysis::{analyze, AnalysisOptions};
//! use longplot::data::Dataset;
//!
//! let data = Dataset::builder()
//!     .categorical("USUBJID", ["S1", "S1", "S2", "S2", "S3", "S3", "S4", "S4"])
//!     .categorical("AVISIT", ["Baseline", "Week 4", "Baseline", "Week 4",
//!                             "Baseline", "Week 4", "Baseline", "Week 4"])
//!     .categorical("TRT01P", ["A", "A", "A", "A", "B", "B", "B", "B"])
//!     .numeric("AVAL", [10.0, 12.0, 11.0, 14.0, 10.0, 20.0, 12.0, 23.0])
//!     .build()
//!     .unwrap();
//!
//! let analysis = analyze(
//!     &data,
//!     "AVAL ~ AVISIT | TRT01P",
//!     "USUBJID",
//!     "Baseline",
//!     &AnalysisOptions::clinical(),
//! )
//! .unwrap();
//!
//! assert_eq!(analysis.rows.len(), 4);
//! assert!(analysis.rows.iter().all(|r| r.p_value.is_some()));
//! ```

use crate::compare::{annotate, AnnotatedRow};
use crate::data::{Dataset, TimeValue};
use crate::error::LongplotError;
use crate::formula::{parse, FormulaSpec};
use crate::summary::{
    row_fields, summarize_frame, time_levels, LongitudinalFrame, SummaryOptions,
    SummaryStatistic, SummaryError, HEADER,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Configuration
// ============================================================================

/// Options for [`analyze`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Statistic and confidence level of the summary
    #[serde(default)]
    pub summary: SummaryOptions,

    /// Run between-group tests (default: false)
    ///
    /// Tests need exactly one group field; with none or several they are
    /// skipped.
    #[serde(default)]
    pub compare: bool,
}

impl AnalysisOptions {
    /// Mean with a 95% t-interval and between-group tests
    pub fn clinical() -> Self {
        Self {
            summary: SummaryOptions::new(SummaryStatistic::Mean).with_confidence_level(0.95),
            compare: true,
        }
    }

    /// Box plot statistics, no tests
    pub fn exploratory() -> Self {
        Self {
            summary: SummaryOptions::new(SummaryStatistic::Boxplot),
            compare: false,
        }
    }

    /// Set the summary options
    pub fn with_summary(mut self, summary: SummaryOptions) -> Self {
        self.summary = summary;
        self
    }

    /// Set the summary statistic
    pub fn with_statistic(mut self, statistic: SummaryStatistic) -> Self {
        self.summary.statistic = statistic;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.summary.confidence_level = Some(level);
        self
    }

    /// Enable or disable between-group tests
    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }
}

// ============================================================================
// Result
// ============================================================================

/// Result of [`analyze`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub spec: FormulaSpec,
    /// Timepoints in canonical order; `time_index` of a row points here
    pub time_levels: Vec<TimeValue>,
    /// Whether the time axis is numeric
    pub continuous: bool,
    pub rows: Vec<AnnotatedRow>,
}

impl Analysis {
    /// Serialize the analysis as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, LongplotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The rows as CSV: the summary columns followed by the test columns
    pub fn to_csv(&self) -> Result<String, LongplotError> {
        let export = |e: csv::Error| SummaryError::Export(e.to_string());

        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        let mut header: Vec<&str> = HEADER.to_vec();
        header.extend(["test", "p_value", "adjusted_p_value", "significance"]);
        writer.write_record(&header).map_err(export)?;

        for row in &self.rows {
            let mut record = row_fields(&row.row);
            record.push(row.test.map(|t| t.to_string()).unwrap_or_default());
            record.push(row.p_value.map(|p| p.to_string()).unwrap_or_default());
            record.push(
                row.adjusted_p_value
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
            );
            record.push(row.significance.to_string());
            writer.write_record(&record).map_err(export)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| SummaryError::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| SummaryError::Export(e.to_string()).into())
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Parse `formula`, summarize `data` and optionally compare groups
///
/// # Errors
///
/// Any [`FormulaError`](crate::formula::FormulaError) or
/// [`SummaryError`] wrapped in [`LongplotError`]. Comparison never fails
/// because of the design: with other than one group field it is skipped.
pub fn analyze(
    data: &Dataset,
    formula: &str,
    cluster_key: &str,
    baseline: impl Into<TimeValue>,
    options: &AnalysisOptions,
) -> Result<Analysis, LongplotError> {
    let spec = parse(formula)?;
    options.summary.validate()?;
    let frame = LongitudinalFrame::bind(data, &spec, cluster_key, &baseline.into())?;

    tracing::debug!(
        formula = %spec,
        statistic = %options.summary.statistic,
        compare = options.compare,
        "Running analysis"
    );

    let summary = summarize_frame(&frame, &options.summary);

    let rows = if options.compare && spec.groups().len() == 1 {
        annotate(summary, data, &spec, cluster_key)?
    } else {
        if options.compare {
            tracing::info!(
                groups = spec.groups().len(),
                "Skipping group comparison: it needs exactly one group field"
            );
        }
        summary.into_iter().map(AnnotatedRow::from).collect()
    };

    Ok(Analysis {
        time_levels: time_levels(&frame),
        continuous: frame.is_continuous(),
        spec,
        rows,
    })
}
