//! Per-timepoint summary statistics for longitudinal data
//!
//! [`compute`] turns a long-format [`Dataset`] into one [`SummaryRow`] per
//! (facet, group, timepoint) cell. Every row carries two parallel sets of
//! statistics: one over the observed outcome and one over each subject's
//! change from its own baseline value.
//!
//! # Pipeline
//!
//! Each stage is a pure function and can be used on its own:
//!
//! 1. [`LongitudinalFrame::bind`] validates fields and the baseline and
//!    extracts typed records
//! 2. [`time_levels`] orders the timepoints (baseline first for labels)
//! 3. [`baseline_change`] computes within-subject change
//! 4. records are partitioned into cells
//! 5. [`summarize`] computes the selected statistic for each cell
//!
//! Stages 2 and 3 are independent and run concurrently; cells are summarized
//! in parallel. The output order is deterministic.
//!
//! # Summary statistics
//!
//! | Statistic | Center | Spread | Bounds |
//! |-----------|--------|--------|--------|
//! | `mean` | mean | SD | mean ± SE, or t-interval with a confidence level |
//! | `mean_se` | mean | SD | mean ± SE |
//! | `median` | median | IQR | quartiles, or median ± 1.57·IQR/√n with a confidence level |
//! | `boxplot` | median | IQR | 1.5·IQR whiskers clipped to min/max |
//!
//! # Example
//!
//! ```rust
//! use longplot::data::Dataset;
//! use longplot::formula::parse;
//! use longplot::summary::{compute, SummaryOptions};
//!
//! let data = Dataset::builder()
//!     .categorical("USUBJID", ["S1", "S1", "S2", "S2"])
//!     .numeric("AVISITN", [0.0, 4.0, 0.0, 4.0])
//!     .numeric("AVAL", [10.0, 12.0, 14.0, 20.0])
//!     .build()
//!     .unwrap();
//!
//! let spec = parse("AVAL ~ AVISITN").unwrap();
//! let rows = compute(&data, &spec, "USUBJID", 0, &SummaryOptions::default()).unwrap();
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].observed.center, 16.0);
//! assert_eq!(rows[1].change.as_ref().unwrap().center, 4.0);
//! ```

mod aggregate;
mod change;
mod error;
mod export;
mod frame;
mod levels;
mod types;


pub use aggregate::{summarize, MEDIAN_CI_FACTOR, WHISKER_IQR};
pub use change::baseline_change;
pub use error::SummaryError;
pub use export::rows_to_csv;
pub(crate) use export::{row_fields, HEADER};
pub use frame::{LongitudinalFrame, Record};
pub use levels::{canonical_order, time_levels};
pub use types::{GroupKey, SummaryOptions, SummaryRow, SummaryStatistic, ViewStats};

use crate::data::{Dataset, TimeValue};
use crate::formula::FormulaSpec;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Observed and change values collected for one cell
#[derive(Debug, Clone, Default)]
struct Cell {
    observed: Vec<f64>,
    change: Vec<f64>,
}

/// Compute one [`SummaryRow`] per (facet, group, timepoint) cell
///
/// Rows are ordered by facet, then group (both in first-encountered order),
/// then timepoint in canonical order. Cells where every outcome is missing
/// are omitted.
///
/// # Errors
///
/// All errors are raised before any aggregation:
/// - [`SummaryError::InvalidConfidenceLevel`] for a level outside (0, 1)
/// - [`SummaryError::MissingFields`] naming every absent field
/// - [`SummaryError::BaselineNotFound`] when `baseline` is not a value of the
///   time field
/// - [`SummaryError::NonNumericOutcome`] for a categorical outcome
///
/// An unknown statistic name is rejected earlier, when the options are
/// parsed ([`SummaryError::InvalidSummaryStatistic`]).
pub fn compute(
    data: &Dataset,
    spec: &FormulaSpec,
    cluster_key: &str,
    baseline: impl Into<TimeValue>,
    options: &SummaryOptions,
) -> Result<Vec<SummaryRow>, SummaryError> {
    options.validate()?;
    let frame = LongitudinalFrame::bind(data, spec, cluster_key, &baseline.into())?;

    tracing::debug!(
        formula = %spec,
        statistic = %options.statistic,
        records = frame.records().len(),
        continuous = frame.is_continuous(),
        "Computing longitudinal summary"
    );

    Ok(summarize_frame(&frame, options))
}

/// Run the aggregation stages on an already validated frame
pub(crate) fn summarize_frame(frame: &LongitudinalFrame, options: &SummaryOptions) -> Vec<SummaryRow> {
    let (levels, change) = rayon::join(|| time_levels(frame), || baseline_change(frame));
    let cells = partition(frame, &levels, &change);
    let continuous = frame.is_continuous();

    let total = cells.len();
    let rows: Vec<SummaryRow> = cells
        .into_par_iter()
        .filter_map(|((facet, group, time_index), cell)| {
            let observed = summarize(&cell.observed, options)?;
            Some(SummaryRow {
                facet,
                group,
                time: levels[time_index].clone(),
                time_index,
                continuous,
                observed,
                change: summarize(&cell.change, options),
            })
        })
        .collect();

    if rows.len() < total {
        tracing::debug!(
            dropped = total - rows.len(),
            "Dropped cells without any observed value"
        );
    }

    rows
}

type CellKey = (GroupKey, GroupKey, usize);

/// Group record values into cells, in output order
fn partition(
    frame: &LongitudinalFrame,
    levels: &[TimeValue],
    change: &[Option<f64>],
) -> Vec<(CellKey, Cell)> {
    let level_index: HashMap<String, usize> = levels
        .iter()
        .enumerate()
        .map(|(i, level)| (level.key(), i))
        .collect();

    // First-encountered order of (facet, group) pairs
    let mut series: HashMap<(&GroupKey, &GroupKey), usize> = HashMap::new();
    let mut series_keys: Vec<(&GroupKey, &GroupKey)> = Vec::new();
    let mut cells: BTreeMap<(usize, usize), Cell> = BTreeMap::new();

    for (record, delta) in frame.records().iter().zip(change) {
        let Some(&time_index) = level_index.get(&record.time.key()) else {
            continue;
        };
        let pair = (&record.facet, &record.group);
        let next = series_keys.len();
        let series_index = *series.entry(pair).or_insert_with(|| {
            series_keys.push(pair);
            next
        });

        let cell = cells.entry((series_index, time_index)).or_default();
        if let Some(y) = record.outcome {
            cell.observed.push(y);
        }
        if let Some(d) = delta {
            cell.change.push(*d);
        }
    }

    cells
        .into_iter()
        .map(|((series_index, time_index), cell)| {
            let (facet, group) = series_keys[series_index];
            ((facet.clone(), group.clone(), time_index), cell)
        })
        .collect()
}
