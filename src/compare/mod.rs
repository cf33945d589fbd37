//! Between-group comparisons at each timepoint
//!
//! [`annotate`] attaches a test result to every [`SummaryRow`]. Tests run on
//! the raw outcome values of each (facet, timepoint), one sample per group:
//!
//! | Usable groups (n > 1) | Test |
//! |-----------------------|------|
//! | 2 | Welch t-test, two-sided |
//! | 3 or more | one-way ANOVA F-test |
//! | fewer than 2 | none |
//!
//! p-values are then adjusted across all tested timepoints with the
//! Benjamini–Hochberg procedure and mapped to significance markers.

mod error;
mod stats;
mod types;


pub use error::CompareError;
pub use stats::{benjamini_hochberg, one_way_anova, welch_t_test};
pub use types::{AnnotatedRow, Significance, TestKind};

use crate::data::Dataset;
use crate::formula::FormulaSpec;
use crate::summary::{GroupKey, LongitudinalFrame, SummaryError, SummaryRow};
use std::collections::HashMap;

/// Raw outcome values of one (facet, timepoint), one sample per group
type Samples = Vec<(GroupKey, Vec<f64>)>;

/// Run per-timepoint group comparisons and annotate `rows` with the results
///
/// `raw_data` must be the dataset `rows` were computed from.
///
/// # Errors
///
/// - [`CompareError::UnsupportedDesign`] unless the formula has exactly one
///   group field
/// - [`CompareError::Summary`] when a referenced field is missing or the
///   outcome is not numeric
pub fn annotate(
    rows: Vec<SummaryRow>,
    raw_data: &Dataset,
    spec: &FormulaSpec,
    cluster_key: &str,
) -> Result<Vec<AnnotatedRow>, CompareError> {
    if spec.groups().len() != 1 {
        return Err(CompareError::UnsupportedDesign {
            groups: spec.groups().len(),
        });
    }

    let (outcome, _) = LongitudinalFrame::columns(raw_data, spec, cluster_key)?;
    if !outcome.is_numeric() {
        return Err(SummaryError::NonNumericOutcome {
            field: spec.outcome().to_string(),
        }
        .into());
    }

    let samples = collect_samples(raw_data, spec, cluster_key);

    // One test per distinct (facet, timepoint), in row order
    let mut slots: HashMap<(GroupKey, String), usize> = HashMap::new();
    let mut tests: Vec<(Option<TestKind>, Option<f64>)> = Vec::new();
    let slot_of: Vec<usize> = rows
        .iter()
        .map(|row| {
            let key = (row.facet.clone(), row.time.key());
            *slots.entry(key).or_insert_with_key(|key| {
                tests.push(run_test(samples.get(key)));
                tests.len() - 1
            })
        })
        .collect();

    let raw: Vec<Option<f64>> = tests.iter().map(|(_, p)| *p).collect();
    let adjusted = benjamini_hochberg(&raw);

    tracing::debug!(
        timepoints = tests.len(),
        tested = raw.iter().filter(|p| p.is_some()).count(),
        "Ran between-group comparisons"
    );

    Ok(rows
        .into_iter()
        .zip(slot_of)
        .map(|(row, slot)| AnnotatedRow {
            row,
            test: tests[slot].0,
            p_value: tests[slot].1,
            adjusted_p_value: adjusted[slot],
            significance: Significance::from_p(adjusted[slot]),
        })
        .collect())
}

fn collect_samples(
    data: &Dataset,
    spec: &FormulaSpec,
    cluster_key: &str,
) -> HashMap<(GroupKey, String), Samples> {
    let mut samples: HashMap<(GroupKey, String), Samples> = HashMap::new();
    for record in LongitudinalFrame::extract(data, spec, cluster_key) {
        let Some(y) = record.outcome else {
            continue;
        };
        let groups = samples
            .entry((record.facet, record.time.key()))
            .or_default();
        match groups.iter_mut().find(|(group, _)| *group == record.group) {
            Some((_, values)) => values.push(y),
            None => groups.push((record.group, vec![y])),
        }
    }
    samples
}

fn run_test(samples: Option<&Samples>) -> (Option<TestKind>, Option<f64>) {
    let usable: Vec<&Vec<f64>> = samples
        .into_iter()
        .flatten()
        .map(|(_, values)| values)
        .filter(|values| values.len() > 1)
        .collect();

    match usable.as_slice() {
        [a, b] => (Some(TestKind::WelchT), welch_t_test(a, b)),
        groups if groups.len() >= 3 => {
            let groups: Vec<Vec<f64>> = groups.iter().map(|g| g.to_vec()).collect();
            (Some(TestKind::Anova), one_way_anova(&groups))
        }
        _ => (None, None),
    }
}
