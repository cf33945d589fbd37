//! Schema-checked view of a dataset bound to a formula
//!
//! Field presence, the outcome type and the baseline are checked once here;
//! every later stage works on typed [`Record`]s instead of looking columns up
//! by name.

use super::error::SummaryError;
use super::types::GroupKey;
use crate::data::{Column, Dataset, TimeValue};
use crate::formula::FormulaSpec;
use std::collections::HashSet;

/// Label used for a missing group or facet value
pub(crate) const MISSING_LABEL: &str = "NA";

/// One usable observation
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Cluster (subject) identifier
    pub subject: String,
    pub time: TimeValue,
    /// Outcome value, `None` if missing
    pub outcome: Option<f64>,
    pub group: GroupKey,
    pub facet: GroupKey,
}

/// A dataset bound to a [`FormulaSpec`], a cluster key and a baseline
#[derive(Debug, Clone)]
pub struct LongitudinalFrame {
    records: Vec<Record>,
    time_field: String,
    continuous: bool,
    baseline: TimeValue,
}

impl LongitudinalFrame {
    /// Validate `data` against the formula and extract typed records
    ///
    /// Rows without a subject or a time value are skipped.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::MissingFields`] naming every absent field at once
    /// - [`SummaryError::BaselineNotFound`] if `baseline` never occurs in the
    ///   time field
    /// - [`SummaryError::NonNumericOutcome`] if the outcome is categorical
    pub fn bind(
        data: &Dataset,
        spec: &FormulaSpec,
        cluster_key: &str,
        baseline: &TimeValue,
    ) -> Result<Self, SummaryError> {
        let (outcome, time) = Self::columns(data, spec, cluster_key)?;

        let baseline = match baseline.conform_to(time) {
            Some(conformed) if time.contains(&conformed) => conformed,
            _ => {
                return Err(SummaryError::BaselineNotFound {
                    baseline: baseline.to_string(),
                    field: spec.time().to_string(),
                })
            }
        };

        if !outcome.is_numeric() {
            return Err(SummaryError::NonNumericOutcome {
                field: spec.outcome().to_string(),
            });
        }

        Ok(LongitudinalFrame {
            records: Self::extract(data, spec, cluster_key),
            time_field: spec.time().to_string(),
            continuous: time.is_numeric(),
            baseline,
        })
    }

    /// Check that every referenced field exists; returns the outcome and time columns
    pub(crate) fn columns<'a>(
        data: &'a Dataset,
        spec: &FormulaSpec,
        cluster_key: &str,
    ) -> Result<(&'a Column, &'a Column), SummaryError> {
        let mut fields = spec.fields();
        fields.push(cluster_key);
        let missing = data.missing_fields(fields);
        if !missing.is_empty() {
            return Err(SummaryError::MissingFields { fields: missing });
        }

        match (data.column(spec.outcome()), data.column(spec.time())) {
            (Some(outcome), Some(time)) => Ok((outcome, time)),
            // Unreachable after the presence check above
            _ => Err(SummaryError::MissingFields {
                fields: vec![spec.outcome().to_string(), spec.time().to_string()],
            }),
        }
    }

    /// Extract records without validation; fields must exist
    pub(crate) fn extract(data: &Dataset, spec: &FormulaSpec, cluster_key: &str) -> Vec<Record> {
        let (Some(outcome), Some(time), Some(cluster)) = (
            data.column(spec.outcome()),
            data.column(spec.time()),
            data.column(cluster_key),
        ) else {
            return Vec::new();
        };
        let groups: Vec<&Column> = spec.groups().iter().filter_map(|g| data.column(g)).collect();
        let facets: Vec<&Column> = spec.facets().iter().filter_map(|f| data.column(f)).collect();

        let key = |columns: &[&Column], row: usize| -> GroupKey {
            columns
                .iter()
                .map(|c| c.label(row).unwrap_or_else(|| MISSING_LABEL.to_string()))
                .collect()
        };

        let mut skipped = 0usize;
        let mut seen: HashSet<(String, GroupKey, String)> = HashSet::new();
        let mut duplicates = 0usize;
        let mut records = Vec::with_capacity(data.n_rows());

        for row in 0..data.n_rows() {
            let t = time.time_value(row).filter(TimeValue::is_finite);
            let (Some(subject), Some(t)) = (cluster.label(row), t) else {
                skipped += 1;
                continue;
            };
            let facet = key(&facets, row);
            if !seen.insert((subject.clone(), facet.clone(), t.key())) {
                duplicates += 1;
            }
            records.push(Record {
                subject,
                time: t,
                // NaN and infinities count as missing
                outcome: outcome.number(row).filter(|v| v.is_finite()),
                group: key(&groups, row),
                facet,
            });
        }

        if skipped > 0 {
            tracing::debug!(
                skipped,
                "Skipped rows without a subject or time value"
            );
        }
        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                field = spec.time(),
                "Subjects with more than one observation at the same timepoint"
            );
        }

        records
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Name of the time field
    pub fn time_field(&self) -> &str {
        &self.time_field
    }

    /// Whether the time field is numeric
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// The baseline, converted to the time field's type
    pub fn baseline(&self) -> &TimeValue {
        &self.baseline
    }
}
