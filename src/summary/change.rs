use super::frame::{LongitudinalFrame, Record};
use super::types::GroupKey;
use std::collections::{HashMap, HashSet};

/// Within-subject change from baseline for every record of a frame
///
/// The result is aligned with [`LongitudinalFrame::records`]. The baseline
/// reference is looked up per subject within the same facet, so a subject
/// measured on several parameters gets one baseline per parameter.
///
/// A subject without a baseline observation, or whose baseline outcome is
/// missing, gets `None` at every timepoint; its observed values are
/// unaffected. When a subject has several baseline rows the first one is used.
pub fn baseline_change(frame: &LongitudinalFrame) -> Vec<Option<f64>> {
    let baseline_key = frame.baseline().key();

    let mut reference: HashMap<(&str, &GroupKey), Option<f64>> = HashMap::new();
    for record in frame.records() {
        if record.time.key() == baseline_key {
            reference
                .entry((record.subject.as_str(), &record.facet))
                .or_insert(record.outcome);
        }
    }

    let lookup = |record: &Record| -> Option<f64> {
        match reference.get(&(record.subject.as_str(), &record.facet)) {
            Some(Some(base)) => Some(*base),
            _ => None,
        }
    };

    let change: Vec<Option<f64>> = frame
        .records()
        .iter()
        .map(|record| lookup(record).and_then(|base| record.outcome.map(|y| y - base)))
        .collect();

    let without_baseline = frame
        .records()
        .iter()
        .filter(|r| lookup(r).is_none())
        .map(|r| r.subject.as_str())
        .collect::<HashSet<_>>()
        .len();
    if without_baseline > 0 {
        tracing::debug!(
            subjects = without_baseline,
            baseline = %frame.baseline(),
            "Subjects without a baseline value are excluded from change statistics"
        );
    }

    change
}
