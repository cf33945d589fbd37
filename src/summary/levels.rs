use super::frame::LongitudinalFrame;
use crate::data::TimeValue;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Canonical ordering of the timepoints of a frame
///
/// See [`canonical_order`].
pub fn time_levels(frame: &LongitudinalFrame) -> Vec<TimeValue> {
    canonical_order(
        frame.records().iter().map(|r| &r.time),
        frame.baseline(),
        frame.is_continuous(),
    )
}

/// Order distinct timepoints for presentation
///
/// Continuous times are sorted ascending. Categorical times start with the
/// baseline, followed by the other labels in natural order: digit runs
/// compare as numbers, so `"Week 4"` comes before `"Week 8"` and `"Week 10"`.
/// The result depends only on the set of distinct timepoints, never on the
/// order in which rows list them.
pub fn canonical_order<'a>(
    times: impl IntoIterator<Item = &'a TimeValue>,
    baseline: &TimeValue,
    continuous: bool,
) -> Vec<TimeValue> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut levels: Vec<TimeValue> = Vec::new();

    if !continuous {
        seen.insert(baseline.key());
        levels.push(baseline.clone());
    }

    for time in times {
        if seen.insert(time.key()) {
            levels.push(time.clone());
        }
    }

    if continuous {
        levels.sort_by(|a, b| {
            let a = a.as_number().unwrap_or(f64::NAN);
            let b = b.as_number().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        });
    } else if let Some(rest) = levels.get_mut(1..) {
        rest.sort_by(|a, b| natural_cmp(&a.to_string(), &b.to_string()));
    }

    levels
}

/// Compare labels chunk by chunk, digit runs by numeric value
///
/// Ties fall back to plain string order so distinct labels never compare equal.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut left, mut right) = (chunks(a), chunks(b));
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (is_digits(x), is_digits(y)) {
                    (true, true) => {
                        let (x, y) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
                        x.len().cmp(&y.len()).then_with(|| x.cmp(y))
                    }
                    _ => x.cmp(y),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

fn is_digits(chunk: &str) -> bool {
    chunk.bytes().all(|b| b.is_ascii_digit())
}

/// Split a label into alternating runs of ASCII digits and other characters
fn chunks(label: &str) -> impl Iterator<Item = &str> {
    let mut rest = label;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(rest.len(), |(i, _)| i);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
