//! Hypothesis tests and multiplicity adjustment

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use statrs::statistics::{Data, Distribution};

/// Two-sided Welch t-test p-value
///
/// Degrees of freedom follow the Welch–Satterthwaite approximation. Returns
/// `None` when either sample has fewer than two values or both have zero
/// variance.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Option<f64> {
    let (n_a, n_b) = (a.len() as f64, b.len() as f64);
    if a.len() < 2 || b.len() < 2 {
        return None;
    }
    let (a, b) = (Data::new(a.to_vec()), Data::new(b.to_vec()));
    let (mean_a, mean_b) = (a.mean()?, b.mean()?);
    let (s_a, s_b) = (a.variance()? / n_a, b.variance()? / n_b);

    let se2 = s_a + s_b;
    if se2 <= 0.0 || !se2.is_finite() {
        return None;
    }
    let t = (mean_a - mean_b) / se2.sqrt();
    let df = se2.powi(2) / (s_a.powi(2) / (n_a - 1.0) + s_b.powi(2) / (n_b - 1.0));

    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    probability(2.0 * dist.sf(t.abs()))
}

/// One-way ANOVA F-test p-value
///
/// Groups with fewer than two values are ignored. Returns `None` with fewer
/// than two remaining groups or a zero within-group variance.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Option<f64> {
    let groups: Vec<&Vec<f64>> = groups.iter().filter(|g| g.len() > 1).collect();
    let k = groups.len();
    if k < 2 {
        return None;
    }
    let total: usize = groups.iter().map(|g| g.len()).sum();
    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / total as f64;

    let mut between = 0.0;
    let mut within = 0.0;
    for group in &groups {
        let mean = group.iter().sum::<f64>() / group.len() as f64;
        between += group.len() as f64 * (mean - grand_mean).powi(2);
        within += group.iter().map(|y| (y - mean).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (total - k) as f64;
    let ms_within = within / df_within;
    if ms_within <= 0.0 || !ms_within.is_finite() {
        return None;
    }
    let f = (between / df_between) / ms_within;

    let dist = FisherSnedecor::new(df_between, df_within).ok()?;
    probability(dist.sf(f))
}

/// Benjamini–Hochberg adjusted p-values
///
/// Undefined entries stay undefined and do not count towards the number of
/// tests. Adjusted values are monotone in the raw p-values and capped at 1.
pub fn benjamini_hochberg(p_values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut defined: Vec<(usize, f64)> = p_values
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.map(|p| (i, p)))
        .collect();
    defined.sort_by(|a, b| a.1.total_cmp(&b.1));

    let m = defined.len() as f64;
    let mut adjusted = vec![None; p_values.len()];
    let mut running = 1.0_f64;
    for (rank, (index, p)) in defined.iter().enumerate().rev() {
        running = running.min(p * m / (rank + 1) as f64);
        adjusted[*index] = Some(running.min(1.0));
    }
    adjusted
}

fn probability(p: f64) -> Option<f64> {
    p.is_finite().then_some(p.clamp(0.0, 1.0))
}
