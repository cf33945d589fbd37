//! Per-cell statistics

use super::types::{SummaryOptions, SummaryStatistic, ViewStats};
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::{Data, Distribution, Max, Min, OrderStatistics};

/// Multiplier of the normal-approximation interval for the median
///
/// `median ± 1.57 · IQR / √n`; the same factor is used whatever confidence
/// level is requested.
pub const MEDIAN_CI_FACTOR: f64 = 1.57;

/// Whisker reach in IQRs for box plots
pub const WHISKER_IQR: f64 = 1.5;

/// Summarize the non-missing values of one series in one cell
///
/// NaN and infinite values are skipped like missing ones. Returns `None` when
/// no finite value remains, or when the center is not finite.
pub fn summarize(values: &[f64], options: &SummaryOptions) -> Option<ViewStats> {
    let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }
    match options.statistic {
        SummaryStatistic::Mean | SummaryStatistic::MeanSe => mean_stats(values, options),
        SummaryStatistic::Median | SummaryStatistic::Boxplot => median_stats(values, options),
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn mean_stats(values: Vec<f64>, options: &SummaryOptions) -> Option<ViewStats> {
    let n = values.len();
    let data = Data::new(values);

    let center = data.mean().and_then(finite)?;

    // Insufficient data for a spread with a single value
    let spread = if n > 1 {
        data.std_dev().and_then(finite)
    } else {
        None
    };
    let standard_error = spread.map(|sd| sd / (n as f64).sqrt());

    let half_width = match (options.statistic, options.confidence_level, standard_error) {
        (SummaryStatistic::Mean, Some(level), Some(se)) => {
            t_quantile(1.0 - (1.0 - level) / 2.0, (n - 1) as f64).map(|t| t * se)
        }
        (_, _, se) => se,
    };

    Some(ViewStats {
        center,
        spread,
        standard_error,
        lower: half_width.map(|h| center - h),
        upper: half_width.map(|h| center + h),
        q25: None,
        q75: None,
        n,
    })
}

fn median_stats(values: Vec<f64>, options: &SummaryOptions) -> Option<ViewStats> {
    let n = values.len();
    let mut data = Data::new(values);

    let center = finite(data.median())?;
    let q25 = data.quantile(0.25);
    let q75 = data.quantile(0.75);
    let iqr = q75 - q25;

    let (lower, upper) = match options.statistic {
        SummaryStatistic::Boxplot => (
            data.min().max(q25 - WHISKER_IQR * iqr),
            data.max().min(q75 + WHISKER_IQR * iqr),
        ),
        _ => match options.confidence_level {
            Some(_) => {
                let half_width = MEDIAN_CI_FACTOR * iqr / (n as f64).sqrt();
                (center - half_width, center + half_width)
            }
            None => (q25, q75),
        },
    };

    let bounds = finite(lower).zip(finite(upper));

    Some(ViewStats {
        center,
        spread: finite(iqr),
        standard_error: None,
        lower: bounds.map(|b| b.0),
        upper: bounds.map(|b| b.1),
        q25: finite(q25),
        q75: finite(q75),
        n,
    })
}

/// Student's t-distribution quantile via `statrs`
fn t_quantile(p: f64, df: f64) -> Option<f64> {
    StudentsT::new(0.0, 1.0, df)
        .ok()
        .map(|t| t.inverse_cdf(p))
        .and_then(finite)
}
