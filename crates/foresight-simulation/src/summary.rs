//! Order-statistic reduction of an outcome distribution.

use foresight_core::models::Summary;

/// Summarize `outcomes`. Percentiles are lookups at `floor(p * n)`, never
/// interpolated; `std` divides by `n`. Empty input yields the zero summary.
pub fn summarize(outcomes: &[f64]) -> Summary {
    if outcomes.is_empty() {
        return Summary::default();
    }

    let mut sorted = outcomes.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let positive = sorted.iter().filter(|&&x| x > 0.0).count() as f64;
    let negative = sorted.iter().filter(|&&x| x < 0.0).count() as f64;

    Summary {
        median: percentile(&sorted, 0.5),
        mean,
        p10: percentile(&sorted, 0.1),
        p25: percentile(&sorted, 0.25),
        p75: percentile(&sorted, 0.75),
        p90: percentile(&sorted, 0.9),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        std: variance.sqrt(),
        percent_positive: positive / n * 100.0,
        percent_negative: negative / n * 100.0,
    }
}

/// Order statistic of an ascending, non-empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len().saturating_sub(1);
    let index = ((p * sorted.len() as f64).floor() as usize).min(last);
    sorted.get(index).copied().unwrap_or(0.0)
}
