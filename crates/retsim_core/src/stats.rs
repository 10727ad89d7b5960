//! Summary statistics of a simulated path

use crate::model::{BASE_VALUE, MONTHS_PER_YEAR, SimulatedPath, SummaryStatistics};

/// Summarize a simulated path.
///
/// # Panics
///
/// Panics if the path is empty. Validated parameters always have a horizon
/// of at least one month, so an empty path is a caller bug.
#[must_use]
pub fn summarize(path: &SimulatedPath) -> SummaryStatistics {
    summarize_series(path.returns(), path.cumulative())
}

/// Summarize raw series.
///
/// `cumulative` must be one longer than `returns` and start at [`BASE_VALUE`].
///
/// # Panics
///
/// Panics if `returns` is empty or the lengths don't line up.
#[must_use]
pub fn summarize_series(returns: &[f64], cumulative: &[f64]) -> SummaryStatistics {
    let n = returns.len();
    assert!(n > 0, "cannot summarize an empty return series");
    assert_eq!(
        cumulative.len(),
        n + 1,
        "cumulative series must have one more entry than the return series"
    );

    let n_f = n as f64;
    let growth = cumulative[n] / BASE_VALUE;

    let arith_mean_monthly = returns.iter().sum::<f64>() / n_f;
    let geom_mean_monthly = growth.powf(1.0 / n_f) - 1.0;

    // Population variance around the arithmetic mean
    let variance = returns
        .iter()
        .map(|r| (r - arith_mean_monthly).powi(2))
        .sum::<f64>()
        / n_f;

    SummaryStatistics {
        arith_mean_monthly,
        geom_mean_monthly,
        arith_mean_annual: arith_mean_monthly * MONTHS_PER_YEAR,
        geom_mean_annual: (1.0 + geom_mean_monthly).powf(MONTHS_PER_YEAR) - 1.0,
        volatility_annual: variance.sqrt() * MONTHS_PER_YEAR.sqrt(),
        holding_period_return: growth - 1.0,
    }
}
