//! Many-path Monte Carlo ensembles
//!
//! Simulates independent sample sequences for the same parameters and
//! reports percentile bands of the value path and the spread of
//! holding-period returns. Paths are generated in fixed-size batches, each
//! with its own seeded RNG, so results depend only on the seed and path count
//! and not on how batches are scheduled across threads.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::model::{BASE_VALUE, SimulatedPath, SimulationParameters};
use crate::path::simulate;
use crate::sampler::{SamplerMethod, generate};
use crate::validate::ensure_valid;

const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleConfig {
    pub paths: usize,
    pub seed: u64,
    #[serde(default)]
    pub method: SamplerMethod,
    /// Percentiles to report, as fractions in [0, 1]
    #[serde(default = "default_percentiles")]
    pub percentiles: Vec<f64>,
}

fn default_percentiles() -> Vec<f64> {
    vec![0.05, 0.50, 0.95]
}

impl EnsembleConfig {
    #[must_use]
    pub fn new(paths: usize, seed: u64) -> Self {
        Self {
            paths,
            seed,
            method: SamplerMethod::default(),
            percentiles: default_percentiles(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: SamplerMethod) -> Self {
        self.method = method;
        self
    }
}

/// Portfolio value at one percentile, for every month (index 0 = start)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileBand {
    pub percentile: f64,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub params: SimulationParameters,
    pub paths: usize,
    pub bands: Vec<PercentileBand>,
    pub mean_final_value: f64,
    pub mean_holding_period_return: f64,
    /// Fraction of paths that end below the starting value
    pub probability_of_loss: f64,
    pub worst_holding_period_return: f64,
    pub best_holding_period_return: f64,
}

impl EnsembleSummary {
    /// Band for a percentile, matched with a small tolerance
    #[must_use]
    pub fn band(&self, percentile: f64) -> Option<&PercentileBand> {
        self.bands
            .iter()
            .find(|b| (b.percentile - percentile).abs() < 1e-9)
    }
}

/// Nearest-rank percentile of sorted values
fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let idx = (p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx]
}

fn simulate_batch(
    params: &SimulationParameters,
    config: &EnsembleConfig,
    batch: usize,
    num_batches: usize,
) -> Vec<SimulatedPath> {
    let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(batch as u64));
    let batch_size = if batch == num_batches - 1 {
        config.paths - batch * MAX_BATCH_SIZE
    } else {
        MAX_BATCH_SIZE
    };

    (0..batch_size)
        .filter_map(|_| {
            let mut path_rng = SmallRng::seed_from_u64(rng.next_u64());
            let samples = generate(&mut path_rng, params.horizon(), config.method);
            // Sample count equals the horizon, so this cannot fail
            simulate(params, &samples).ok()
        })
        .collect()
}

/// Run `config.paths` independent simulations of `params`.
///
/// Returns `InvalidParameters` for out-of-range params. A path count of
/// zero is treated as one.
pub fn run_ensemble(
    params: &SimulationParameters,
    config: &EnsembleConfig,
) -> Result<EnsembleSummary, SimulationError> {
    ensure_valid(params)?;

    let config = EnsembleConfig {
        paths: config.paths.max(1),
        ..config.clone()
    };
    let num_batches = config.paths.div_ceil(MAX_BATCH_SIZE);

    tracing::debug!(
        paths = config.paths,
        batches = num_batches,
        seed = config.seed,
        method = %config.method,
        "Running ensemble"
    );

    #[cfg(feature = "parallel")]
    let paths: Vec<SimulatedPath> = (0..num_batches)
        .into_par_iter()
        .flat_map(|i| simulate_batch(params, &config, i, num_batches))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let paths: Vec<SimulatedPath> = (0..num_batches)
        .flat_map(|i| simulate_batch(params, &config, i, num_batches))
        .collect();

    let n = paths.len() as f64;
    let months = params.horizon() + 1;

    let mut bands: Vec<PercentileBand> = config
        .percentiles
        .iter()
        .map(|&percentile| PercentileBand {
            percentile,
            values: Vec::with_capacity(months),
        })
        .collect();

    let mut column = Vec::with_capacity(paths.len());
    for month in 0..months {
        column.clear();
        column.extend(paths.iter().map(|p| p.cumulative()[month]));
        column.sort_by(f64::total_cmp);
        for band in &mut bands {
            band.values.push(percentile_of_sorted(&column, band.percentile));
        }
    }

    let hprs: Vec<f64> = paths
        .iter()
        .map(|p| p.final_value() / BASE_VALUE - 1.0)
        .collect();

    Ok(EnsembleSummary {
        params: *params,
        paths: paths.len(),
        bands,
        mean_final_value: paths.iter().map(SimulatedPath::final_value).sum::<f64>() / n,
        mean_holding_period_return: hprs.iter().sum::<f64>() / n,
        probability_of_loss: hprs.iter().filter(|&&r| r < 0.0).count() as f64 / n,
        worst_holding_period_return: hprs.iter().copied().fold(f64::INFINITY, f64::min),
        best_holding_period_return: hprs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensemble_is_deterministic_per_seed() {
        let params = SimulationParameters::new(5.0, 20.0, 24);
        let config = EnsembleConfig::new(250, 99);

        let a = run_ensemble(&params, &config).unwrap();
        let b = run_ensemble(&params, &config).unwrap();
        assert_eq!(a.bands, b.bands);
        assert_eq!(a.paths, 250);
    }

    #[test]
    fn test_bands_are_ordered_and_start_at_base() {
        let params = SimulationParameters::new(5.0, 20.0, 36);
        let summary = run_ensemble(&params, &EnsembleConfig::new(500, 1)).unwrap();

        let p5 = summary.band(0.05).unwrap();
        let p50 = summary.band(0.50).unwrap();
        let p95 = summary.band(0.95).unwrap();
        assert_eq!(p50.values.len(), 37);
        assert_eq!(p50.values[0], 100.0);
        for m in 0..=36 {
            assert!(p5.values[m] <= p50.values[m]);
            assert!(p50.values[m] <= p95.values[m]);
        }
        assert!(summary.worst_holding_period_return <= summary.best_holding_period_return);
        assert!((0.0..=1.0).contains(&summary.probability_of_loss));
    }

    #[test]
    fn test_zero_volatility_ensemble_is_degenerate() {
        let params = SimulationParameters::new(12.0, 0.0, 12);
        let summary = run_ensemble(&params, &EnsembleConfig::new(10, 3)).unwrap();
        let expected = 100.0 * 1.01f64.powi(12);
        assert!((summary.mean_final_value - expected).abs() < 1e-9);
        assert_eq!(summary.probability_of_loss, 0.0);
    }

    #[test]
    fn test_ensemble_rejects_invalid_params() {
        let params = SimulationParameters::new(3.0, 150.0, 12);
        let err = run_ensemble(&params, &EnsembleConfig::new(10, 3)).unwrap_err();
        assert_eq!(err.validation_errors().len(), 1);
    }

    #[test]
    fn test_percentile_of_sorted() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile_of_sorted(&values, 0.0), 1.0);
        assert_eq!(percentile_of_sorted(&values, 0.5), 3.0);
        assert_eq!(percentile_of_sorted(&values, 1.0), 5.0);
    }
}
