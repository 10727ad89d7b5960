//! Simulation outputs
//!
//! A [`SimulationOutcome`] bundles the path and statistics from one
//! `simulate + summarize` call so the three outputs can never drift apart.

use serde::{Deserialize, Serialize};

use super::params::SimulationParameters;

/// Portfolio value at month 0
pub const BASE_VALUE: f64 = 100.0;

/// Monthly returns and the compounded value series they produce.
///
/// Built only by [`crate::path::simulate`], which guarantees
/// `cumulative.len() == returns.len() + 1` and `cumulative[0] == BASE_VALUE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedPath {
    returns: Vec<f64>,
    cumulative: Vec<f64>,
}

impl SimulatedPath {
    pub(crate) fn from_parts(returns: Vec<f64>, cumulative: Vec<f64>) -> Self {
        debug_assert_eq!(cumulative.len(), returns.len() + 1);
        Self {
            returns,
            cumulative,
        }
    }

    /// Monthly simple returns, one per simulated month
    #[must_use]
    pub fn returns(&self) -> &[f64] {
        &self.returns
    }

    /// Portfolio values, starting at [`BASE_VALUE`]
    #[must_use]
    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    #[must_use]
    pub fn horizon(&self) -> usize {
        self.returns.len()
    }

    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(BASE_VALUE)
    }
}

/// Summary statistics of a simulated path. All values are fractions (0.05 = 5%).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub arith_mean_monthly: f64,
    pub geom_mean_monthly: f64,
    pub arith_mean_annual: f64,
    pub geom_mean_annual: f64,
    pub volatility_annual: f64,
    pub holding_period_return: f64,
}

/// Everything one simulation run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    params: SimulationParameters,
    epoch: u64,
    path: SimulatedPath,
    stats: SummaryStatistics,
}

impl SimulationOutcome {
    pub(crate) fn new(
        params: SimulationParameters,
        epoch: u64,
        path: SimulatedPath,
        stats: SummaryStatistics,
    ) -> Self {
        Self {
            params,
            epoch,
            path,
            stats,
        }
    }

    #[must_use]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Seed epoch of the samples used
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn path(&self) -> &SimulatedPath {
        &self.path
    }

    #[must_use]
    pub fn stats(&self) -> &SummaryStatistics {
        &self.stats
    }

    #[must_use]
    pub fn returns(&self) -> &[f64] {
        self.path.returns()
    }

    #[must_use]
    pub fn cumulative(&self) -> &[f64] {
        self.path.cumulative()
    }
}
