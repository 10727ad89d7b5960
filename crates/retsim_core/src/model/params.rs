//! Simulation input parameters and their valid ranges

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Annualized drift, in percent
pub const DRIFT_RANGE: RangeInclusive<f64> = 0.0..=50.0;
/// Annualized volatility, in percent
pub const VOLATILITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;
pub const MAX_HORIZON_MONTHS: u32 = 120;
/// Number of simulated months
pub const HORIZON_RANGE: RangeInclusive<u32> = 1..=MAX_HORIZON_MONTHS;

pub const MONTHS_PER_YEAR: f64 = 12.0;

pub const DEFAULT_DRIFT: f64 = 3.0;
pub const DEFAULT_VOLATILITY: f64 = 17.0;
pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

/// Inputs for one simulation call.
///
/// `drift` and `volatility` are annualized percentages (3.0 means 3%).
/// Values are not range-checked on construction; see [`crate::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    pub drift: f64,
    pub volatility: f64,
    pub horizon_months: u32,
}

impl SimulationParameters {
    #[must_use]
    pub fn new(drift: f64, volatility: f64, horizon_months: u32) -> Self {
        Self {
            drift,
            volatility,
            horizon_months,
        }
    }

    /// Horizon as a slice length
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon_months as usize
    }

    #[must_use]
    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    #[must_use]
    pub fn with_horizon_months(mut self, horizon_months: u32) -> Self {
        self.horizon_months = horizon_months;
        self
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self::new(DEFAULT_DRIFT, DEFAULT_VOLATILITY, DEFAULT_HORIZON_MONTHS)
    }
}
