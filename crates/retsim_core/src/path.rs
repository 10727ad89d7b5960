//! Monthly path simulation
//!
//! Turns annualized drift/volatility and a sequence of standard-normal
//! samples into monthly simple returns and a compounded value series.

use crate::error::SimulationError;
use crate::model::{BASE_VALUE, MONTHS_PER_YEAR, SimulatedPath, SimulationParameters};

/// Monthly drift component, as a fraction
#[must_use]
#[inline]
pub fn monthly_drift(drift_percent: f64) -> f64 {
    (drift_percent / MONTHS_PER_YEAR) / 100.0
}

/// Monthly shock for one standard-normal sample, as a fraction
#[must_use]
#[inline]
pub fn monthly_shock(volatility_percent: f64, sample: f64) -> f64 {
    (volatility_percent / 100.0) * sample / MONTHS_PER_YEAR.sqrt()
}

/// Simulate `params.horizon_months` months using the first samples of `samples`.
///
/// Deterministic: identical inputs give bit-identical output. Parameter
/// ranges are not checked here; run [`crate::validate::validate`] first.
pub fn simulate(
    params: &SimulationParameters,
    samples: &[f64],
) -> Result<SimulatedPath, SimulationError> {
    let horizon = params.horizon();
    if samples.len() < horizon {
        return Err(SimulationError::InsufficientSamples {
            required: horizon,
            available: samples.len(),
        });
    }

    let drift = monthly_drift(params.drift);

    let mut returns = Vec::with_capacity(horizon);
    let mut cumulative = Vec::with_capacity(horizon + 1);
    cumulative.push(BASE_VALUE);

    let mut value = BASE_VALUE;
    for &z in &samples[..horizon] {
        let r = drift + monthly_shock(params.volatility, z);
        value *= 1.0 + r;
        returns.push(r);
        cumulative.push(value);
    }

    Ok(SimulatedPath::from_parts(returns, cumulative))
}
