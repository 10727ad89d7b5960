//! Sample-sequence ownership across seed epochs
//!
//! A [`SimulationSession`] holds the random source and the current sample
//! sequence. Varying drift or volatility within an epoch reuses the same
//! samples, so results stay comparable; only [`SimulationSession::regenerate`]
//! starts a new epoch.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::SimulationError;
use crate::model::{
    MAX_HORIZON_MONTHS, SampleSequence, SampleSnapshot, SimulationOutcome, SimulationParameters,
};
use crate::path::simulate;
use crate::sampler::{SamplerMethod, generate};
use crate::stats::summarize;
use crate::validate::ensure_valid;

/// Samples drawn per epoch: enough for the longest valid horizon
pub const EPOCH_SAMPLE_LEN: usize = MAX_HORIZON_MONTHS as usize;

#[derive(Debug, Clone)]
pub struct SimulationSession {
    rng: SmallRng,
    method: SamplerMethod,
    samples: SampleSequence,
    epoch: u64,
}

impl SimulationSession {
    /// Session seeded from OS entropy
    #[must_use]
    pub fn new(method: SamplerMethod) -> Self {
        Self::from_rng(SmallRng::from_os_rng(), method)
    }

    /// Reproducible session
    #[must_use]
    pub fn with_seed(seed: u64, method: SamplerMethod) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed), method)
    }

    fn from_rng(mut rng: SmallRng, method: SamplerMethod) -> Self {
        let samples = SampleSequence::from(generate(&mut rng, EPOCH_SAMPLE_LEN, method));
        Self {
            rng,
            method,
            samples,
            epoch: 0,
        }
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn method(&self) -> SamplerMethod {
        self.method
    }

    #[must_use]
    pub fn samples(&self) -> &SampleSequence {
        &self.samples
    }

    /// Consistent view of the current epoch's samples
    #[must_use]
    pub fn snapshot(&self) -> SampleSnapshot {
        SampleSnapshot {
            epoch: self.epoch,
            samples: self.samples.clone(),
        }
    }

    /// Replace the sample sequence and start a new epoch.
    ///
    /// Existing snapshots keep the previous sequence.
    pub fn regenerate(&mut self) -> u64 {
        let len = self.samples.len().max(EPOCH_SAMPLE_LEN);
        self.samples = SampleSequence::from(generate(&mut self.rng, len, self.method));
        self.epoch += 1;
        tracing::debug!(
            epoch = self.epoch,
            samples = len,
            method = %self.method,
            "Regenerated sample sequence"
        );
        self.epoch
    }

    /// Make sure at least `len` samples are available.
    ///
    /// A short sequence is replaced by one that keeps the existing samples as
    /// its prefix, so earlier months of the epoch are unchanged and the epoch
    /// number stays the same.
    pub fn ensure_len(&mut self, len: usize) {
        let available = self.samples.len();
        if available >= len {
            return;
        }
        let extra = generate(&mut self.rng, len - available, self.method);
        self.samples = self.samples.extended_with(extra);
        tracing::debug!(
            epoch = self.epoch,
            from = available,
            to = len,
            "Extended sample sequence"
        );
    }

    /// Validate, simulate and summarize against the current epoch.
    pub fn run(
        &mut self,
        params: &SimulationParameters,
    ) -> Result<SimulationOutcome, SimulationError> {
        ensure_valid(params)?;
        self.ensure_len(params.horizon());

        let snapshot = self.snapshot();
        let outcome = run_with_snapshot(params, &snapshot)?;
        tracing::debug!(
            epoch = outcome.epoch(),
            drift = params.drift,
            volatility = params.volatility,
            horizon_months = params.horizon_months,
            holding_period_return = outcome.stats().holding_period_return,
            "Simulation complete"
        );
        Ok(outcome)
    }
}

/// Validate, simulate and summarize against a fixed snapshot.
///
/// Unlike [`SimulationSession::run`], a snapshot that is too short is an
/// error rather than being extended.
pub fn run_with_snapshot(
    params: &SimulationParameters,
    snapshot: &SampleSnapshot,
) -> Result<SimulationOutcome, SimulationError> {
    ensure_valid(params)?;
    let path = simulate(params, &snapshot.samples)?;
    let stats = summarize(&path);
    Ok(SimulationOutcome::new(*params, snapshot.epoch, path, stats))
}
