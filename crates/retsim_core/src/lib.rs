//! Portfolio return simulation library
//!
//! This crate provides the computational core of a simplified Monte Carlo
//! return simulator:
//! - Standard-normal sample generation (Box-Muller variants, ziggurat)
//! - Monthly path simulation from annualized drift and volatility
//! - Summary statistics (arithmetic/geometric means, volatility, holding-period return)
//! - Range validation of simulation parameters
//! - A session that owns the sample sequence across seed epochs
//! - A debounced, event-driven controller for interactive front ends
//!
//! # Example
//!
//! ```ignore
//! use retsim_core::{SamplerMethod, SimulationParameters, SimulationSession};
//!
//! let mut session = SimulationSession::with_seed(42, SamplerMethod::BoxMuller);
//! let params = SimulationParameters::new(3.0, 17.0, 12);
//! let outcome = session.run(&params)?;
//! println!("HPR: {:.2}%", outcome.stats().holding_period_return * 100.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod controller;
pub mod ensemble;
pub mod error;
pub mod path;
pub mod sampler;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod validate;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use controller::{Presenter, SimulationController};
pub use ensemble::{EnsembleConfig, EnsembleSummary, run_ensemble};
pub use error::{SimulationError, ValidationError};
pub use model::{
    SampleSequence, SampleSnapshot, SimulatedPath, SimulationOutcome, SimulationParameters,
    SummaryStatistics,
};
pub use sampler::SamplerMethod;
pub use session::SimulationSession;
