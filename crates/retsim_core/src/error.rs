use std::fmt;

use crate::model::{DRIFT_RANGE, HORIZON_RANGE, VOLATILITY_RANGE};

/// A single violated parameter constraint
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    DriftOutOfRange { value: f64 },
    VolatilityOutOfRange { value: f64 },
    HorizonOutOfRange { value: u32 },
}

impl ValidationError {
    /// Name of the offending parameter, for attaching messages to form fields
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::DriftOutOfRange { .. } => "drift",
            ValidationError::VolatilityOutOfRange { .. } => "volatility",
            ValidationError::HorizonOutOfRange { .. } => "horizon_months",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DriftOutOfRange { value } => write!(
                f,
                "drift must be between {}% and {}% (got {value}%)",
                DRIFT_RANGE.start(),
                DRIFT_RANGE.end()
            ),
            ValidationError::VolatilityOutOfRange { value } => write!(
                f,
                "volatility must be between {}% and {}% (got {value}%)",
                VOLATILITY_RANGE.start(),
                VOLATILITY_RANGE.end()
            ),
            ValidationError::HorizonOutOfRange { value } => write!(
                f,
                "horizon must be between {} and {} months (got {value})",
                HORIZON_RANGE.start(),
                HORIZON_RANGE.end()
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors from running a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// One entry per violated constraint; no output was produced
    InvalidParameters(Vec<ValidationError>),
    /// Sample sequence shorter than the horizon
    InsufficientSamples { required: usize, available: usize },
}

impl SimulationError {
    /// Validation errors carried by this error, if any
    #[must_use]
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            SimulationError::InvalidParameters(errors) => errors,
            SimulationError::InsufficientSamples { .. } => &[],
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParameters(errors) => {
                write!(f, "invalid simulation parameters: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SimulationError::InsufficientSamples {
                required,
                available,
            } => write!(
                f,
                "sample sequence too short: need {required} samples, have {available}"
            ),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::InvalidParameters(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            SimulationError::InsufficientSamples { .. } => None,
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::InvalidParameters(errors)
    }
}
