//! Range checks on simulation parameters

use crate::error::ValidationError;
use crate::model::{DRIFT_RANGE, HORIZON_RANGE, SimulationParameters, VOLATILITY_RANGE};

/// Check every parameter against its valid range.
///
/// Returns one error per violated constraint, in field order; empty when the
/// parameters are valid. NaN is never in range.
#[must_use]
pub fn validate(params: &SimulationParameters) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !DRIFT_RANGE.contains(&params.drift) {
        errors.push(ValidationError::DriftOutOfRange {
            value: params.drift,
        });
    }
    if !VOLATILITY_RANGE.contains(&params.volatility) {
        errors.push(ValidationError::VolatilityOutOfRange {
            value: params.volatility,
        });
    }
    if !HORIZON_RANGE.contains(&params.horizon_months) {
        errors.push(ValidationError::HorizonOutOfRange {
            value: params.horizon_months,
        });
    }

    errors
}

/// [`validate`] as a `Result`
pub fn ensure_valid(params: &SimulationParameters) -> Result<(), Vec<ValidationError>> {
    let errors = validate(params);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_bounds_are_valid() {
        assert!(validate(&SimulationParameters::default()).is_empty());
        assert!(validate(&SimulationParameters::new(0.0, 0.0, 1)).is_empty());
        assert!(validate(&SimulationParameters::new(50.0, 100.0, 120)).is_empty());
    }

    #[test]
    fn test_each_violation_reported_once() {
        let base = SimulationParameters::default();
        let cases = [
            (base.with_horizon_months(0), "horizon_months"),
            (base.with_horizon_months(121), "horizon_months"),
            (base.with_drift(-1.0), "drift"),
            (base.with_drift(51.0), "drift"),
            (base.with_volatility(-1.0), "volatility"),
            (base.with_volatility(101.0), "volatility"),
        ];

        for (params, field) in cases {
            let errors = validate(&params);
            assert_eq!(errors.len(), 1, "{params:?}");
            assert_eq!(errors[0].field(), field);
        }
    }

    #[test]
    fn test_multiple_violations_in_field_order() {
        let params = SimulationParameters::new(60.0, -5.0, 0);
        let errors = validate(&params);
        assert_eq!(
            errors,
            vec![
                ValidationError::DriftOutOfRange { value: 60.0 },
                ValidationError::VolatilityOutOfRange { value: -5.0 },
                ValidationError::HorizonOutOfRange { value: 0 },
            ]
        );
        assert_eq!(ensure_valid(&params).unwrap_err().len(), 3);
    }

    #[test]
    fn test_nan_is_out_of_range() {
        let params = SimulationParameters::default().with_drift(f64::NAN);
        let errors = validate(&params);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "drift");
    }
}
