//! Precondition checks over per-HRU sequences.
//!
//! Each check scans in HRU order and reports the first offending entry.

use crate::error::{GroundwaterError, Result};

/// Require exactly `expected` entries.
pub fn check_len(field: &'static str, values: &[f64], expected: usize) -> Result<()> {
    if values.len() != expected {
        return Err(GroundwaterError::LengthMismatch {
            field,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

/// Reject NaN and infinite values.
pub fn check_finite(field: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(GroundwaterError::NonFinite {
            field,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Finite and `>= 0`.
pub fn check_non_negative(field: &'static str, values: &[f64]) -> Result<()> {
    check_finite(field, values)?;
    match values.iter().position(|&v| v < 0.0) {
        Some(index) => Err(GroundwaterError::Negative {
            field,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Finite and within `[min, max]`.
pub fn check_bounds(field: &'static str, values: &[f64], min: f64, max: f64) -> Result<()> {
    check_finite(field, values)?;
    match values.iter().position(|v| !(min..=max).contains(v)) {
        Some(index) => Err(GroundwaterError::OutOfBounds {
            field,
            index,
            value: values[index],
            min,
            max,
        }),
        None => Ok(()),
    }
}

/// Finite and not below `-drift_tolerance`.
pub fn check_storage(field: &'static str, values: &[f64], drift_tolerance: f64) -> Result<()> {
    check_finite(field, values)?;
    match values.iter().position(|&v| v < -drift_tolerance) {
        Some(index) => Err(GroundwaterError::Negative {
            field,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_mismatch_reports_field() {
        let err = check_len("area", &[1.0, 2.0], 3).unwrap_err();
        assert!(matches!(
            err,
            GroundwaterError::LengthMismatch {
                field: "area",
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn non_finite_reports_first_index() {
        let err = check_finite("soil_to_gw", &[0.0, f64::INFINITY, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            GroundwaterError::NonFinite { field: "soil_to_gw", index: 1, .. }
        ));
    }

    #[test]
    fn negative_rejected() {
        let err = check_non_negative("dprst_seep", &[0.0, 1.0, -0.5]).unwrap_err();
        assert!(matches!(
            err,
            GroundwaterError::Negative { field: "dprst_seep", index: 2, .. }
        ));
        assert!(check_non_negative("dprst_seep", &[0.0, 1.0]).is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(check_bounds("sink_coef", &[0.0, 0.5, 1.0], 0.0, 1.0).is_ok());
        let err = check_bounds("sink_coef", &[0.5, 1.01], 0.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("sink_coef[1]"));
    }

    #[test]
    fn storage_allows_small_drift() {
        assert!(check_storage("storage_prev", &[-1.0e-9, 3.0], 1.0e-6).is_ok());
        assert!(check_storage("storage_prev", &[-1.0e-3], 1.0e-6).is_err());
    }
}
