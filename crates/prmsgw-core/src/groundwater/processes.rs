//! Groundwater reservoir process functions.
//!
//! Pure scalar functions for one HRU and one time step. The kernel maps
//! them over every HRU.

/// Step 1: Total water entering the reservoir this step [inches].
#[inline]
pub fn total_inflow(soil_to_gw: f64, ssr_to_gw: f64, dprst_seep: f64) -> f64 {
    soil_to_gw + ssr_to_gw + dprst_seep
}

/// Step 2: Storage available for discharge [inches].
///
/// A negative result can only come from sub-tolerance drift in the incoming
/// storage, so it is floored at zero.
#[inline]
pub fn provisional_storage(storage_prev: f64, inflow: f64) -> f64 {
    (storage_prev + inflow).max(0.0)
}

/// Steps 3-4: Linear-reservoir discharge.
///
/// Returns (baseflow, sink_flow). When the two terms together would exceed
/// the available storage they are scaled down by the same factor so that
/// their sum equals `storage` and their ratio is unchanged.
#[inline]
pub fn discharge(storage: f64, inflow_coef: f64, sink_coef: f64) -> (f64, f64) {
    let baseflow = storage * inflow_coef;
    let sink_flow = storage * sink_coef;
    let total = baseflow + sink_flow;

    if total > storage {
        let scale = storage / total;
        (baseflow * scale, sink_flow * scale)
    } else {
        (baseflow, sink_flow)
    }
}

/// Step 5: Storage left after discharge, with round-off floored at zero.
///
/// Negative remainders are zeroed whatever `epsilon` is.
#[inline]
pub fn residual_storage(storage: f64, baseflow: f64, sink_flow: f64, epsilon: f64) -> f64 {
    let remaining = storage - baseflow - sink_flow;
    // f64::max drops a NaN epsilon
    if remaining < epsilon.max(0.0) {
        // covers tiny positives and every negative residual
        0.0
    } else {
        remaining
    }
}

/// Step 7: Baseflow as a volumetric rate.
#[inline]
pub fn baseflow_volume(baseflow: f64, unit_conv: f64) -> f64 {
    baseflow * unit_conv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groundwater::constants::CLAMP_EPSILON;

    fn assert_approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected} ± {tol}, got {actual}"
        );
    }

    // -- Inflow --

    #[test]
    fn inflow_sums_three_terms() {
        assert_approx(total_inflow(1.0, 0.25, 0.5), 1.75, 1e-12);
    }

    #[test]
    fn provisional_floors_drift() {
        assert_eq!(provisional_storage(-1.0e-9, 0.0), 0.0);
        assert_approx(provisional_storage(10.0, 2.0), 12.0, 1e-12);
    }

    // -- Discharge --

    #[test]
    fn discharge_is_linear_when_storage_suffices() {
        let (q, sink) = discharge(12.0, 0.1, 0.05);
        assert_approx(q, 1.2, 1e-12);
        assert_approx(sink, 0.6, 1e-12);
    }

    #[test]
    fn over_discharge_is_scaled_to_storage() {
        let (q, sink) = discharge(0.5, 0.9, 0.9);
        assert_approx(q, 0.25, 1e-12);
        assert_approx(sink, 0.25, 1e-12);
        assert_approx(q + sink, 0.5, 1e-12);
    }

    #[test]
    fn over_discharge_preserves_ratio() {
        let (q, sink) = discharge(3.0, 0.8, 0.4);
        assert_approx(q / sink, 2.0, 1e-12);
        assert_approx(q + sink, 3.0, 1e-12);
    }

    #[test]
    fn discharge_of_empty_store_is_zero() {
        assert_eq!(discharge(0.0, 0.9, 0.9), (0.0, 0.0));
    }

    #[test]
    fn exact_full_discharge_is_not_scaled() {
        let (q, sink) = discharge(4.0, 0.75, 0.25);
        assert_approx(q, 3.0, 1e-12);
        assert_approx(sink, 1.0, 1e-12);
    }

    // -- Residual --

    #[test]
    fn residual_clamps_round_off() {
        assert_eq!(residual_storage(0.3, 0.1, 0.2, CLAMP_EPSILON), 0.0);
        assert_eq!(residual_storage(1.0, 0.6, 0.4 + 1.0e-15, CLAMP_EPSILON), 0.0);
    }

    #[test]
    fn residual_never_negative_for_bad_epsilon() {
        for eps in [f64::NAN, -1.0, f64::NEG_INFINITY] {
            assert_eq!(residual_storage(1.0, 0.6, 0.4 + 1.0e-15, eps), 0.0);
        }
        assert_approx(residual_storage(12.0, 1.2, 0.6, f64::NAN), 10.2, 1e-12);
    }

    #[test]
    fn residual_keeps_real_storage() {
        assert_approx(residual_storage(12.0, 1.2, 0.6, CLAMP_EPSILON), 10.2, 1e-12);
    }

    // -- Volume --

    #[test]
    fn volume_uses_conversion_factor() {
        assert_approx(baseflow_volume(1.5, 2.0), 3.0, 1e-12);
        assert_eq!(baseflow_volume(0.0, 123.0), 0.0);
    }
}
