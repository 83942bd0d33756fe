//! Per-step inbound fluxes for a scheduled run.
//!
//! Each field is a flat row-major `[n_steps × nhru]` array: row `t` holds
//! the values for time step `t`, one per HRU.

use crate::error::{GroundwaterError, Result};
use crate::validation::{check_len, check_non_negative};

#[derive(Debug, Clone)]
pub struct ForcingData {
    pub nhru: usize,
    pub soil_to_gw: Vec<f64>,
    pub ssr_to_gw: Vec<f64>,
    pub dprst_seep: Vec<f64>,
}

/// Borrowed inflows for a single time step.
#[derive(Debug, Clone, Copy)]
pub struct StepInflows<'a> {
    pub soil_to_gw: &'a [f64],
    pub ssr_to_gw: &'a [f64],
    pub dprst_seep: &'a [f64],
}

impl ForcingData {
    /// Create new ForcingData with validation.
    ///
    /// Validates:
    /// - arrays are non-empty and the same length
    /// - the length is a whole number of `nhru`-wide rows
    /// - no NaN, infinite or negative values
    pub fn new(
        nhru: usize,
        soil_to_gw: Vec<f64>,
        ssr_to_gw: Vec<f64>,
        dprst_seep: Vec<f64>,
    ) -> Result<Self> {
        if soil_to_gw.is_empty() || nhru == 0 {
            return Err(GroundwaterError::EmptyForcing);
        }
        if soil_to_gw.len() % nhru != 0 {
            return Err(GroundwaterError::ForcingShape {
                field: "soil_to_gw",
                len: soil_to_gw.len(),
                nhru,
            });
        }
        check_len("ssr_to_gw", &ssr_to_gw, soil_to_gw.len())?;
        check_len("dprst_seep", &dprst_seep, soil_to_gw.len())?;

        check_non_negative("soil_to_gw", &soil_to_gw)?;
        check_non_negative("ssr_to_gw", &ssr_to_gw)?;
        check_non_negative("dprst_seep", &dprst_seep)?;

        Ok(Self {
            nhru,
            soil_to_gw,
            ssr_to_gw,
            dprst_seep,
        })
    }

    /// Number of time steps.
    pub fn n_steps(&self) -> usize {
        self.soil_to_gw.len() / self.nhru
    }

    /// Inflows for time step `t`. Panics if `t >= n_steps()`.
    pub fn step(&self, t: usize) -> StepInflows<'_> {
        let rows = t * self.nhru..(t + 1) * self.nhru;
        StepInflows {
            soil_to_gw: &self.soil_to_gw[rows.clone()],
            ssr_to_gw: &self.ssr_to_gw[rows.clone()],
            dprst_seep: &self.dprst_seep[rows],
        }
    }

    /// Iterate over every time step in order.
    pub fn steps(&self) -> impl Iterator<Item = StepInflows<'_>> {
        (0..self.n_steps()).map(move |t| self.step(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Valid construction --

    #[test]
    fn valid_forcing_data() {
        let fd = ForcingData::new(
            2,
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![0.0; 6],
            vec![0.5; 6],
        )
        .unwrap();
        assert_eq!(fd.n_steps(), 3);
        assert_eq!(fd.step(1).soil_to_gw, &[3.0, 4.0]);
        assert_eq!(fd.steps().count(), 3);
    }

    // -- Validation --

    #[test]
    fn rejects_empty_arrays() {
        let fd = ForcingData::new(2, vec![], vec![], vec![]);
        assert!(matches!(fd, Err(GroundwaterError::EmptyForcing)));
    }

    #[test]
    fn rejects_partial_row() {
        let fd = ForcingData::new(2, vec![1.0; 3], vec![0.0; 3], vec![0.0; 3]);
        assert!(matches!(fd, Err(GroundwaterError::ForcingShape { .. })));
    }

    #[test]
    fn rejects_length_mismatch() {
        let fd = ForcingData::new(1, vec![1.0; 3], vec![0.0; 2], vec![0.0; 3]);
        assert!(matches!(
            fd,
            Err(GroundwaterError::LengthMismatch { field: "ssr_to_gw", .. })
        ));
    }

    #[test]
    fn rejects_nan() {
        let fd = ForcingData::new(1, vec![1.0, f64::NAN], vec![0.0; 2], vec![0.0; 2]);
        assert!(fd.unwrap_err().to_string().contains("not finite"));
    }

    #[test]
    fn rejects_negative_seepage() {
        let fd = ForcingData::new(1, vec![1.0; 2], vec![0.0; 2], vec![0.0, -2.0]);
        assert!(matches!(
            fd,
            Err(GroundwaterError::Negative { field: "dprst_seep", index: 1, .. })
        ));
    }
}
