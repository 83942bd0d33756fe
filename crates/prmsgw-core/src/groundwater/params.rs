//! Groundwater reservoir static parameters.
//!
//! One entry per HRU in each field, supplied once at model initialization:
//! - `area`: HRU area [acres]
//! - `inflow_coef`: baseflow linear-reservoir coefficient [fraction/day]
//! - `sink_coef`: sink linear-reservoir coefficient [fraction/day]
//! - `unit_conv`: depth rate → volumetric rate factor [ft³/s per inch/day]
//! - `storage_init`: initial reservoir storage [inches]

use serde::{Deserialize, Serialize};

use super::constants::{
    ACRE_INCH_PER_DAY_TO_CFS, INFLOW_COEF_BOUNDS, SINK_COEF_BOUNDS, STORAGE_DRIFT_TOLERANCE,
};
use crate::error::Result;
use crate::validation::{check_bounds, check_len, check_non_negative, check_storage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub area: Vec<f64>,
    pub inflow_coef: Vec<f64>,
    pub sink_coef: Vec<f64>,
    pub unit_conv: Vec<f64>,
    pub storage_init: Vec<f64>,
}

impl Parameters {
    /// Create new Parameters, returning an error if any field is the wrong
    /// length or holds an inadmissible value.
    pub fn new(
        area: Vec<f64>,
        inflow_coef: Vec<f64>,
        sink_coef: Vec<f64>,
        unit_conv: Vec<f64>,
        storage_init: Vec<f64>,
    ) -> Result<Self> {
        let params = Self {
            area,
            inflow_coef,
            sink_coef,
            unit_conv,
            storage_init,
        };
        params.validate()?;
        Ok(params)
    }

    /// Create Parameters deriving `unit_conv` from `area` for a daily step.
    pub fn from_area(
        area: Vec<f64>,
        inflow_coef: Vec<f64>,
        sink_coef: Vec<f64>,
        storage_init: Vec<f64>,
    ) -> Result<Self> {
        let unit_conv = area.iter().map(|a| a * ACRE_INCH_PER_DAY_TO_CFS).collect();
        Self::new(area, inflow_coef, sink_coef, unit_conv, storage_init)
    }

    /// Number of HRUs.
    pub fn nhru(&self) -> usize {
        self.area.len()
    }

    /// Re-run the construction checks, e.g. after deserialising.
    pub fn validate(&self) -> Result<()> {
        let nhru = self.nhru();
        check_len("inflow_coef", &self.inflow_coef, nhru)?;
        check_len("sink_coef", &self.sink_coef, nhru)?;
        check_len("unit_conv", &self.unit_conv, nhru)?;
        check_len("storage_init", &self.storage_init, nhru)?;

        check_non_negative("area", &self.area)?;
        check_bounds(
            "inflow_coef",
            &self.inflow_coef,
            INFLOW_COEF_BOUNDS.min,
            INFLOW_COEF_BOUNDS.max,
        )?;
        check_bounds(
            "sink_coef",
            &self.sink_coef,
            SINK_COEF_BOUNDS.min,
            SINK_COEF_BOUNDS.max,
        )?;
        check_non_negative("unit_conv", &self.unit_conv)?;
        check_storage("storage_init", &self.storage_init, STORAGE_DRIFT_TOLERANCE)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroundwaterError;

    fn two_hrus() -> Result<Parameters> {
        Parameters::new(
            vec![100.0, 250.0],
            vec![0.1, 0.02],
            vec![0.0, 0.01],
            vec![1.0, 2.5],
            vec![5.0, 0.0],
        )
    }

    #[test]
    fn valid_parameters() {
        let p = two_hrus().unwrap();
        assert_eq!(p.nhru(), 2);
        assert_eq!(p.inflow_coef[0], 0.1);
    }

    #[test]
    fn boundary_coefficients_are_valid() {
        let p = Parameters::new(
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0, 0.0],
        );
        assert!(p.is_ok());
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Parameters::new(
            vec![1.0, 2.0],
            vec![0.1],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GroundwaterError::LengthMismatch { field: "inflow_coef", .. }
        ));
    }

    #[test]
    fn rejects_coefficient_above_one() {
        let err = Parameters::new(vec![1.0], vec![1.5], vec![0.0], vec![1.0], vec![0.0])
            .unwrap_err();
        assert!(matches!(
            err,
            GroundwaterError::OutOfBounds { field: "inflow_coef", index: 0, .. }
        ));
    }

    #[test]
    fn rejects_negative_area() {
        let err = Parameters::new(vec![-1.0], vec![0.1], vec![0.0], vec![1.0], vec![0.0])
            .unwrap_err();
        assert!(matches!(err, GroundwaterError::Negative { field: "area", .. }));
    }

    #[test]
    fn rejects_nan_sink_coef() {
        let err = Parameters::new(vec![1.0], vec![0.1], vec![f64::NAN], vec![1.0], vec![0.0])
            .unwrap_err();
        assert!(matches!(err, GroundwaterError::NonFinite { field: "sink_coef", .. }));
    }

    #[test]
    fn from_area_derives_unit_conv() {
        let p = Parameters::from_area(vec![640.0], vec![0.1], vec![0.0], vec![0.0]).unwrap();
        // one square mile, one inch/day ≈ 26.89 cfs
        assert!((p.unit_conv[0] - 26.888_888_888_888_89).abs() < 1e-9);
    }

    #[test]
    fn deserialised_parameters_can_be_validated() {
        let json = r#"{"area":[1.0],"inflow_coef":[2.0],"sink_coef":[0.0],
                       "unit_conv":[1.0],"storage_init":[0.0]}"#;
        let p: Parameters = serde_json::from_str(json).unwrap();
        assert!(p.validate().is_err());
    }
}
