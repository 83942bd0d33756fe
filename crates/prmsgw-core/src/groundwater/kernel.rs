//! Groundwater reservoir update kernel.
//!
//! Advances one linear reservoir per HRU by one time step. HRUs are
//! independent, so the map over them runs either serially or with rayon and
//! gives identical results either way. The kernel holds no state: the caller
//! threads `storage_next` into the next call's `storage_prev`.

use rayon::prelude::*;

use super::constants::{INFLOW_COEF_BOUNDS, SINK_COEF_BOUNDS, STORAGE_DRIFT_TOLERANCE};
use super::fluxes::{HruFluxes, KernelOutput};
use super::processes;
use crate::config::CalcMethod;
use crate::error::Result;
use crate::validation::{check_bounds, check_len, check_non_negative, check_storage};

/// Borrowed per-HRU inputs for one kernel call. Every slice has one entry
/// per HRU, in the same HRU order.
#[derive(Debug, Clone, Copy)]
pub struct KernelInputs<'a> {
    pub area: &'a [f64],
    pub soil_to_gw: &'a [f64],
    pub ssr_to_gw: &'a [f64],
    pub dprst_seep: &'a [f64],
    pub storage_prev: &'a [f64],
    pub inflow_coef: &'a [f64],
    pub sink_coef: &'a [f64],
    pub unit_conv: &'a [f64],
}

impl KernelInputs<'_> {
    /// Number of HRUs, taken from `area`.
    pub fn nhru(&self) -> usize {
        self.area.len()
    }

    /// Check every precondition before any computation.
    pub fn validate(&self) -> Result<()> {
        let nhru = self.nhru();
        check_len("soil_to_gw", self.soil_to_gw, nhru)?;
        check_len("ssr_to_gw", self.ssr_to_gw, nhru)?;
        check_len("dprst_seep", self.dprst_seep, nhru)?;
        check_len("storage_prev", self.storage_prev, nhru)?;
        check_len("inflow_coef", self.inflow_coef, nhru)?;
        check_len("sink_coef", self.sink_coef, nhru)?;
        check_len("unit_conv", self.unit_conv, nhru)?;

        check_non_negative("area", self.area)?;
        check_non_negative("soil_to_gw", self.soil_to_gw)?;
        check_non_negative("ssr_to_gw", self.ssr_to_gw)?;
        check_non_negative("dprst_seep", self.dprst_seep)?;
        check_storage("storage_prev", self.storage_prev, STORAGE_DRIFT_TOLERANCE)?;
        check_bounds(
            "inflow_coef",
            self.inflow_coef,
            INFLOW_COEF_BOUNDS.min,
            INFLOW_COEF_BOUNDS.max,
        )?;
        check_bounds(
            "sink_coef",
            self.sink_coef,
            SINK_COEF_BOUNDS.min,
            SINK_COEF_BOUNDS.max,
        )?;
        check_non_negative("unit_conv", self.unit_conv)?;
        Ok(())
    }
}

/// Advance the reservoir of HRU `i` by one step. Inputs are assumed valid.
#[inline]
pub fn update_hru(inputs: &KernelInputs<'_>, i: usize, clamp_epsilon: f64) -> HruFluxes {
    let storage_prev = inputs.storage_prev[i];

    let inflow =
        processes::total_inflow(inputs.soil_to_gw[i], inputs.ssr_to_gw[i], inputs.dprst_seep[i]);
    let storage = processes::provisional_storage(storage_prev, inflow);

    let (baseflow, sink_flow) =
        processes::discharge(storage, inputs.inflow_coef[i], inputs.sink_coef[i]);

    let storage_next = processes::residual_storage(storage, baseflow, sink_flow, clamp_epsilon);

    HruFluxes {
        storage_next,
        baseflow,
        sink_flow,
        storage_change: storage_next - storage_prev,
        baseflow_volume: processes::baseflow_volume(baseflow, inputs.unit_conv[i]),
    }
}

/// Advance every HRU by one step.
///
/// Fails before computing anything if an input is malformed; otherwise
/// always returns one result per HRU.
pub fn calculate(
    inputs: &KernelInputs<'_>,
    method: CalcMethod,
    clamp_epsilon: f64,
) -> Result<KernelOutput> {
    inputs.validate()?;
    check_non_negative("clamp_epsilon", &[clamp_epsilon])?;
    let nhru = inputs.nhru();

    let output: KernelOutput = match method {
        CalcMethod::Serial => (0..nhru)
            .map(|i| update_hru(inputs, i, clamp_epsilon))
            .collect(),
        CalcMethod::Parallel => {
            let rows: Vec<HruFluxes> = (0..nhru)
                .into_par_iter()
                .map(|i| update_hru(inputs, i, clamp_epsilon))
                .collect();
            rows.into_iter().collect()
        }
    };

    Ok(output)
}
