//! Running water budget.
//!
//! Accumulates the inflow, outflow and storage-change terms of every step
//! per HRU and for the whole basin, and checks each step for conservation of
//! mass according to the configured [`BudgetType`].

use crate::config::BudgetType;
use crate::error::{GroundwaterError, Result};
use crate::forcing::StepInflows;
use crate::groundwater::constants::PROCESS_NAME;
use crate::groundwater::fluxes::KernelOutput;
use crate::validation::check_len;

#[derive(Debug, Clone, PartialEq)]
pub struct WaterBudget {
    pub budget_type: BudgetType,
    pub tolerance: f64,
    /// Steps recorded so far.
    pub n_steps: usize,
    /// Cumulative inflow per HRU [inches].
    pub inputs: Vec<f64>,
    /// Cumulative baseflow + sink flow per HRU [inches].
    pub outputs: Vec<f64>,
    /// Cumulative storage change per HRU [inches].
    pub storage_change: Vec<f64>,
    /// Cumulative baseflow volume per HRU [ft³/s · steps].
    pub baseflow_volume: Vec<f64>,
    /// Largest absolute step residual seen so far.
    pub max_residual: f64,
}

impl WaterBudget {
    pub fn new(nhru: usize, budget_type: BudgetType, tolerance: f64) -> Self {
        Self {
            budget_type,
            tolerance,
            n_steps: 0,
            inputs: vec![0.0; nhru],
            outputs: vec![0.0; nhru],
            storage_change: vec![0.0; nhru],
            baseflow_volume: vec![0.0; nhru],
            max_residual: 0.0,
        }
    }

    pub fn nhru(&self) -> usize {
        self.inputs.len()
    }

    /// Add one step and check its balance.
    ///
    /// `storage_prev` scales the tolerance so large reservoirs are not held
    /// to an absolute bound. Every slice must have one entry per HRU. With
    /// `BudgetType::Error` nothing is added when the step fails the check.
    pub fn record(
        &mut self,
        inflows: &StepInflows<'_>,
        storage_prev: &[f64],
        output: &KernelOutput,
    ) -> Result<()> {
        let nhru = self.nhru();
        check_len("soil_to_gw", inflows.soil_to_gw, nhru)?;
        check_len("ssr_to_gw", inflows.ssr_to_gw, nhru)?;
        check_len("dprst_seep", inflows.dprst_seep, nhru)?;
        check_len("storage_prev", storage_prev, nhru)?;
        check_len("baseflow", &output.baseflow, nhru)?;
        check_len("sink_flow", &output.sink_flow, nhru)?;
        check_len("storage_change", &output.storage_change, nhru)?;
        check_len("baseflow_volume", &output.baseflow_volume, nhru)?;

        let step = self.n_steps;
        let mut step_inputs = Vec::with_capacity(nhru);
        let mut max_residual = self.max_residual;

        for i in 0..nhru {
            let inflow = inflows.soil_to_gw[i] + inflows.ssr_to_gw[i] + inflows.dprst_seep[i];
            let outflow = output.baseflow[i] + output.sink_flow[i];
            let residual = inflow - outflow - output.storage_change[i];

            let allowed = self.tolerance * (inflow.abs() + storage_prev[i].abs()).max(1.0);
            if residual.abs() > allowed {
                match self.budget_type {
                    BudgetType::None => {}
                    BudgetType::Warn => log::warn!(
                        "{} budget out of balance at step {}, HRU {}: residual {:e}",
                        PROCESS_NAME,
                        step,
                        i,
                        residual
                    ),
                    BudgetType::Error => {
                        return Err(GroundwaterError::BudgetImbalance {
                            step,
                            index: i,
                            residual,
                        })
                    }
                }
            }
            max_residual = max_residual.max(residual.abs());
            step_inputs.push(inflow);
        }

        for (i, inflow) in step_inputs.into_iter().enumerate() {
            self.inputs[i] += inflow;
            self.outputs[i] += output.baseflow[i] + output.sink_flow[i];
            self.storage_change[i] += output.storage_change[i];
            self.baseflow_volume[i] += output.baseflow_volume[i];
        }
        self.max_residual = max_residual;
        self.n_steps += 1;
        Ok(())
    }

    /// Basin-total cumulative inflow.
    pub fn total_inputs(&self) -> f64 {
        self.inputs.iter().sum()
    }

    /// Basin-total cumulative outflow.
    pub fn total_outputs(&self) -> f64 {
        self.outputs.iter().sum()
    }

    /// Basin-total cumulative storage change.
    pub fn total_storage_change(&self) -> f64 {
        self.storage_change.iter().sum()
    }

    /// Basin-total cumulative baseflow volume.
    pub fn total_baseflow_volume(&self) -> f64 {
        self.baseflow_volume.iter().sum()
    }

    /// Basin-total cumulative residual; zero for a conserving run.
    pub fn total_residual(&self) -> f64 {
        self.total_inputs() - self.total_outputs() - self.total_storage_change()
    }
}
