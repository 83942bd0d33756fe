//! Groundwater reservoir scheduling.
//!
//! - `step()`: Advance every HRU one time step → (State, KernelOutput)
//! - `run()`: Thread the state through a forcing timeseries → RunOutput
//!
//! The kernel itself stays pure; this module owns the recurrence.

use super::fluxes::KernelOutput;
use super::kernel::{self, KernelInputs};
use super::params::Parameters;
use super::state::State;
use super::Groundwater;
use crate::budget::WaterBudget;
use crate::config::RunConfig;
use crate::error::{GroundwaterError, Result};
use crate::forcing::{ForcingData, StepInflows};
use crate::traits::StorageUnit;

/// Results of a scheduled run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Kernel output of every step, in time order.
    pub steps: Vec<KernelOutput>,
    pub final_state: State,
    pub budget: WaterBudget,
}

impl RunOutput {
    /// Number of time steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no steps were run.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every step concatenated row-major into `[n_steps × nhru]` columns.
    pub fn flattened(&self) -> KernelOutput {
        let n = self.steps.iter().map(KernelOutput::len).sum();
        let mut out = KernelOutput::with_capacity(n);
        for step in &self.steps {
            out.storage_next.extend_from_slice(&step.storage_next);
            out.baseflow.extend_from_slice(&step.baseflow);
            out.sink_flow.extend_from_slice(&step.sink_flow);
            out.storage_change.extend_from_slice(&step.storage_change);
            out.baseflow_volume.extend_from_slice(&step.baseflow_volume);
        }
        out
    }
}

/// Execute one time step for every HRU.
///
/// Takes the current state and this step's inflows, returns the new state
/// and the kernel output. The input state is not modified.
pub fn step(
    state: &State,
    params: &Parameters,
    inflows: &StepInflows<'_>,
    config: &RunConfig,
) -> Result<(State, KernelOutput)> {
    let inputs = KernelInputs {
        area: &params.area,
        soil_to_gw: inflows.soil_to_gw,
        ssr_to_gw: inflows.ssr_to_gw,
        dprst_seep: inflows.dprst_seep,
        storage_prev: &state.storage,
        inflow_coef: &params.inflow_coef,
        sink_coef: &params.sink_coef,
        unit_conv: &params.unit_conv,
    };

    let output = kernel::calculate(&inputs, config.calc_method, config.clamp_epsilon)?;

    let new_state = State {
        storage: output.storage_next.clone(),
    };

    Ok((new_state, output))
}

/// Run the reservoir over a forcing timeseries.
///
/// If no initial state is provided, uses `State::initialize(params)`.
/// Every step is recorded in the water budget; with `BudgetType::Error` the
/// first imbalance aborts the run.
pub fn run(
    params: &Parameters,
    forcing: &ForcingData,
    initial_state: Option<&State>,
    config: &RunConfig,
) -> Result<RunOutput> {
    let nhru = params.nhru();
    if forcing.nhru != nhru {
        return Err(GroundwaterError::LengthMismatch {
            field: "forcing",
            expected: nhru,
            actual: forcing.nhru,
        });
    }

    let mut state = match initial_state {
        Some(s) => s.clone(),
        None => Groundwater::initialize_state(params),
    };

    let n_steps = forcing.n_steps();
    log::debug!(
        "{}: running {} steps over {} HRUs ({})",
        Groundwater::NAME,
        n_steps,
        nhru,
        config.calc_method
    );

    let mut budget = WaterBudget::new(nhru, config.budget_type, config.budget_tolerance);
    let mut steps = Vec::with_capacity(n_steps);

    for inflows in forcing.steps() {
        let (new_state, output) = step(&state, params, &inflows, config)?;
        budget.record(&inflows, &state.storage, &output)?;
        steps.push(output);
        state = new_state;
    }

    log::debug!(
        "{}: finished, cumulative budget residual {:e}",
        Groundwater::NAME,
        budget.total_residual()
    );

    Ok(RunOutput {
        steps,
        final_state: state,
        budget,
    })
}
