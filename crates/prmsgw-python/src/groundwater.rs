use numpy::{PyArray1, PyArrayMethods, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::convert::{checked_rows, contiguous_slice, value_error};

use prmsgw_core::forcing::{ForcingData, StepInflows};
use prmsgw_core::groundwater::kernel::{self, KernelInputs};
use prmsgw_core::groundwater::params::Parameters;
use prmsgw_core::groundwater::run;
use prmsgw_core::groundwater::state::State;
use prmsgw_core::groundwater::Groundwater;
use prmsgw_core::traits::StorageUnit;
use prmsgw_core::{BudgetType, CalcMethod, RunConfig};

// ---------------------------------------------------------------------------
// Typed pyclass result objects
// ---------------------------------------------------------------------------

define_columns_result! {
    /// Groundwater kernel results, one numpy array per output variable.
    pub struct GroundwaterResult from prmsgw_core::groundwater::fluxes::KernelOutput {
        storage_next, baseflow, sink_flow, storage_change, baseflow_volume,
    }
}

// ---------------------------------------------------------------------------
// Kernel, step and run
// ---------------------------------------------------------------------------

#[pyfunction]
#[pyo3(signature = (
    area, soil_to_gw, ssr_to_gw, dprst_seep, storage_prev,
    inflow_coef, sink_coef, unit_conv, calc_method="serial"
))]
#[allow(clippy::too_many_arguments)]
fn gwres_calculate<'py>(
    py: Python<'py>,
    area: PyReadonlyArray1<'py, f64>,
    soil_to_gw: PyReadonlyArray1<'py, f64>,
    ssr_to_gw: PyReadonlyArray1<'py, f64>,
    dprst_seep: PyReadonlyArray1<'py, f64>,
    storage_prev: PyReadonlyArray1<'py, f64>,
    inflow_coef: PyReadonlyArray1<'py, f64>,
    sink_coef: PyReadonlyArray1<'py, f64>,
    unit_conv: PyReadonlyArray1<'py, f64>,
    calc_method: &str,
) -> PyResult<GroundwaterResult> {
    let method: CalcMethod = calc_method.parse().map_err(value_error)?;
    let config = RunConfig::default().with_calc_method(method);

    let inputs = KernelInputs {
        area: contiguous_slice(&area)?,
        soil_to_gw: contiguous_slice(&soil_to_gw)?,
        ssr_to_gw: contiguous_slice(&ssr_to_gw)?,
        dprst_seep: contiguous_slice(&dprst_seep)?,
        storage_prev: contiguous_slice(&storage_prev)?,
        inflow_coef: contiguous_slice(&inflow_coef)?,
        sink_coef: contiguous_slice(&sink_coef)?,
        unit_conv: contiguous_slice(&unit_conv)?,
    };

    let output = py
        .allow_threads(|| kernel::calculate(&inputs, config.calc_method, config.clamp_epsilon))
        .map_err(value_error)?;

    Ok(GroundwaterResult::from_columns(py, output))
}

#[pyfunction]
#[pyo3(signature = (
    storage, area, inflow_coef, sink_coef, unit_conv,
    soil_to_gw, ssr_to_gw, dprst_seep, calc_method="serial"
))]
#[allow(clippy::too_many_arguments)]
fn gwres_step<'py>(
    py: Python<'py>,
    storage: PyReadonlyArray1<'py, f64>,
    area: PyReadonlyArray1<'py, f64>,
    inflow_coef: PyReadonlyArray1<'py, f64>,
    sink_coef: PyReadonlyArray1<'py, f64>,
    unit_conv: PyReadonlyArray1<'py, f64>,
    soil_to_gw: PyReadonlyArray1<'py, f64>,
    ssr_to_gw: PyReadonlyArray1<'py, f64>,
    dprst_seep: PyReadonlyArray1<'py, f64>,
    calc_method: &str,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyDict>)> {
    let method: CalcMethod = calc_method.parse().map_err(value_error)?;
    let config = RunConfig::default().with_calc_method(method);

    let storage = contiguous_slice(&storage)?;
    let p = Parameters::new(
        contiguous_slice(&area)?.to_vec(),
        contiguous_slice(&inflow_coef)?.to_vec(),
        contiguous_slice(&sink_coef)?.to_vec(),
        contiguous_slice(&unit_conv)?.to_vec(),
        storage.to_vec(),
    )
    .map_err(value_error)?;
    let s = State::from_slice(storage, p.nhru()).map_err(value_error)?;

    let inflows = StepInflows {
        soil_to_gw: contiguous_slice(&soil_to_gw)?,
        ssr_to_gw: contiguous_slice(&ssr_to_gw)?,
        dprst_seep: contiguous_slice(&dprst_seep)?,
    };

    let (new_state, output) = run::step(&s, &p, &inflows, &config).map_err(value_error)?;

    let state_arr = PyArray1::from_vec(py, new_state.storage);
    let dict = columns_to_dict!(
        py, output,
        storage_next, baseflow, sink_flow, storage_change, baseflow_volume,
    );
    Ok((state_arr, dict))
}

#[pyfunction]
#[pyo3(signature = (
    area, inflow_coef, sink_coef, unit_conv, storage_init,
    soil_to_gw, ssr_to_gw, dprst_seep, calc_method="serial", budget_type="warn"
))]
#[allow(clippy::too_many_arguments)]
fn gwres_run<'py>(
    py: Python<'py>,
    area: PyReadonlyArray1<'py, f64>,
    inflow_coef: PyReadonlyArray1<'py, f64>,
    sink_coef: PyReadonlyArray1<'py, f64>,
    unit_conv: PyReadonlyArray1<'py, f64>,
    storage_init: PyReadonlyArray1<'py, f64>,
    soil_to_gw: PyReadonlyArray2<'py, f64>,
    ssr_to_gw: PyReadonlyArray2<'py, f64>,
    dprst_seep: PyReadonlyArray2<'py, f64>,
    calc_method: &str,
    budget_type: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let method: CalcMethod = calc_method.parse().map_err(value_error)?;
    let budget: BudgetType = budget_type.parse().map_err(value_error)?;
    let config = RunConfig::default()
        .with_calc_method(method)
        .with_budget_type(budget);

    let p = Parameters::new(
        contiguous_slice(&area)?.to_vec(),
        contiguous_slice(&inflow_coef)?.to_vec(),
        contiguous_slice(&sink_coef)?.to_vec(),
        contiguous_slice(&unit_conv)?.to_vec(),
        contiguous_slice(&storage_init)?.to_vec(),
    )
    .map_err(value_error)?;
    let nhru = p.nhru();

    let forcing = ForcingData::new(
        nhru,
        checked_rows(&soil_to_gw, nhru, "soil_to_gw")?.to_vec(),
        checked_rows(&ssr_to_gw, nhru, "ssr_to_gw")?.to_vec(),
        checked_rows(&dprst_seep, nhru, "dprst_seep")?.to_vec(),
    )
    .map_err(value_error)?;
    let n_steps = forcing.n_steps();

    let result = py
        .allow_threads(|| run::run(&p, &forcing, None, &config))
        .map_err(value_error)?;

    let residual = result.budget.total_residual();
    let flat = result.flattened();
    let dict = columns_to_dict_2d!(
        py, flat, n_steps, nhru,
        storage_next, baseflow, sink_flow, storage_change, baseflow_volume,
    );
    dict.set_item(
        "final_storage",
        PyArray1::from_vec(py, result.final_state.storage),
    )?;
    dict.set_item("budget_residual", residual)?;
    Ok(dict)
}

// ---------------------------------------------------------------------------
// Process contract
// ---------------------------------------------------------------------------

#[pyfunction]
fn gwres_metadata(py: Python<'_>) -> PyResult<Bound<'_, PyDict>> {
    let terms = Groundwater::MASS_BUDGET_TERMS;
    let budget = PyDict::new(py);
    budget.set_item("inputs", terms.inputs.to_vec())?;
    budget.set_item("outputs", terms.outputs.to_vec())?;
    budget.set_item("storage_changes", terms.storage_changes.to_vec())?;

    let dict = PyDict::new(py);
    dict.set_item("name", Groundwater::NAME)?;
    dict.set_item("parameters", Groundwater::PARAMETERS.to_vec())?;
    dict.set_item("inputs", Groundwater::INPUTS.to_vec())?;
    dict.set_item("variables", Groundwater::VARIABLES.to_vec())?;
    dict.set_item("mass_budget_terms", budget)?;
    Ok(dict)
}

/// Build the `groundwater` submodule and attach it to `parent`.
pub fn register<'py>(parent: &Bound<'py, PyModule>) -> PyResult<Bound<'py, PyModule>> {
    let m = PyModule::new(parent.py(), "groundwater")?;
    m.add_function(wrap_pyfunction!(gwres_calculate, &m)?)?;
    m.add_function(wrap_pyfunction!(gwres_step, &m)?)?;
    m.add_function(wrap_pyfunction!(gwres_run, &m)?)?;
    m.add_function(wrap_pyfunction!(gwres_metadata, &m)?)?;
    m.add_class::<GroundwaterResult>()?;
    parent.add_submodule(&m)?;
    Ok(m)
}
