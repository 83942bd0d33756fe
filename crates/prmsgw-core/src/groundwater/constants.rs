//! Groundwater reservoir numerical constants and process contract.
//!
//! Centralises the fixed values used by the kernel, scheduler and budget.

// -- Numerical safeguards --

/// Residual storage magnitudes below this are floating-point noise and are
/// set to zero [inches].
pub const CLAMP_EPSILON: f64 = 1.0e-10;

/// How far below zero an incoming storage may drift from upstream rounding
/// before it is treated as a contract violation [inches].
///
/// Drift is floored away before discharge, which adds at most this much water
/// per HRU per step. Keeping it at the clamp scale holds that gain below the
/// budget tolerance.
pub const STORAGE_DRIFT_TOLERANCE: f64 = CLAMP_EPSILON;

/// Relative tolerance for the per-step water budget check.
pub const BUDGET_TOLERANCE: f64 = 1.0e-9;

// -- Unit conversion --

/// Cubic feet per acre-inch.
pub const CUBIC_FEET_PER_ACRE_INCH: f64 = 43_560.0 / 12.0;

/// Seconds in one daily time step.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts a depth rate [inches/day] over an area [acres] to a volumetric
/// rate [ft³/s].
pub const ACRE_INCH_PER_DAY_TO_CFS: f64 = CUBIC_FEET_PER_ACRE_INCH / SECONDS_PER_DAY;

// -- Process contract --

/// Process name used in log output.
pub const PROCESS_NAME: &str = "groundwater";

/// Static per-HRU parameters, in `Parameters` field order.
pub const PARAM_NAMES: &[&str] = &[
    "area",
    "inflow_coef",
    "sink_coef",
    "unit_conv",
    "storage_init",
];

/// Per-step inbound fluxes supplied by upstream processes.
pub const INPUT_NAMES: &[&str] = &["soil_to_gw", "ssr_to_gw", "dprst_seep"];

/// Variables produced by the kernel every step.
pub const VARIABLE_NAMES: &[&str] = &[
    "storage_next",
    "baseflow",
    "sink_flow",
    "storage_change",
    "baseflow_volume",
];

/// Mass budget inflow terms.
pub const BUDGET_INPUTS: &[&str] = &["soil_to_gw", "ssr_to_gw", "dprst_seep"];

/// Mass budget outflow terms.
pub const BUDGET_OUTPUTS: &[&str] = &["baseflow", "sink_flow"];

/// Mass budget storage terms.
pub const BUDGET_STORAGE_CHANGES: &[&str] = &["storage_change"];

// -- Coefficient bounds --

/// Admissible range of a linear-reservoir coefficient.
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Baseflow coefficient [fraction/day].
pub const INFLOW_COEF_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };

/// Sink coefficient [fraction/day].
pub const SINK_COEF_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };
