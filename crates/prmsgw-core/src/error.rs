//! Error type shared by the kernel, scheduler, budget and configuration.

use thiserror::Error;

/// Errors raised by prmsgw.
///
/// Contract violations are reported before any computation starts and name
/// the offending field and HRU index.
#[derive(Debug, Error)]
pub enum GroundwaterError {
    /// An input sequence does not have one entry per HRU.
    #[error("{field} has {actual} elements, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// NaN or infinite input value.
    #[error("{field}[{index}] = {value} is not finite")]
    NonFinite {
        field: &'static str,
        index: usize,
        value: f64,
    },

    /// Negative value in a field that must be non-negative.
    #[error("{field}[{index}] = {value} is negative")]
    Negative {
        field: &'static str,
        index: usize,
        value: f64,
    },

    /// Coefficient outside its admissible range.
    #[error("{field}[{index}] = {value} is out of bounds [{min}, {max}]")]
    OutOfBounds {
        field: &'static str,
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Forcing data with no time steps.
    #[error("forcing data has no time steps")]
    EmptyForcing,

    /// Flat forcing array that cannot be split into rows of `nhru`.
    #[error("{field} has {len} elements, not a multiple of nhru = {nhru}")]
    ForcingShape {
        field: &'static str,
        len: usize,
        nhru: usize,
    },

    #[error("invalid calc_method '{0}', expected 'serial' or 'parallel'")]
    InvalidCalcMethod(String),

    #[error("invalid budget_type '{0}', expected 'none', 'warn' or 'error'")]
    InvalidBudgetType(String),

    /// Water budget residual above tolerance.
    #[error("water budget imbalance at step {step}, HRU {index}: residual {residual:e}")]
    BudgetImbalance {
        step: usize,
        index: usize,
        residual: f64,
    },

    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GroundwaterError>;
