//! prmsgw - PRMS groundwater reservoir kernel in Rust.
//!
//! A vectorized per-HRU linear-reservoir update, with a scheduler that
//! threads storage through time and a running water budget.
pub mod budget;
pub mod config;
pub mod error;
pub mod forcing;
pub mod groundwater;
pub mod traits;
pub mod validation;

pub use config::{BudgetType, CalcMethod, RunConfig};
pub use error::{GroundwaterError, Result};
