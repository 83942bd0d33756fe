//! Run configuration.
//!
//! Selects the execution backend, the water budget policy and the numerical
//! tolerances. Loadable from JSON.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GroundwaterError, Result};
use crate::groundwater::constants::{BUDGET_TOLERANCE, CLAMP_EPSILON};

/// Execution backend for the per-HRU map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcMethod {
    #[default]
    Serial,
    /// rayon data-parallel map over HRUs.
    Parallel,
}

impl FromStr for CalcMethod {
    type Err = GroundwaterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serial" => Ok(Self::Serial),
            "parallel" => Ok(Self::Parallel),
            _ => Err(GroundwaterError::InvalidCalcMethod(s.to_string())),
        }
    }
}

impl fmt::Display for CalcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.write_str("serial"),
            Self::Parallel => f.write_str("parallel"),
        }
    }
}

/// What to do when a step fails the water budget check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetType {
    /// Accumulate totals, skip the check.
    None,
    /// Log each imbalance and continue.
    #[default]
    Warn,
    /// Stop the run on the first imbalance.
    Error,
}

impl FromStr for BudgetType {
    type Err = GroundwaterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(GroundwaterError::InvalidBudgetType(s.to_string())),
        }
    }
}

/// Settings for a kernel call or a scheduled run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub calc_method: CalcMethod,
    pub budget_type: BudgetType,
    /// Residual storage below this is set to zero [inches].
    pub clamp_epsilon: f64,
    /// Relative tolerance of the per-step budget check.
    pub budget_tolerance: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            calc_method: CalcMethod::default(),
            budget_type: BudgetType::default(),
            clamp_epsilon: CLAMP_EPSILON,
            budget_tolerance: BUDGET_TOLERANCE,
        }
    }
}

impl RunConfig {
    pub fn with_calc_method(mut self, calc_method: CalcMethod) -> Self {
        self.calc_method = calc_method;
        self
    }

    pub fn with_budget_type(mut self, budget_type: BudgetType) -> Self {
        self.budget_type = budget_type;
        self
    }

    /// Parse a JSON document. Missing keys take their default.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Load from a JSON file, falling back to defaults if it is missing or
    /// malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Run configuration {:?} not found, using defaults", path);
            return Self::default();
        }
        match Self::from_json_file(path) {
            Ok(config) => {
                log::info!("Loaded run configuration from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Failed to load run configuration: {}, using defaults", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        crate::validation::check_non_negative("clamp_epsilon", &[self.clamp_epsilon])?;
        crate::validation::check_non_negative("budget_tolerance", &[self.budget_tolerance])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_method_parses_case_insensitively() {
        assert_eq!("Serial".parse::<CalcMethod>().unwrap(), CalcMethod::Serial);
        assert_eq!(" parallel ".parse::<CalcMethod>().unwrap(), CalcMethod::Parallel);
    }

    #[test]
    fn unknown_calc_method_is_rejected() {
        let err = "gpu".parse::<CalcMethod>().unwrap_err();
        assert!(err.to_string().contains("gpu"));
    }

    #[test]
    fn budget_type_parses() {
        assert_eq!("none".parse::<BudgetType>().unwrap(), BudgetType::None);
        assert_eq!("WARN".parse::<BudgetType>().unwrap(), BudgetType::Warn);
        assert_eq!("error".parse::<BudgetType>().unwrap(), BudgetType::Error);
        assert!("strict".parse::<BudgetType>().is_err());
    }

    #[test]
    fn defaults() {
        let c = RunConfig::default();
        assert_eq!(c.calc_method, CalcMethod::Serial);
        assert_eq!(c.budget_type, BudgetType::Warn);
        assert_eq!(c.clamp_epsilon, CLAMP_EPSILON);
    }

    #[test]
    fn json_partial_document_fills_defaults() {
        let c = RunConfig::from_json_str(r#"{"calc_method": "parallel"}"#).unwrap();
        assert_eq!(c.calc_method, CalcMethod::Parallel);
        assert_eq!(c.budget_type, BudgetType::Warn);
        assert_eq!(c.budget_tolerance, BUDGET_TOLERANCE);
    }

    #[test]
    fn json_rejects_unknown_method() {
        assert!(RunConfig::from_json_str(r#"{"calc_method": "numba"}"#).is_err());
    }

    #[test]
    fn json_rejects_negative_epsilon() {
        assert!(RunConfig::from_json_str(r#"{"clamp_epsilon": -1.0}"#).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let c = RunConfig::load_or_default("does/not/exist/run.json");
        assert_eq!(c, RunConfig::default());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for m in [CalcMethod::Serial, CalcMethod::Parallel] {
            assert_eq!(m.to_string().parse::<CalcMethod>().unwrap(), m);
        }
    }
}
