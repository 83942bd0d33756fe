//! PRMS groundwater reservoir.
//!
//! One linear reservoir per HRU, filled by soil-zone drainage, gravity
//! reservoir drainage and depression-storage seepage, and drained by
//! baseflow toward the channel and an irrecoverable sink.

pub mod constants;
pub mod fluxes;
pub mod kernel;
pub mod params;
pub mod processes;
pub mod run;
pub mod state;

use constants::{
    BUDGET_INPUTS, BUDGET_OUTPUTS, BUDGET_STORAGE_CHANGES, INPUT_NAMES, PARAM_NAMES,
    PROCESS_NAME, VARIABLE_NAMES,
};

use crate::traits::{MassBudgetTerms, StorageUnit};

/// Marker type carrying the groundwater process contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct Groundwater;

impl StorageUnit for Groundwater {
    type Params = params::Parameters;
    type State = state::State;

    const NAME: &'static str = PROCESS_NAME;
    const PARAMETERS: &'static [&'static str] = PARAM_NAMES;
    const INPUTS: &'static [&'static str] = INPUT_NAMES;
    const VARIABLES: &'static [&'static str] = VARIABLE_NAMES;
    const MASS_BUDGET_TERMS: MassBudgetTerms = MassBudgetTerms {
        inputs: BUDGET_INPUTS,
        outputs: BUDGET_OUTPUTS,
        storage_changes: BUDGET_STORAGE_CHANGES,
    };

    fn initialize_state(params: &Self::Params) -> Self::State {
        state::State::initialize(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_terms_are_known_names() {
        let terms = Groundwater::MASS_BUDGET_TERMS;
        for name in terms.inputs {
            assert!(Groundwater::INPUTS.contains(name));
        }
        for name in terms.outputs.iter().chain(terms.storage_changes) {
            assert!(Groundwater::VARIABLES.contains(name));
        }
    }

    #[test]
    fn initialize_state_uses_storage_init() {
        let p = params::Parameters::new(
            vec![1.0, 1.0],
            vec![0.1, 0.1],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![3.0, 4.0],
        )
        .unwrap();
        assert_eq!(Groundwater::initialize_state(&p).storage, vec![3.0, 4.0]);
    }
}
