/// Names of the terms that enter a process's mass budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MassBudgetTerms {
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub storage_changes: &'static [&'static str],
}

/// Core trait for per-HRU storage processes advanced by a scheduler.
///
/// Publishes the process contract (parameters, inputs, variables, budget
/// terms) and how to build the state the scheduler carries between steps.
pub trait StorageUnit {
    type Params;
    type State: Clone;

    /// Process name used in logs and bindings.
    const NAME: &'static str;
    /// Static per-HRU parameters.
    const PARAMETERS: &'static [&'static str];
    /// Per-step inputs supplied by upstream processes.
    const INPUTS: &'static [&'static str];
    /// Variables produced every step.
    const VARIABLES: &'static [&'static str];
    const MASS_BUDGET_TERMS: MassBudgetTerms;

    /// Create the initial state from parameters.
    fn initialize_state(params: &Self::Params) -> Self::State;
}
