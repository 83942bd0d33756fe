//! Groundwater reservoir kernel outputs.
//!
//! `HruFluxes` holds one HRU for one step; the derived `KernelOutput` holds
//! every HRU as separate columns, which is what the kernel returns.

use prmsgw_macros::Fluxes;

#[derive(Debug, Clone, Copy, PartialEq, Fluxes)]
#[fluxes(columns_name = "KernelOutput")]
pub struct HruFluxes {
    pub storage_next: f64,    // reservoir storage at end of step [inches]
    pub baseflow: f64,        // discharge toward channel routing [inches]
    pub sink_flow: f64,       // irrecoverable loss [inches]
    pub storage_change: f64,  // storage_next - storage_prev [inches]
    pub baseflow_volume: f64, // baseflow * unit_conv [ft³/s]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groundwater::constants::VARIABLE_NAMES;

    #[test]
    fn field_names_match_variables() {
        assert_eq!(HruFluxes::field_names(), VARIABLE_NAMES);
        assert_eq!(HruFluxes::N_FIELDS, VARIABLE_NAMES.len());
    }

    #[test]
    fn columns_collect_rows_in_order() {
        let rows = [
            HruFluxes {
                storage_next: 1.0,
                baseflow: 0.1,
                sink_flow: 0.01,
                storage_change: 0.5,
                baseflow_volume: 2.0,
            },
            HruFluxes {
                storage_next: 2.0,
                baseflow: 0.2,
                sink_flow: 0.02,
                storage_change: -0.5,
                baseflow_volume: 4.0,
            },
        ];
        let out: KernelOutput = rows.iter().copied().collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out.baseflow, vec![0.1, 0.2]);
        assert_eq!(out.row(1), Some(rows[1]));
    }
}
