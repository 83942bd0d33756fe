use prmsgw_macros::Fluxes;

#[derive(Debug, Clone, Copy, Fluxes)]
#[fluxes(columns_name = "ReservoirColumns")]
pub struct ReservoirFluxes {
    pub baseflow: f64,
    pub sink_flow: f64,
}

fn main() {
    let cols: ReservoirColumns = (0..4)
        .map(|i| ReservoirFluxes { baseflow: i as f64, sink_flow: 0.5 })
        .collect();
    assert_eq!(cols.len(), 4);
    assert_eq!(cols.baseflow, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(ReservoirFluxes::field_names(), &["baseflow", "sink_flow"]);
}
