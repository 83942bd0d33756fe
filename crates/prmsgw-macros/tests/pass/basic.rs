use prmsgw_macros::Fluxes;

#[derive(Debug, Clone, Copy, PartialEq, Fluxes)]
pub struct TestFluxes {
    pub baseflow: f64,
    pub sink_flow: f64,
    pub storage_next: f64,
}

fn main() {
    let f = TestFluxes { baseflow: 1.0, sink_flow: 2.0, storage_next: 3.0 };
    let mut cols = TestFluxesColumns::with_capacity(10);
    cols.push(&f);
    assert_eq!(cols.len(), 1);
    assert!(!cols.is_empty());
    assert_eq!(cols.row(0), Some(f));
    assert_eq!(cols.row(1), None);
    assert_eq!(TestFluxes::N_FIELDS, 3);
    assert_eq!(TestFluxes::field_names(), &["baseflow", "sink_flow", "storage_next"]);
}
