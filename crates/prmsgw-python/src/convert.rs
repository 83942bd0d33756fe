use numpy::{PyReadonlyArray1, PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use prmsgw_core::GroundwaterError;

/// Map a core error onto `ValueError`.
pub fn value_error(err: GroundwaterError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py>(arr: &'py PyReadonlyArray1<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))
}

/// Validate a C-contiguous `[n_steps, nhru]` array with `nhru` columns and
/// return its row-major slice.
pub fn checked_rows<'py>(
    arr: &'py PyReadonlyArray2<'py, f64>,
    nhru: usize,
    name: &str,
) -> PyResult<&'py [f64]> {
    let shape = arr.shape();
    if shape[1] != nhru {
        return Err(PyValueError::new_err(format!(
            "{} must have {} columns (one per HRU), got {}",
            name, nhru, shape[1]
        )));
    }
    arr.as_slice()
        .map_err(|_| PyValueError::new_err(format!("{} must be C-contiguous", name)))
}
