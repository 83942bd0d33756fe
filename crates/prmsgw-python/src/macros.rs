/// Generate a frozen `#[pyclass]` struct where each field is a `Py<PyArray1<f64>>`.
///
/// Also generates a `from_columns()` method that moves each column out of
/// the core structure-of-arrays output.
macro_rules! define_columns_result {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident from $core_type:ty {
            $($field:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[pyo3::pyclass(frozen)]
        $vis struct $name {
            $(
                #[pyo3(get)]
                pub $field: Py<numpy::PyArray1<f64>>,
            )+
        }

        impl $name {
            pub fn from_columns(py: pyo3::Python<'_>, cols: $core_type) -> Self {
                Self {
                    $(
                        $field: numpy::PyArray1::from_vec(py, cols.$field).unbind(),
                    )+
                }
            }
        }
    };
}

/// Convert structure-of-arrays columns into a `PyDict` of 1-D arrays.
macro_rules! columns_to_dict {
    ($py:expr, $cols:expr, $($field:ident),+ $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(
            dict.set_item(stringify!($field), numpy::PyArray1::from_vec($py, $cols.$field))?;
        )+
        dict
    }};
}

/// Convert flattened `[n_steps × nhru]` columns into a `PyDict` of 2-D arrays.
macro_rules! columns_to_dict_2d {
    ($py:expr, $cols:expr, $n_steps:expr, $nhru:expr, $($field:ident),+ $(,)?) => {{
        let dict = pyo3::types::PyDict::new($py);
        $(
            dict.set_item(
                stringify!($field),
                numpy::PyArray1::from_vec($py, $cols.$field).reshape([$n_steps, $nhru])?,
            )?;
        )+
        dict
    }};
}
