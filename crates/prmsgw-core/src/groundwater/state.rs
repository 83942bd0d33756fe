//! Groundwater reservoir state.
//!
//! `storage` is carried from one step to the next by the scheduler; the
//! kernel only reads it.

use super::params::Parameters;
use crate::error::Result;
use crate::validation::check_len;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    pub storage: Vec<f64>,
}

impl State {
    /// Initial state from the `storage_init` parameter.
    pub fn initialize(params: &Parameters) -> Self {
        Self {
            storage: params.storage_init.clone(),
        }
    }

    /// Number of HRUs.
    pub fn nhru(&self) -> usize {
        self.storage.len()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.storage.clone()
    }

    pub fn from_slice(arr: &[f64], nhru: usize) -> Result<Self> {
        check_len("storage", arr, nhru)?;
        Ok(Self {
            storage: arr.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_params() -> Parameters {
        Parameters::new(
            vec![10.0, 20.0, 30.0],
            vec![0.1; 3],
            vec![0.0; 3],
            vec![1.0; 3],
            vec![1.0, 2.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn initialize_copies_storage_init() {
        let s = State::initialize(&test_params());
        assert_eq!(s.storage, vec![1.0, 2.0, 3.0]);
        assert_eq!(s.nhru(), 3);
    }

    #[test]
    fn to_vec_from_slice_roundtrip() {
        let s = State::initialize(&test_params());
        let s2 = State::from_slice(&s.to_vec(), 3).unwrap();
        assert_eq!(s, s2);
    }

    #[test]
    fn from_slice_wrong_length() {
        assert!(State::from_slice(&[1.0], 3).is_err());
        assert!(State::from_slice(&[1.0, 2.0, 3.0, 4.0], 3).is_err());
    }
}
