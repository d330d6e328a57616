//! Python bindings (feature `pyo3`).

pub mod generator;

use crate::error::StochasticError;
use pyo3::exceptions::{PyNotImplementedError, PyValueError};
use pyo3::PyErr;

impl From<StochasticError> for PyErr {
    fn from(err: StochasticError) -> Self {
        match err {
            StochasticError::UnsupportedOperation(_) => {
                PyNotImplementedError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
