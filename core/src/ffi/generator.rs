//! PyO3 wrapper for generator chains
//!
//! Exposes registry construction, serialization and drawing to Python. The
//! Python object owns its chain outright; draws never cross the boundary as
//! anything but plain integers and floats.

use pyo3::prelude::*;

use crate::generator::Generator;
use crate::registry;

/// Python wrapper for a generator chain
///
/// # Example (from Python)
///
/// ```python
/// from stochastic_core import Generator
///
/// rng = Generator.create("SMIX", 42)
/// a = rng.next_u64()
/// saved = rng.serialize()
/// b = rng.next_u64()
///
/// again = Generator.deserialize(saved)
/// assert again.next_u64() == b
/// ```
#[pyclass(name = "Generator")]
pub struct PyGenerator {
    inner: Box<dyn Generator>,
}

#[pymethods]
impl PyGenerator {
    /// Create a leaf generator from a registered tag and a seed
    ///
    /// # Errors
    ///
    /// Raises ValueError for unknown or wrapper tags.
    #[staticmethod]
    fn create(tag: &str, seed: u64) -> PyResult<Self> {
        let inner = registry::create(tag, seed)?;
        Ok(PyGenerator { inner })
    }

    /// Rebuild a generator chain from its serialized form
    #[staticmethod]
    fn deserialize(data: &str) -> PyResult<Self> {
        let inner = registry::deserialize(data)?;
        Ok(PyGenerator { inner })
    }

    /// Serialize the whole chain, delegates included
    fn serialize(&self) -> PyResult<String> {
        Ok(self.inner.string_serialize()?)
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn next_f64(&mut self) -> f64 {
        self.inner.next_f64()
    }

    /// Uniform integer in `[0, bound)`
    ///
    /// # Errors
    ///
    /// Raises ValueError when `bound` is zero.
    fn next_below(&mut self, bound: u64) -> PyResult<u64> {
        if bound == 0 {
            return Err(pyo3::exceptions::PyValueError::new_err(
                "bound must be positive",
            ));
        }
        Ok(self.inner.next_below(bound))
    }

    /// Advance by `distance` draws (NotImplementedError without skip)
    fn skip(&mut self, distance: u64) -> PyResult<()> {
        Ok(self.inner.skip(distance)?)
    }

    /// Step back one draw (NotImplementedError without step-back)
    fn previous_u64(&mut self) -> PyResult<u64> {
        Ok(self.inner.previous_u64()?)
    }

    #[getter]
    fn tag(&self) -> String {
        self.inner.tag().to_string()
    }

    #[getter]
    fn state_count(&self) -> usize {
        self.inner.state_count()
    }

    fn __repr__(&self) -> String {
        format!("Generator(tag={:?})", self.inner.tag())
    }
}
