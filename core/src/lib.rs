//! Stochastic Core - pseudorandom generation framework
//!
//! Composable 64-bit generators with reversible stepping, recording and
//! replay, string serialization of whole wrapper chains, and parameterized
//! probability distributions on top.
//!
//! # Architecture
//!
//! - **generator**: The generator contract and the leaf algorithms
//! - **registry**: Tag registry and the backtick-delimited wire format
//! - **wrappers**: Reversing, archival, replay and `rand` bridges
//! - **distributions**: Parameterized distributions with swappable strategies
//! - **config**: serde descriptions of generator chains and distributions
//!
//! # Critical Invariants
//!
//! 1. Same seed, same tag, same call sequence → bit-identical draws
//! 2. `deserialize(serialize(g))` continues exactly where `g` left off
//! 3. A failed operation leaves its receiver unchanged

// Module declarations
pub mod config;
pub mod distributions;
pub mod error;
pub mod generator;
pub mod registry;
pub mod wrappers;

// Re-exports for convenience
pub use config::{DistributionConfig, GeneratorConfig, SamplingConfig, WrapperKind};
pub use distributions::{share, DiscreteDistribution, Distribution, SharedGenerator};
pub use error::{Result, StochasticError};
pub use generator::{
    Capabilities, Generator, GeneratorExt, Lcg64, SplitMix64, XorShift64Star, Xoshiro256StarStar,
};
pub use registry::Registry;
pub use wrappers::{ArchivalWrapper, RandAdapter, Replay, ReversingWrapper};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn stochastic_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::generator::PyGenerator>()?;
    Ok(())
}
