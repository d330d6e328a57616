//! Bridges to the `rand` ecosystem.
//!
//! [`RandAdapter`] lets any [`Generator`] be used as a `rand::RngCore`;
//! [`ForeignGenerator`] lets any seedable `rand` generator be used as a
//! [`Generator`]. Both translate calls one-to-one and never re-implement
//! generation.

use crate::error::{Result, StochasticError};
use crate::generator::{Capabilities, Generator};
use crate::registry::{Registry, Segments};
use rand::{RngCore, SeedableRng};
use std::fmt::Debug;

/// A native generator exposed through `rand::RngCore`.
///
/// Works with owned generators, boxed chains and `&mut dyn Generator`.
///
/// # Example
/// ```
/// use rand::Rng;
/// use stochastic_core::generator::SplitMix64;
/// use stochastic_core::wrappers::RandAdapter;
///
/// let mut rng = RandAdapter::new(SplitMix64::new(42));
/// let roll: u8 = rng.gen_range(1..=6);
/// assert!((1..=6).contains(&roll));
/// ```
#[derive(Debug, Clone)]
pub struct RandAdapter<G> {
    generator: G,
}

impl<G: Generator> RandAdapter<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn get_ref(&self) -> &G {
        &self.generator
    }

    pub fn get_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn into_inner(self) -> G {
        self.generator
    }

    /// Uniform `i32` in `[0, i32::MAX]`, inclusive of the maximum.
    ///
    /// Built from the high 31 bits of one word, so every value in the closed
    /// range is equally likely.
    pub fn next_inclusive_max(&mut self) -> i32 {
        (self.generator.next_u64() >> 33) as i32
    }

    /// Native generators reseed from a value and have no parameterless reset.
    pub fn can_reset(&self) -> bool {
        false
    }

    /// Always a no-op; returns `false` to report that nothing was reset.
    pub fn reset(&mut self) -> bool {
        false
    }
}

impl<G: Generator> RngCore for RandAdapter<G> {
    fn next_u32(&mut self) -> u32 {
        self.generator.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.generator.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.generator.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.generator.fill_bytes(dest);
        Ok(())
    }
}

/// A seedable `rand` generator exposed as a native [`Generator`].
///
/// It has no tag-registry entry: the foreign state is opaque, so
/// serialization fails with `UnsupportedOperation`.
#[derive(Debug, Clone)]
pub struct ForeignGenerator<R> {
    rng: R,
}

impl<R> ForeignGenerator<R>
where
    R: RngCore + SeedableRng + Clone + Debug + Send + 'static,
{
    pub const TAG: &'static str = "FORGN";

    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: R::seed_from_u64(seed),
        }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R> Generator for ForeignGenerator<R>
where
    R: RngCore + SeedableRng + Clone + Debug + Send + 'static,
{
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn state_count(&self) -> usize {
        0
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn seed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }

    fn copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }

    fn write_payload(&self, _out: &mut Vec<String>) -> Result<()> {
        Err(StochasticError::unsupported(
            "foreign generator state cannot be serialized",
        ))
    }

    fn read_payload(&mut self, _segments: &mut Segments<'_>, _registry: &Registry) -> Result<()> {
        Err(StochasticError::unsupported(
            "foreign generator state cannot be deserialized",
        ))
    }
}
