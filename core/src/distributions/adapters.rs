//! Distribution wrappers: integer rounding and bridges to and from `rand`.

use super::{undefined, DiscreteDistribution, Distribution, SharedGenerator};
use crate::error::Result;
use rand::{Rng, RngCore};
use std::fmt::Debug;

/// Integer view of a continuous distribution, rounding each sample to the
/// nearest integer (halves away from zero).
///
/// Parameters and steps pass through to the inner distribution. Moments
/// other than the median do not survive rounding and are unsupported.
#[derive(Debug, Clone)]
pub struct Discretized<D> {
    inner: D,
}

impl<D: Distribution> Discretized<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Distribution> Distribution for Discretized<D> {
    fn generator(&self) -> &SharedGenerator {
        self.inner.generator()
    }

    fn minimum(&self) -> f64 {
        self.inner.minimum().round()
    }

    fn maximum(&self) -> f64 {
        self.inner.maximum().round()
    }

    fn mean(&self) -> Result<f64> {
        Err(undefined("mean of a rounded distribution"))
    }

    fn median(&self) -> Result<f64> {
        self.inner.median().map(f64::round)
    }

    fn mode(&self) -> Result<Vec<f64>> {
        Err(undefined("mode of a rounded distribution"))
    }

    fn variance(&self) -> Result<f64> {
        Err(undefined("variance of a rounded distribution"))
    }

    fn steps(&self) -> Option<u64> {
        self.inner.steps()
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        self.inner.parameter_names()
    }

    fn parameter_value(&self, index: usize) -> Result<f64> {
        self.inner.parameter_value(index)
    }

    fn set_parameter_value(&mut self, index: usize, value: f64) -> Result<()> {
        self.inner.set_parameter_value(index, value)
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.inner.sample_from(rng).round()
    }
}

impl<D: Distribution> DiscreteDistribution for Discretized<D> {
    /// Saturates at the `i64` bounds for infinite or out-of-range samples.
    fn sample_int_from(&self, rng: &mut dyn RngCore) -> i64 {
        self.sample_from(rng) as i64
    }
}

/// A `rand` distribution driven by a native generator.
///
/// Nothing is known about the foreign law, so the support is unbounded, the
/// moments are unsupported and there are no parameters.
#[derive(Debug, Clone)]
pub struct ForeignDistribution<D> {
    generator: SharedGenerator,
    inner: D,
}

impl<D> ForeignDistribution<D>
where
    D: rand::distributions::Distribution<f64> + Debug,
{
    pub fn new(generator: SharedGenerator, inner: D) -> Self {
        Self { generator, inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D> Distribution for ForeignDistribution<D>
where
    D: rand::distributions::Distribution<f64> + Debug,
{
    fn generator(&self) -> &SharedGenerator {
        &self.generator
    }

    fn minimum(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn maximum(&self) -> f64 {
        f64::INFINITY
    }

    fn mean(&self) -> Result<f64> {
        Err(undefined("mean"))
    }

    fn median(&self) -> Result<f64> {
        Err(undefined("median"))
    }

    fn mode(&self) -> Result<Vec<f64>> {
        Err(undefined("mode"))
    }

    fn variance(&self) -> Result<f64> {
        Err(undefined("variance"))
    }

    fn steps(&self) -> Option<u64> {
        None
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &[]
    }

    fn parameter_value(&self, index: usize) -> Result<f64> {
        Err(super::parameter_index_error(index, 0))
    }

    fn set_parameter_value(&mut self, index: usize, _value: f64) -> Result<()> {
        Err(super::parameter_index_error(index, 0))
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        rng.sample(&self.inner)
    }
}

/// A native distribution usable wherever `rand` expects a
/// `Distribution<f64>`; samples come from the caller's rng, not from the
/// distribution's bound generator.
///
/// # Example
/// ```
/// use rand::Rng;
/// use stochastic_core::distributions::{share, Exponential, RandDistribution};
/// use stochastic_core::generator::SplitMix64;
/// use stochastic_core::wrappers::RandAdapter;
///
/// let exponential = Exponential::new(share(SplitMix64::new(1)), 2.0).unwrap();
/// let mut rng = RandAdapter::new(SplitMix64::new(9));
/// let x: f64 = rng.sample(RandDistribution::new(exponential));
/// assert!(x >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RandDistribution<D> {
    inner: D,
}

impl<D: Distribution> RandDistribution<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Distribution> rand::distributions::Distribution<f64> for RandDistribution<D> {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut rng = rng;
        self.inner.sample_from(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{share, ContinuousUniform, Normal};
    use crate::generator::{Generator, SplitMix64};
    use crate::wrappers::RandAdapter;
    use rand::distributions::Uniform;

    #[test]
    fn test_discretized_rounds_samples_and_bounds() {
        let uniform = ContinuousUniform::new(share(SplitMix64::new(3)), -0.4, 5.6).unwrap();
        let mut rounded = Discretized::new(uniform);
        assert_eq!(rounded.minimum(), 0.0);
        assert_eq!(rounded.maximum(), 6.0);
        assert_eq!(rounded.median().unwrap(), 3.0);
        assert!(rounded.mean().is_err());
        for _ in 0..500 {
            let k = rounded.next_i64();
            assert!((0..=6).contains(&k));
        }
    }

    #[test]
    fn test_discretized_passes_parameters_through() {
        let normal = Normal::new(share(SplitMix64::new(3)), 0.0, 1.0).unwrap();
        let mut rounded = Discretized::new(normal);
        assert_eq!(rounded.parameter_count(), 2);
        assert_eq!(rounded.steps(), Some(2));
        rounded.set_parameter_value(0, 100.0).unwrap();
        assert_eq!(rounded.inner().parameter_value(0).unwrap(), 100.0);
        assert!(rounded.set_parameter_value(1, -1.0).is_err());
    }

    #[test]
    fn test_foreign_distribution_uses_bound_generator() {
        let generator = share(SplitMix64::new(21));
        let mut foreign = ForeignDistribution::new(generator, Uniform::new(10.0, 20.0));
        for _ in 0..100 {
            let x = foreign.next_f64();
            assert!((10.0..20.0).contains(&x));
        }
        assert_eq!(foreign.parameter_count(), 0);
        assert!(foreign.parameter_value(0).is_err());
        assert!(foreign.variance().is_err());
        assert_eq!(foreign.steps(), None);
    }

    #[test]
    fn test_foreign_distribution_is_deterministic() {
        let mut a = ForeignDistribution::new(share(SplitMix64::new(4)), Uniform::new(0.0, 1.0));
        let mut b = ForeignDistribution::new(share(SplitMix64::new(4)), Uniform::new(0.0, 1.0));
        for _ in 0..20 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_rand_distribution_draws_from_caller_rng() {
        let bound = share(SplitMix64::new(1));
        let normal = Normal::new(bound.clone(), 0.0, 1.0).unwrap();
        let expected = normal.sample_from(&mut RandAdapter::new(SplitMix64::new(55)));

        let wrapped = RandDistribution::new(normal);
        let mut rng = RandAdapter::new(SplitMix64::new(55));
        assert_eq!(rng.sample(&wrapped), expected);

        // The bound generator was never touched.
        assert_eq!(
            bound.borrow_mut().next_u64(),
            SplitMix64::new(1).next_u64()
        );
    }
}
