use crate::distributions::math::unit;
use crate::distributions::{
    Distribution, Parameterized, Parameters, Predicate, SharedGenerator, Strategy,
};
use crate::error::Result;
use rand::RngCore;
use std::f64::consts::LN_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialParams {
    /// Rate.
    pub lambda: f64,
}

impl Parameters for ExponentialParams {
    const NAMES: &'static [&'static str] = &["lambda"];

    fn get(&self, _index: usize) -> f64 {
        self.lambda
    }

    fn set(&mut self, _index: usize, value: f64) {
        self.lambda = value;
    }
}

fn valid_lambda(_: &ExponentialParams, value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn sample(rng: &mut dyn RngCore, p: &ExponentialParams) -> f64 {
    -(1.0 - unit(rng)).ln() / p.lambda
}

/// Waiting time between events of a Poisson process with rate `lambda`.
#[derive(Debug, Clone)]
pub struct Exponential {
    core: Parameterized<ExponentialParams, f64>,
}

impl Exponential {
    pub fn new(generator: SharedGenerator, lambda: f64) -> Result<Self> {
        let core = Parameterized::new(
            generator,
            ExponentialParams { lambda },
            Self::default_strategy(),
        )?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<ExponentialParams, f64> {
        Strategy::new(vec![valid_lambda as Predicate<_>], sample)
    }

    pub fn lambda(&self) -> f64 {
        self.core.params().lambda
    }

    strategy_accessors!(ExponentialParams, f64);
}

impl Distribution for Exponential {
    delegate_parameters!(ExponentialParams);

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        f64::INFINITY
    }

    fn mean(&self) -> Result<f64> {
        Ok(1.0 / self.lambda())
    }

    fn median(&self) -> Result<f64> {
        Ok(LN_2 / self.lambda())
    }

    fn mode(&self) -> Result<Vec<f64>> {
        Ok(vec![0.0])
    }

    fn variance(&self) -> Result<f64> {
        let lambda = self.lambda();
        Ok(1.0 / (lambda * lambda))
    }

    fn steps(&self) -> Option<u64> {
        Some(1)
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.core.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::share;
    use crate::generator::SplitMix64;
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_zero_draw_is_zero() {
        let d = Exponential::new(share(SplitMix64::new(1)), 2.0).unwrap();
        assert_eq!(d.sample_from(&mut StepRng::new(0, 0)), 0.0);
        assert!(d.sample_from(&mut StepRng::new(u64::MAX, 0)).is_finite());
    }

    #[test]
    fn test_sample_mean() {
        let mut d = Exponential::new(share(SplitMix64::new(31)), 0.5).unwrap();
        let n = 20_000;
        let mean = (0..n).map(|_| d.next_f64()).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 2.0, max_relative = 0.05);
        assert_relative_eq!(d.median().unwrap(), 2.0 * LN_2);
    }
}
