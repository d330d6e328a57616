use crate::distributions::math::standard_normal;
use crate::distributions::{
    Distribution, Parameterized, Parameters, SharedGenerator, Strategy,
};
use crate::error::Result;
use rand::RngCore;

/// Location and spread shared by [`Normal`] and [`LogNormal`](super::LogNormal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalParams {
    pub mu: f64,
    pub sigma: f64,
}

impl Parameters for NormalParams {
    const NAMES: &'static [&'static str] = &["mu", "sigma"];

    fn get(&self, index: usize) -> f64 {
        match index {
            0 => self.mu,
            _ => self.sigma,
        }
    }

    fn set(&mut self, index: usize, value: f64) {
        match index {
            0 => self.mu = value,
            _ => self.sigma = value,
        }
    }
}

pub(super) fn valid_mu(_: &NormalParams, value: f64) -> bool {
    value.is_finite()
}

pub(super) fn valid_sigma(_: &NormalParams, value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn sample(rng: &mut dyn RngCore, p: &NormalParams) -> f64 {
    p.mu + p.sigma * standard_normal(rng)
}

/// Gaussian with mean `mu` and standard deviation `sigma`.
#[derive(Debug, Clone)]
pub struct Normal {
    core: Parameterized<NormalParams, f64>,
}

impl Normal {
    pub fn new(generator: SharedGenerator, mu: f64, sigma: f64) -> Result<Self> {
        let core = Parameterized::new(
            generator,
            NormalParams { mu, sigma },
            Self::default_strategy(),
        )?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<NormalParams, f64> {
        Strategy::new(vec![valid_mu, valid_sigma], sample)
    }

    strategy_accessors!(NormalParams, f64);
}

impl Distribution for Normal {
    delegate_parameters!(NormalParams);

    fn minimum(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn maximum(&self) -> f64 {
        f64::INFINITY
    }

    fn mean(&self) -> Result<f64> {
        Ok(self.core.params().mu)
    }

    fn median(&self) -> Result<f64> {
        Ok(self.core.params().mu)
    }

    fn mode(&self) -> Result<Vec<f64>> {
        Ok(vec![self.core.params().mu])
    }

    fn variance(&self) -> Result<f64> {
        let sigma = self.core.params().sigma;
        Ok(sigma * sigma)
    }

    fn steps(&self) -> Option<u64> {
        Some(2)
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

    #[test]
    fn test_sample_moments() {
        let mut d = Normal::new(share(SplitMix64::new(42)), 10.0, 2.0).unwrap();
        let n = 20_000;
        let xs: Vec<f64> = (0..n).map(|_| d.next_f64()).collect();
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert_relative_eq!(mean, 10.0, max_relative = 0.01);
        assert_relative_eq!(var, 4.0, max_relative = 0.05);
    }

    #[test]
    fn test_deterministic_for_seed() {
        let mut a = Normal::new(share(SplitMix64::new(7)), 0.0, 1.0).unwrap();
        let mut b = Normal::new(share(SplitMix64::new(7)), 0.0, 1.0).unwrap();
        for _ in 0..50 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn test_sigma_must_be_positive() {
        assert!(Normal::new(share(SplitMix64::new(7)), 0.0, 0.0).is_err());
        assert!(Normal::new(share(SplitMix64::new(7)), f64::NAN, 1.0).is_err());
    }
}
