use crate::distributions::math::unit;
use crate::distributions::{
    Distribution, Parameterized, Parameters, SharedGenerator, Strategy,
};
use crate::error::Result;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaplaceParams {
    /// Scale.
    pub alpha: f64,
    /// Location.
    pub mu: f64,
}

impl Parameters for LaplaceParams {
    const NAMES: &'static [&'static str] = &["alpha", "mu"];

    fn get(&self, index: usize) -> f64 {
        match index {
            0 => self.alpha,
            _ => self.mu,
        }
    }

    fn set(&mut self, index: usize, value: f64) {
        match index {
            0 => self.alpha = value,
            _ => self.mu = value,
        }
    }
}

fn valid_alpha(_: &LaplaceParams, value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn valid_mu(_: &LaplaceParams, value: f64) -> bool {
    value.is_finite()
}

fn sample(rng: &mut dyn RngCore, p: &LaplaceParams) -> f64 {
    let s = unit(rng) - 0.5;
    let tail = (1.0 - 2.0 * s.abs()).max(f64::MIN_POSITIVE);
    p.mu - p.alpha * s.signum() * tail.ln()
}

/// Double exponential centred on `mu` with scale `alpha`.
#[derive(Debug, Clone)]
pub struct Laplace {
    core: Parameterized<LaplaceParams, f64>,
}

impl Laplace {
    pub fn new(generator: SharedGenerator, alpha: f64, mu: f64) -> Result<Self> {
        let core = Parameterized::new(
            generator,
            LaplaceParams { alpha, mu },
            Self::default_strategy(),
        )?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<LaplaceParams, f64> {
        Strategy::new(vec![valid_alpha, valid_mu], sample)
    }

    strategy_accessors!(LaplaceParams, f64);
}

impl Distribution for Laplace {
    delegate_parameters!(LaplaceParams);

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
        let alpha = self.core.params().alpha;
        Ok(2.0 * alpha * alpha)
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
    fn test_extreme_draws_are_finite() {
        let d = Laplace::new(share(SplitMix64::new(1)), 1.0, 0.0).unwrap();
        assert!(d.sample_from(&mut StepRng::new(0, 0)).is_finite());
        assert!(d.sample_from(&mut StepRng::new(u64::MAX, 0)).is_finite());
        assert_eq!(d.sample_from(&mut StepRng::new(1 << 63, 0)), 0.0);
    }

    #[test]
    fn test_sample_moments() {
        let mut d = Laplace::new(share(SplitMix64::new(5150)), 1.5, -2.0).unwrap();
        let n = 20_000;
        let xs: Vec<f64> = (0..n).map(|_| d.next_f64()).collect();
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean + 2.0).abs() < 0.1);
        assert_relative_eq!(var, d.variance().unwrap(), max_relative = 0.1);
    }
}
