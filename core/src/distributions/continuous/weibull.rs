use crate::distributions::math::{gamma, unit};
use crate::distributions::{
    Distribution, Parameterized, Parameters, Predicate, SharedGenerator, Strategy,
};
use crate::error::Result;
use rand::RngCore;
use std::f64::consts::LN_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullParams {
    /// Shape.
    pub alpha: f64,
    /// Scale.
    pub lambda: f64,
}

impl Parameters for WeibullParams {
    const NAMES: &'static [&'static str] = &["alpha", "lambda"];

    fn get(&self, index: usize) -> f64 {
        match index {
            0 => self.alpha,
            _ => self.lambda,
        }
    }

    fn set(&mut self, index: usize, value: f64) {
        match index {
            0 => self.alpha = value,
            _ => self.lambda = value,
        }
    }
}

fn positive(_: &WeibullParams, value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Inverse CDF of one draw; `1 - u` keeps the logarithm's argument nonzero.
fn sample(rng: &mut dyn RngCore, p: &WeibullParams) -> f64 {
    p.lambda * (-(1.0 - unit(rng)).ln()).powf(1.0 / p.alpha)
}

#[derive(Debug, Clone)]
pub struct Weibull {
    core: Parameterized<WeibullParams, f64>,
}

impl Weibull {
    pub fn new(generator: SharedGenerator, alpha: f64, lambda: f64) -> Result<Self> {
        let core = Parameterized::new(
            generator,
            WeibullParams { alpha, lambda },
            Self::default_strategy(),
        )?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<WeibullParams, f64> {
        Strategy::new(vec![positive as Predicate<_>, positive], sample)
    }

    strategy_accessors!(WeibullParams, f64);
}

impl Distribution for Weibull {
    delegate_parameters!(WeibullParams);

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        f64::INFINITY
    }

    fn mean(&self) -> Result<f64> {
        let p = self.core.params();
        Ok(p.lambda * gamma(1.0 + 1.0 / p.alpha))
    }

    fn median(&self) -> Result<f64> {
        let p = self.core.params();
        Ok(p.lambda * LN_2.powf(1.0 / p.alpha))
    }

    fn mode(&self) -> Result<Vec<f64>> {
        let p = self.core.params();
        if p.alpha <= 1.0 {
            return Ok(vec![0.0]);
        }
        Ok(vec![p.lambda * ((p.alpha - 1.0) / p.alpha).powf(1.0 / p.alpha)])
    }

    fn variance(&self) -> Result<f64> {
        let p = self.core.params();
        let g1 = gamma(1.0 + 1.0 / p.alpha);
        let g2 = gamma(1.0 + 2.0 / p.alpha);
        Ok(p.lambda * p.lambda * (g2 - g1 * g1))
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
    fn test_shape_one_is_exponential() {
        let d = Weibull::new(share(SplitMix64::new(1)), 1.0, 2.0).unwrap();
        assert_relative_eq!(d.mean().unwrap(), 2.0, max_relative = 1e-10);
        assert_relative_eq!(d.variance().unwrap(), 4.0, max_relative = 1e-10);
        assert_eq!(d.mode().unwrap(), vec![0.0]);
    }

    #[test]
    fn test_zero_draw_is_finite() {
        let d = Weibull::new(share(SplitMix64::new(1)), 0.5, 3.0).unwrap();
        assert_eq!(d.sample_from(&mut StepRng::new(0, 0)), 0.0);
    }

    #[test]
    fn test_sample_median() {
        let mut d = Weibull::new(share(SplitMix64::new(64)), 2.0, 1.5).unwrap();
        let mut xs: Vec<f64> = (0..10_001).map(|_| d.next_f64()).collect();
        xs.sort_by(|a, b| a.total_cmp(b));
        assert_relative_eq!(xs[5_000], d.median().unwrap(), max_relative = 0.03);
    }

    #[test]
    fn test_rejects_non_positive() {
        let mut d = Weibull::new(share(SplitMix64::new(1)), 1.0, 1.0).unwrap();
        assert!(d.set_parameter_value(0, 0.0).is_err());
        assert!(d.set_parameter_value(1, -2.0).is_err());
        assert_eq!(d.parameter_value(1).unwrap(), 1.0);
    }
}
