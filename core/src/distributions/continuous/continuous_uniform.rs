use crate::distributions::math::unit;
use crate::distributions::{
    undefined, Distribution, Parameterized, Parameters, SharedGenerator, Strategy,
};
use crate::error::Result;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousUniformParams {
    /// Lower bound.
    pub alpha: f64,
    /// Upper bound.
    pub beta: f64,
}

impl Parameters for ContinuousUniformParams {
    const NAMES: &'static [&'static str] = &["alpha", "beta"];

    fn get(&self, index: usize) -> f64 {
        match index {
            0 => self.alpha,
            _ => self.beta,
        }
    }

    fn set(&mut self, index: usize, value: f64) {
        match index {
            0 => self.alpha = value,
            _ => self.beta = value,
        }
    }
}

fn valid_alpha(p: &ContinuousUniformParams, value: f64) -> bool {
    value.is_finite() && value < p.beta
}

fn valid_beta(p: &ContinuousUniformParams, value: f64) -> bool {
    value.is_finite() && value > p.alpha
}

fn sample(rng: &mut dyn RngCore, p: &ContinuousUniformParams) -> f64 {
    p.alpha + unit(rng) * (p.beta - p.alpha)
}

/// Uniform over `[alpha, beta)`.
#[derive(Debug, Clone)]
pub struct ContinuousUniform {
    core: Parameterized<ContinuousUniformParams, f64>,
}

impl ContinuousUniform {
    pub fn new(generator: SharedGenerator, alpha: f64, beta: f64) -> Result<Self> {
        let params = ContinuousUniformParams { alpha, beta };
        let core = Parameterized::new(generator, params, Self::default_strategy())?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<ContinuousUniformParams, f64> {
        Strategy::new(vec![valid_alpha, valid_beta], sample)
    }

    strategy_accessors!(ContinuousUniformParams, f64);
}

impl Distribution for ContinuousUniform {
    delegate_parameters!(ContinuousUniformParams);

    fn minimum(&self) -> f64 {
        self.core.params().alpha
    }

    fn maximum(&self) -> f64 {
        self.core.params().beta
    }

    fn mean(&self) -> Result<f64> {
        let p = self.core.params();
        Ok((p.alpha + p.beta) / 2.0)
    }

    fn median(&self) -> Result<f64> {
        self.mean()
    }

    /// Every point of the support is a mode.
    fn mode(&self) -> Result<Vec<f64>> {
        Err(undefined("a finite mode list"))
    }

    fn variance(&self) -> Result<f64> {
        let p = self.core.params();
        let width = p.beta - p.alpha;
        Ok(width * width / 12.0)
    }

    fn steps(&self) -> Option<u64> {
        Some(1)
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.core.sample(rng)
    }
}
