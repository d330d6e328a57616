use crate::distributions::math::{below, is_exact_integer};
use crate::distributions::{
    undefined, DiscreteDistribution, Distribution, Parameterized, Parameters, SharedGenerator,
    Strategy,
};
use crate::error::{Result, StochasticError};
use rand::RngCore;

/// Largest number of outcomes for which `mode` lists every value.
const MAX_LISTED_MODES: f64 = 65_536.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteUniformParams {
    /// Smallest outcome.
    pub alpha: f64,
    /// Largest outcome.
    pub beta: f64,
}

impl Parameters for DiscreteUniformParams {
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

fn valid_alpha(p: &DiscreteUniformParams, value: f64) -> bool {
    is_exact_integer(value) && value <= p.beta
}

fn valid_beta(p: &DiscreteUniformParams, value: f64) -> bool {
    is_exact_integer(value) && value >= p.alpha
}

fn exact(name: &'static str, value: i64) -> Result<()> {
    if (value as f64) as i64 != value {
        return Err(StochasticError::InvalidParameter {
            name,
            value: value as f64,
        });
    }
    Ok(())
}

fn sample(rng: &mut dyn RngCore, p: &DiscreteUniformParams) -> i64 {
    let span = (p.beta - p.alpha) as u64 + 1;
    p.alpha as i64 + below(rng, span) as i64
}

/// Every integer in `[alpha, beta]` with equal probability.
#[derive(Debug, Clone)]
pub struct DiscreteUniform {
    core: Parameterized<DiscreteUniformParams, i64>,
}

impl DiscreteUniform {
    /// Fails with `InvalidParameter` if either bound has no exact `f64`
    /// representation.
    pub fn new(generator: SharedGenerator, alpha: i64, beta: i64) -> Result<Self> {
        exact("alpha", alpha)?;
        exact("beta", beta)?;
        let params = DiscreteUniformParams {
            alpha: alpha as f64,
            beta: beta as f64,
        };
        let core = Parameterized::new(generator, params, Self::default_strategy())?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<DiscreteUniformParams, i64> {
        Strategy::new(vec![valid_alpha, valid_beta], sample)
    }

    pub fn alpha(&self) -> i64 {
        self.core.params().alpha as i64
    }

    pub fn beta(&self) -> i64 {
        self.core.params().beta as i64
    }

    fn outcomes(&self) -> f64 {
        let p = self.core.params();
        p.beta - p.alpha + 1.0
    }

    strategy_accessors!(DiscreteUniformParams, i64);
}

impl Distribution for DiscreteUniform {
    delegate_parameters!(DiscreteUniformParams);

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

    /// Every outcome is a mode; listing fails for very wide ranges.
    fn mode(&self) -> Result<Vec<f64>> {
        if self.outcomes() > MAX_LISTED_MODES {
            return Err(undefined("mode list of a range this wide"));
        }
        Ok((self.alpha()..=self.beta()).map(|k| k as f64).collect())
    }

    fn variance(&self) -> Result<f64> {
        let n = self.outcomes();
        Ok((n * n - 1.0) / 12.0)
    }

    fn steps(&self) -> Option<u64> {
        Some(1)
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.sample_int_from(rng) as f64
    }
}

impl DiscreteDistribution for DiscreteUniform {
    fn sample_int_from(&self, rng: &mut dyn RngCore) -> i64 {
        self.core.sample(rng)
    }
}
