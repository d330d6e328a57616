use crate::distributions::math::{is_integer, unit};
use crate::distributions::{
    undefined, DiscreteDistribution, Distribution, Parameterized, Parameters, SharedGenerator,
    Strategy,
};
use crate::error::Result;
use rand::RngCore;

/// Upper limit on the number of trials; each trial costs one generator word.
pub const MAX_TRIALS: f64 = u32::MAX as f64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialParams {
    /// Per-trial success probability.
    pub alpha: f64,
    /// Number of trials.
    pub beta: f64,
}

impl Parameters for BinomialParams {
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

fn valid_alpha(_: &BinomialParams, value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn valid_beta(_: &BinomialParams, value: f64) -> bool {
    is_integer(value) && (0.0..=MAX_TRIALS).contains(&value)
}

fn sample(rng: &mut dyn RngCore, p: &BinomialParams) -> i64 {
    (0..p.beta as u64).filter(|_| unit(rng) < p.alpha).count() as i64
}

/// Successes among `beta` independent trials of probability `alpha`.
#[derive(Debug, Clone)]
pub struct Binomial {
    core: Parameterized<BinomialParams, i64>,
}

impl Binomial {
    pub fn new(generator: SharedGenerator, alpha: f64, trials: u32) -> Result<Self> {
        let params = BinomialParams {
            alpha,
            beta: f64::from(trials),
        };
        let core = Parameterized::new(generator, params, Self::default_strategy())?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<BinomialParams, i64> {
        Strategy::new(vec![valid_alpha, valid_beta], sample)
    }

    pub fn alpha(&self) -> f64 {
        self.core.params().alpha
    }

    pub fn trials(&self) -> u64 {
        self.core.params().beta as u64
    }

    strategy_accessors!(BinomialParams, i64);
}

impl Distribution for Binomial {
    delegate_parameters!(BinomialParams);

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        self.core.params().beta
    }

    fn mean(&self) -> Result<f64> {
        let p = self.core.params();
        Ok(p.alpha * p.beta)
    }

    /// No single closed form covers every parameter pair.
    fn median(&self) -> Result<f64> {
        Err(undefined("median"))
    }

    fn mode(&self) -> Result<Vec<f64>> {
        let p = self.core.params();
        if p.alpha == 0.0 {
            return Ok(vec![0.0]);
        }
        if p.alpha == 1.0 {
            return Ok(vec![p.beta]);
        }
        let x = (p.beta + 1.0) * p.alpha;
        if is_integer(x) {
            Ok(vec![x - 1.0, x])
        } else {
            Ok(vec![x.floor()])
        }
    }

    fn variance(&self) -> Result<f64> {
        let p = self.core.params();
        Ok(p.beta * p.alpha * (1.0 - p.alpha))
    }

    fn steps(&self) -> Option<u64> {
        Some(self.trials())
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.sample_int_from(rng) as f64
    }
}

impl DiscreteDistribution for Binomial {
    fn sample_int_from(&self, rng: &mut dyn RngCore) -> i64 {
        self.core.sample(rng)
    }
}
