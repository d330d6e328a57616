use crate::distributions::math::unit;
use crate::distributions::{
    DiscreteDistribution, Distribution, Parameterized, Parameters, Predicate, SharedGenerator,
    Strategy,
};
use crate::error::Result;
use rand::RngCore;
use std::f64::consts::LN_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricParams {
    /// Per-trial success probability.
    pub alpha: f64,
}

impl Parameters for GeometricParams {
    const NAMES: &'static [&'static str] = &["alpha"];

    fn get(&self, _index: usize) -> f64 {
        self.alpha
    }

    fn set(&mut self, _index: usize, value: f64) {
        self.alpha = value;
    }
}

fn valid_alpha(_: &GeometricParams, value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

/// Count trials up to and including the first success. Terminates almost
/// surely for any `alpha > 0`; takes `1/alpha` words on average.
fn sample(rng: &mut dyn RngCore, p: &GeometricParams) -> i64 {
    let mut trials = 1;
    while unit(rng) >= p.alpha {
        trials += 1;
    }
    trials
}

/// Number of Bernoulli trials needed for the first success (support `1..`).
#[derive(Debug, Clone)]
pub struct Geometric {
    core: Parameterized<GeometricParams, i64>,
}

impl Geometric {
    pub fn new(generator: SharedGenerator, alpha: f64) -> Result<Self> {
        let core = Parameterized::new(
            generator,
            GeometricParams { alpha },
            Self::default_strategy(),
        )?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<GeometricParams, i64> {
        Strategy::new(vec![valid_alpha as Predicate<_>], sample)
    }

    pub fn alpha(&self) -> f64 {
        self.core.params().alpha
    }

    strategy_accessors!(GeometricParams, i64);
}

impl Distribution for Geometric {
    delegate_parameters!(GeometricParams);

    fn minimum(&self) -> f64 {
        1.0
    }

    fn maximum(&self) -> f64 {
        f64::INFINITY
    }

    fn mean(&self) -> Result<f64> {
        Ok(1.0 / self.alpha())
    }

    fn median(&self) -> Result<f64> {
        // ln_1p keeps tiny alpha from rounding 1 - alpha to 1.
        let alpha = self.alpha();
        Ok((-LN_2 / (-alpha).ln_1p()).ceil().max(1.0))
    }

    fn mode(&self) -> Result<Vec<f64>> {
        Ok(vec![1.0])
    }

    fn variance(&self) -> Result<f64> {
        let alpha = self.alpha();
        Ok((1.0 - alpha) / (alpha * alpha))
    }

    fn steps(&self) -> Option<u64> {
        None
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.sample_int_from(rng) as f64
    }
}

impl DiscreteDistribution for Geometric {
    fn sample_int_from(&self, rng: &mut dyn RngCore) -> i64 {
        self.core.sample(rng)
    }
}
