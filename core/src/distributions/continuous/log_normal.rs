use super::normal::{valid_mu, valid_sigma, NormalParams};
use crate::distributions::math::standard_normal;
use crate::distributions::{Distribution, Parameterized, SharedGenerator, Strategy};
use crate::error::Result;
use rand::RngCore;

fn sample(rng: &mut dyn RngCore, p: &NormalParams) -> f64 {
    (p.mu + p.sigma * standard_normal(rng)).exp()
}

/// `exp(X)` for a normal `X` with mean `mu` and standard deviation `sigma`.
#[derive(Debug, Clone)]
pub struct LogNormal {
    core: Parameterized<NormalParams, f64>,
}

impl LogNormal {
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

impl Distribution for LogNormal {
    delegate_parameters!(NormalParams);

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        f64::INFINITY
    }

    fn mean(&self) -> Result<f64> {
        let p = self.core.params();
        Ok((p.mu + p.sigma * p.sigma / 2.0).exp())
    }

    fn median(&self) -> Result<f64> {
        Ok(self.core.params().mu.exp())
    }

    fn mode(&self) -> Result<Vec<f64>> {
        let p = self.core.params();
        Ok(vec![(p.mu - p.sigma * p.sigma).exp()])
    }

    fn variance(&self) -> Result<f64> {
        let p = self.core.params();
        let s2 = p.sigma * p.sigma;
        Ok((s2.exp() - 1.0) * (2.0 * p.mu + s2).exp())
    }

    fn steps(&self) -> Option<u64> {
        Some(2)
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.core.sample(rng)
    }
}
