use crate::distributions::math::{is_integer, unit};
use crate::distributions::{
    undefined, DiscreteDistribution, Distribution, Parameterized, Parameters, Predicate,
    SharedGenerator, Strategy,
};
use crate::error::Result;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonParams {
    /// Expected number of events.
    pub lambda: f64,
}

impl Parameters for PoissonParams {
    const NAMES: &'static [&'static str] = &["lambda"];

    fn get(&self, _index: usize) -> f64 {
        self.lambda
    }

    fn set(&mut self, _index: usize, value: f64) {
        self.lambda = value;
    }
}

fn valid_lambda(_: &PoissonParams, value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Inverse-CDF search against a single uniform draw.
///
/// Accumulates `P(X <= k)` until it exceeds the draw or stops growing.
/// Intended for modest `lambda`: `exp(-lambda)` underflows past ~745, after
/// which every draw lands near `lambda`.
fn sample(rng: &mut dyn RngCore, p: &PoissonParams) -> i64 {
    let u = unit(rng);
    let mut k = 0;
    let mut probability = (-p.lambda).exp();
    let mut cumulative = probability;
    while cumulative <= u {
        k += 1;
        probability *= p.lambda / k as f64;
        let next = cumulative + probability;
        if next <= cumulative && k as f64 > p.lambda {
            break;
        }
        cumulative = next;
    }
    k
}

/// Number of events in a fixed interval at mean rate `lambda`.
#[derive(Debug, Clone)]
pub struct Poisson {
    core: Parameterized<PoissonParams, i64>,
}

impl Poisson {
    pub fn new(generator: SharedGenerator, lambda: f64) -> Result<Self> {
        let core = Parameterized::new(
            generator,
            PoissonParams { lambda },
            Self::default_strategy(),
        )?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<PoissonParams, i64> {
        Strategy::new(vec![valid_lambda as Predicate<_>], sample)
    }

    pub fn lambda(&self) -> f64 {
        self.core.params().lambda
    }

    strategy_accessors!(PoissonParams, i64);
}

impl Distribution for Poisson {
    delegate_parameters!(PoissonParams);

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        f64::INFINITY
    }

    fn mean(&self) -> Result<f64> {
        Ok(self.lambda())
    }

    /// No closed form.
    fn median(&self) -> Result<f64> {
        Err(undefined("median"))
    }

    fn mode(&self) -> Result<Vec<f64>> {
        let lambda = self.lambda();
        if is_integer(lambda) {
            Ok(vec![lambda - 1.0, lambda])
        } else {
            Ok(vec![lambda.floor()])
        }
    }

    fn variance(&self) -> Result<f64> {
        Ok(self.lambda())
    }

    fn steps(&self) -> Option<u64> {
        Some(1)
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.sample_int_from(rng) as f64
    }
}

impl DiscreteDistribution for Poisson {
    fn sample_int_from(&self, rng: &mut dyn RngCore) -> i64 {
        self.core.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::share;
    use crate::error::StochasticError;
    use crate::generator::SplitMix64;
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;

    fn poisson(lambda: f64) -> Poisson {
        Poisson::new(share(SplitMix64::new(2024)), lambda).unwrap()
    }

    #[test]
    fn test_zero_draw_gives_zero_events() {
        let d = poisson(3.0);
        assert_eq!(d.sample_int_from(&mut StepRng::new(0, 0)), 0);
    }

    #[test]
    fn test_sample_mean_near_lambda() {
        let mut d = poisson(4.5);
        let n = 20_000;
        let total: i64 = (0..n).map(|_| d.next_i64()).sum();
        assert_relative_eq!(total as f64 / n as f64, 4.5, max_relative = 0.03);
    }

    #[test]
    fn test_large_lambda_terminates() {
        let mut d = poisson(1000.0);
        for _ in 0..10 {
            assert!(d.next_i64() >= 0);
        }
    }

    #[test]
    fn test_median_unsupported() {
        assert!(matches!(
            poisson(2.0).median(),
            Err(StochasticError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_modes() {
        assert_eq!(poisson(3.0).mode().unwrap(), vec![2.0, 3.0]);
        assert_eq!(poisson(2.7).mode().unwrap(), vec![2.0]);
    }

    #[test]
    fn test_rejects_non_positive_lambda() {
        let mut d = poisson(1.0);
        assert!(d.set_parameter_value(0, 0.0).is_err());
        assert!(d.set_parameter_value(0, f64::INFINITY).is_err());
        assert_eq!(d.lambda(), 1.0);
    }
}
