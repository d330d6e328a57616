use crate::distributions::math::unit;
use crate::distributions::{
    DiscreteDistribution, Distribution, Parameterized, Parameters, Predicate, SharedGenerator,
    Strategy,
};
use crate::error::Result;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliParams {
    /// Success probability.
    pub alpha: f64,
}

impl Parameters for BernoulliParams {
    const NAMES: &'static [&'static str] = &["alpha"];

    fn get(&self, _index: usize) -> f64 {
        self.alpha
    }

    fn set(&mut self, _index: usize, value: f64) {
        self.alpha = value;
    }
}

fn valid_alpha(_: &BernoulliParams, value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn sample(rng: &mut dyn RngCore, p: &BernoulliParams) -> i64 {
    if unit(rng) < p.alpha {
        1
    } else {
        0
    }
}

/// One trial with success probability `alpha`: 1 on success, 0 otherwise.
#[derive(Debug, Clone)]
pub struct Bernoulli {
    core: Parameterized<BernoulliParams, i64>,
}

impl Bernoulli {
    pub fn new(generator: SharedGenerator, alpha: f64) -> Result<Self> {
        let core = Parameterized::new(
            generator,
            BernoulliParams { alpha },
            Self::default_strategy(),
        )?;
        Ok(Self { core })
    }

    pub fn default_strategy() -> Strategy<BernoulliParams, i64> {
        Strategy::new(vec![valid_alpha as Predicate<_>], sample)
    }

    pub fn alpha(&self) -> f64 {
        self.core.params().alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        self.core.set_value(0, alpha)
    }

    strategy_accessors!(BernoulliParams, i64);
}

impl Distribution for Bernoulli {
    delegate_parameters!(BernoulliParams);

    fn minimum(&self) -> f64 {
        0.0
    }

    fn maximum(&self) -> f64 {
        1.0
    }

    fn mean(&self) -> Result<f64> {
        Ok(self.alpha())
    }

    fn median(&self) -> Result<f64> {
        let alpha = self.alpha();
        Ok(if alpha < 0.5 {
            0.0
        } else if alpha > 0.5 {
            1.0
        } else {
            0.5
        })
    }

    fn mode(&self) -> Result<Vec<f64>> {
        let alpha = self.alpha();
        Ok(if alpha < 0.5 {
            vec![0.0]
        } else if alpha > 0.5 {
            vec![1.0]
        } else {
            vec![0.0, 1.0]
        })
    }

    fn variance(&self) -> Result<f64> {
        let alpha = self.alpha();
        Ok(alpha * (1.0 - alpha))
    }

    fn steps(&self) -> Option<u64> {
        Some(1)
    }

    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        self.sample_int_from(rng) as f64
    }
}

impl DiscreteDistribution for Bernoulli {
    fn sample_int_from(&self, rng: &mut dyn RngCore) -> i64 {
        self.core.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::share;
    use crate::error::StochasticError;
    use crate::generator::{Generator, SplitMix64};

    fn coin(alpha: f64) -> Bernoulli {
        Bernoulli::new(share(SplitMix64::new(42)), alpha).unwrap()
    }

    #[test]
    fn test_certain_outcomes() {
        let mut never = coin(0.0);
        let mut always = coin(1.0);
        for _ in 0..1000 {
            assert_eq!(never.next_i64(), 0);
            assert_eq!(always.next_i64(), 1);
        }
    }

    #[test]
    fn test_one_word_per_draw() {
        let generator = share(SplitMix64::new(5));
        let mut flip = Bernoulli::new(generator.clone(), 0.3).unwrap();
        for _ in 0..10 {
            flip.next_i64();
        }

        let mut reference = SplitMix64::new(5);
        for _ in 0..10 {
            reference.next_u64();
        }
        assert_eq!(generator.borrow_mut().next_u64(), reference.next_u64());
    }

    #[test]
    fn test_rejects_out_of_range_alpha() {
        let mut flip = coin(0.25);
        let err = flip.set_alpha(1.5).unwrap_err();
        assert_eq!(
            err,
            StochasticError::InvalidParameter {
                name: "alpha",
                value: 1.5
            }
        );
        assert_eq!(flip.alpha(), 0.25);
        assert!(flip.set_alpha(f64::NAN).is_err());
        assert!(Bernoulli::new(share(SplitMix64::new(1)), -0.1).is_err());
    }

    #[test]
    fn test_moments() {
        let flip = coin(0.5);
        assert_eq!(flip.mode().unwrap(), vec![0.0, 1.0]);
        assert_eq!(flip.median().unwrap(), 0.5);
        assert_eq!(flip.variance().unwrap(), 0.25);

        let biased = coin(0.8);
        assert_eq!(biased.mode().unwrap(), vec![1.0]);
        assert_eq!(biased.parameter_name(0).unwrap(), "alpha");
        assert!(biased.parameter_name(1).is_err());
    }
}
