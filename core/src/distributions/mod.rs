//! Probability distributions driven by a [`Generator`].
//!
//! A distribution binds to exactly one shared generator for its whole
//! lifetime and turns its raw draws into values following a named law. Every
//! distribution exposes its parameters reflectively (by index and name) and
//! validates each assignment with a per-instance predicate; a rejected value
//! leaves the previous one in place.
//!
//! # Example
//!
//! ```
//! use stochastic_core::distributions::{share, Bernoulli, DiscreteDistribution, Distribution};
//! use stochastic_core::generator::SplitMix64;
//!
//! let generator = share(SplitMix64::new(42));
//! let mut coin = Bernoulli::new(generator, 0.5).unwrap();
//!
//! let flip = coin.next_i64();
//! assert!(flip == 0 || flip == 1);
//! assert!(coin.set_parameter_value(0, 1.5).is_err());
//! assert_eq!(coin.parameter_value(0).unwrap(), 0.5);
//! ```

/// Implements the reflective parameter methods of [`Distribution`] for a
/// type whose `core` field is a [`Parameterized`].
macro_rules! delegate_parameters {
    ($params:ty) => {
        fn generator(&self) -> &$crate::distributions::SharedGenerator {
            self.core.generator()
        }

        fn parameter_names(&self) -> &'static [&'static str] {
            <$params as $crate::distributions::Parameters>::NAMES
        }

        fn parameter_value(&self, index: usize) -> $crate::error::Result<f64> {
            self.core.value(index)
        }

        fn set_parameter_value(&mut self, index: usize, value: f64) -> $crate::error::Result<()> {
            self.core.set_value(index, value)
        }
    };
}

/// Inherent strategy accessors for a type whose `core` field is a
/// [`Parameterized`].
macro_rules! strategy_accessors {
    ($params:ty, $out:ty) => {
        pub fn strategy(&self) -> &$crate::distributions::Strategy<$params, $out> {
            self.core.strategy()
        }

        /// Install a replacement strategy; fails if it rejects the current
        /// parameters.
        pub fn set_strategy(
            &mut self,
            strategy: $crate::distributions::Strategy<$params, $out>,
        ) -> $crate::error::Result<()> {
            self.core.set_strategy(strategy)
        }

        pub fn params(&self) -> &$params {
            self.core.params()
        }
    };
}

mod adapters;
mod continuous;
mod discrete;
pub mod math;
mod parameters;

pub use adapters::{Discretized, ForeignDistribution, RandDistribution};
pub use continuous::{
    ContinuousUniform, ContinuousUniformParams, Exponential, ExponentialParams, Laplace,
    LaplaceParams, LogNormal, Normal, NormalParams, Weibull, WeibullParams,
};
pub use discrete::{
    Bernoulli, BernoulliParams, Binomial, BinomialParams, DiscreteUniform, DiscreteUniformParams,
    Geometric, GeometricParams, Poisson, PoissonParams, MAX_TRIALS,
};
pub use parameters::{Parameterized, Parameters, Predicate, Sampler, Strategy};

use crate::error::{Result, StochasticError};
use crate::generator::Generator;
use crate::wrappers::RandAdapter;
use rand::RngCore;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// A generator shared between a distribution and its other users.
pub type SharedGenerator = Rc<RefCell<dyn Generator>>;

/// Put `generator` behind a [`SharedGenerator`].
pub fn share<G: Generator + 'static>(generator: G) -> SharedGenerator {
    Rc::new(RefCell::new(generator))
}

/// A parameterized probability distribution.
pub trait Distribution: Debug {
    /// The generator this distribution draws from.
    fn generator(&self) -> &SharedGenerator;

    /// Closed lower bound of the support (possibly `-inf`).
    fn minimum(&self) -> f64;

    /// Closed upper bound of the support (possibly `+inf`).
    fn maximum(&self) -> f64;

    fn mean(&self) -> Result<f64>;

    fn median(&self) -> Result<f64>;

    /// Every mode, in ascending order.
    fn mode(&self) -> Result<Vec<f64>>;

    fn variance(&self) -> Result<f64>;

    /// Generator words consumed per sample, or `None` when variable.
    fn steps(&self) -> Option<u64>;

    fn parameter_names(&self) -> &'static [&'static str];

    fn parameter_count(&self) -> usize {
        self.parameter_names().len()
    }

    fn parameter_name(&self, index: usize) -> Result<&'static str> {
        self.parameter_names()
            .get(index)
            .copied()
            .ok_or_else(|| parameter_index_error(index, self.parameter_count()))
    }

    fn parameter_value(&self, index: usize) -> Result<f64>;

    /// Assign parameter `index`, or fail with `InvalidParameter` and keep
    /// the previous value.
    fn set_parameter_value(&mut self, index: usize, value: f64) -> Result<()>;

    /// One sample drawn from `rng` instead of the bound generator.
    fn sample_from(&self, rng: &mut dyn RngCore) -> f64;

    /// One sample drawn from the bound generator.
    fn next_f64(&mut self) -> f64 {
        let mut generator = self.generator().borrow_mut();
        let mut rng = RandAdapter::new(&mut *generator);
        self.sample_from(&mut rng)
    }
}

/// A distribution over the integers.
pub trait DiscreteDistribution: Distribution {
    fn sample_int_from(&self, rng: &mut dyn RngCore) -> i64;

    fn next_i64(&mut self) -> i64 {
        let mut generator = self.generator().borrow_mut();
        let mut rng = RandAdapter::new(&mut *generator);
        self.sample_int_from(&mut rng)
    }
}

impl<D: Distribution + ?Sized> Distribution for Box<D> {
    fn generator(&self) -> &SharedGenerator {
        (**self).generator()
    }
    fn minimum(&self) -> f64 {
        (**self).minimum()
    }
    fn maximum(&self) -> f64 {
        (**self).maximum()
    }
    fn mean(&self) -> Result<f64> {
        (**self).mean()
    }
    fn median(&self) -> Result<f64> {
        (**self).median()
    }
    fn mode(&self) -> Result<Vec<f64>> {
        (**self).mode()
    }
    fn variance(&self) -> Result<f64> {
        (**self).variance()
    }
    fn steps(&self) -> Option<u64> {
        (**self).steps()
    }
    fn parameter_names(&self) -> &'static [&'static str] {
        (**self).parameter_names()
    }
    fn parameter_value(&self, index: usize) -> Result<f64> {
        (**self).parameter_value(index)
    }
    fn set_parameter_value(&mut self, index: usize, value: f64) -> Result<()> {
        (**self).set_parameter_value(index, value)
    }
    fn sample_from(&self, rng: &mut dyn RngCore) -> f64 {
        (**self).sample_from(rng)
    }
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

pub(crate) fn parameter_index_error(index: usize, count: usize) -> StochasticError {
    StochasticError::unsupported(format!(
        "parameter index {} out of range (distribution has {})",
        index, count
    ))
}

pub(crate) fn undefined(what: &str) -> StochasticError {
    StochasticError::unsupported(format!("{} is undefined for this distribution", what))
}
