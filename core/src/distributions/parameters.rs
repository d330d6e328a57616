//! Reflective parameters and per-instance sampling strategy.
//!
//! Every distribution stores its parameters in a small `Copy` struct that
//! implements [`Parameters`]. Validity predicates and the sampling function
//! are not fixed per type: they live in a [`Strategy`] owned by each instance
//! and can be swapped at runtime. [`Parameterized`] ties the three together
//! with the bound generator and enforces that a rejected assignment never
//! changes the stored value.

use super::{parameter_index_error, SharedGenerator};
use crate::error::{Result, StochasticError};
use rand::RngCore;
use std::fmt::Debug;

/// Validity predicate for one parameter.
///
/// Receives the current parameter set and the candidate value for the
/// parameter it guards.
pub type Predicate<P> = fn(&P, f64) -> bool;

/// Sampling function: draws from `rng` according to `P`.
pub type Sampler<P, T> = fn(&mut dyn RngCore, &P) -> T;

/// Named parameters stored as `f64` and addressed by index.
pub trait Parameters: Copy + Debug {
    /// Parameter names in index order.
    const NAMES: &'static [&'static str];

    /// Value at `index`; `index` is always below `NAMES.len()`.
    fn get(&self, index: usize) -> f64;

    /// Store `value` at `index` without validation.
    fn set(&mut self, index: usize, value: f64);
}

/// Validity predicates (one per parameter) plus the sampling function.
#[derive(Debug, Clone)]
pub struct Strategy<P, T> {
    validators: Vec<Predicate<P>>,
    sampler: Sampler<P, T>,
}

impl<P: Parameters, T> Strategy<P, T> {
    /// # Panics
    /// Panics if there is not exactly one predicate per parameter.
    pub fn new(validators: Vec<Predicate<P>>, sampler: Sampler<P, T>) -> Self {
        assert_eq!(
            validators.len(),
            P::NAMES.len(),
            "one validity predicate per parameter"
        );
        Self {
            validators,
            sampler,
        }
    }

    /// Replace the predicate guarding parameter `index`.
    pub fn with_validator(mut self, index: usize, predicate: Predicate<P>) -> Result<Self> {
        let slot = self
            .validators
            .get_mut(index)
            .ok_or_else(|| parameter_index_error(index, P::NAMES.len()))?;
        *slot = predicate;
        Ok(self)
    }

    pub fn with_sampler(mut self, sampler: Sampler<P, T>) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn is_valid(&self, params: &P, index: usize, value: f64) -> bool {
        self.validators
            .get(index)
            .map_or(false, |predicate| predicate(params, value))
    }

    /// Index of the first parameter of `params` this strategy rejects.
    fn first_rejected(&self, params: &P) -> Option<usize> {
        (0..P::NAMES.len()).find(|&i| !self.is_valid(params, i, params.get(i)))
    }
}

/// Generator binding, current parameters and strategy of one distribution.
#[derive(Debug, Clone)]
pub struct Parameterized<P, T> {
    generator: SharedGenerator,
    params: P,
    strategy: Strategy<P, T>,
}

impl<P: Parameters, T> Parameterized<P, T> {
    /// Bind `generator` with `params`, validating every parameter.
    pub fn new(generator: SharedGenerator, params: P, strategy: Strategy<P, T>) -> Result<Self> {
        if let Some(index) = strategy.first_rejected(&params) {
            return Err(invalid::<P>(index, params.get(index)));
        }
        Ok(Self {
            generator,
            params,
            strategy,
        })
    }

    pub fn generator(&self) -> &SharedGenerator {
        &self.generator
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    pub fn names(&self) -> &'static [&'static str] {
        P::NAMES
    }

    pub fn value(&self, index: usize) -> Result<f64> {
        check_index::<P>(index)?;
        Ok(self.params.get(index))
    }

    pub fn set_value(&mut self, index: usize, value: f64) -> Result<()> {
        check_index::<P>(index)?;
        if !self.strategy.is_valid(&self.params, index, value) {
            tracing::debug!(parameter = P::NAMES[index], value, "parameter rejected");
            return Err(invalid::<P>(index, value));
        }
        self.params.set(index, value);
        Ok(())
    }

    pub fn strategy(&self) -> &Strategy<P, T> {
        &self.strategy
    }

    /// Install a new strategy; fails if it rejects the current parameters.
    pub fn set_strategy(&mut self, strategy: Strategy<P, T>) -> Result<()> {
        if let Some(index) = strategy.first_rejected(&self.params) {
            return Err(invalid::<P>(index, self.params.get(index)));
        }
        self.strategy = strategy;
        Ok(())
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> T {
        (self.strategy.sampler)(rng, &self.params)
    }
}

fn check_index<P: Parameters>(index: usize) -> Result<()> {
    if index < P::NAMES.len() {
        Ok(())
    } else {
        Err(parameter_index_error(index, P::NAMES.len()))
    }
}

fn invalid<P: Parameters>(index: usize, value: f64) -> StochasticError {
    StochasticError::InvalidParameter {
        name: P::NAMES[index],
        value,
    }
}
