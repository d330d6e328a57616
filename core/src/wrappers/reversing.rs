//! Reversing wrapper: run a reversible generator backwards.
//!
//! Direction is a read/write convention over the delegate's state, not a
//! transform of it. `n` forward draws followed by `n` draws of the same call
//! pattern through this wrapper leave the delegate exactly where it started.

use crate::error::{Result, StochasticError};
use crate::generator::{Capabilities, Generator};
use crate::registry::{Registry, Segments};

/// Swaps `next_u64` and `previous_u64` of its delegate and negates skips.
///
/// # Example
/// ```
/// use stochastic_core::generator::{Generator, SplitMix64};
/// use stochastic_core::wrappers::ReversingWrapper;
///
/// let mut rng = SplitMix64::new(5);
/// let first = rng.next_u64();
/// let second = rng.next_u64();
///
/// let mut reversed = ReversingWrapper::new(Box::new(rng)).unwrap();
/// assert_eq!(reversed.next_u64(), second);
/// assert_eq!(reversed.next_u64(), first);
/// ```
#[derive(Debug)]
pub struct ReversingWrapper {
    delegate: Box<dyn Generator>,
}

impl ReversingWrapper {
    pub const TAG: &'static str = "RVRSE";

    /// Wrap `delegate`, which must support `previous_u64`.
    pub fn new(delegate: Box<dyn Generator>) -> Result<Self> {
        if !delegate.capabilities().previous {
            return Err(StochasticError::InvalidArgument(format!(
                "{} cannot step back and so cannot be reversed",
                delegate.tag()
            )));
        }
        tracing::debug!(delegate = delegate.tag(), "wrapping generator for reversal");
        Ok(Self { delegate })
    }

    pub fn delegate(&self) -> &dyn Generator {
        self.delegate.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn Generator> {
        self.delegate
    }
}

impl Generator for ReversingWrapper {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn state_count(&self) -> usize {
        self.delegate.state_count()
    }

    fn capabilities(&self) -> Capabilities {
        self.delegate.capabilities()
    }

    /// # Panics
    /// Panics if the delegate stopped supporting `previous_u64` after
    /// construction, which no built-in generator does.
    fn next_u64(&mut self) -> u64 {
        match self.delegate.previous_u64() {
            Ok(value) => value,
            Err(e) => panic!("reversed delegate lost its step-back capability: {}", e),
        }
    }

    fn select_state(&self, index: usize) -> Result<u64> {
        self.delegate.select_state(index)
    }

    fn set_selected_state(&mut self, index: usize, value: u64) -> Result<()> {
        self.delegate.set_selected_state(index, value)
    }

    fn seed(&mut self, seed: u64) {
        self.delegate.seed(seed);
    }

    fn skip(&mut self, distance: u64) -> Result<()> {
        self.delegate.skip(distance.wrapping_neg())
    }

    fn previous_u64(&mut self) -> Result<u64> {
        Ok(self.delegate.next_u64())
    }

    fn copy(&self) -> Box<dyn Generator> {
        Box::new(ReversingWrapper {
            delegate: self.delegate.copy(),
        })
    }

    fn write_payload(&self, out: &mut Vec<String>) -> Result<()> {
        out.push(self.delegate.string_serialize()?);
        Ok(())
    }

    fn read_payload(&mut self, segments: &mut Segments<'_>, registry: &Registry) -> Result<()> {
        let delegate = registry.read_generator(segments)?;
        if !delegate.capabilities().previous {
            return Err(StochasticError::malformed(format!(
                "reversed delegate {} cannot step back",
                delegate.tag()
            )));
        }
        self.delegate = delegate;
        Ok(())
    }
}
