//! `XS64`: xorshift64* with step-back
//!
//! One 64-bit state word, advanced by three xorshifts and scrambled on output
//! by a 64-bit multiply. Each xorshift is a bijection on non-zero words, so
//! undoing them in reverse order recovers the previous state exactly; this is
//! what `previous_u64` does. There is no closed-form jump, so `skip` stays
//! unsupported.

use super::{check_state_index, Capabilities, Generator};
use crate::error::{Result, StochasticError};
use crate::registry::{encode_word, Registry, Segments};

const MULTIPLIER: u64 = 0x2545F4914F6CDD1D;

/// xorshift64* over a single non-zero word.
///
/// # Example
/// ```
/// use stochastic_core::generator::{Generator, XorShift64Star};
///
/// let mut rng = XorShift64Star::new(12345);
/// let value = rng.next_u64();
/// assert_eq!(rng.previous_u64(), Ok(value));
/// ```
#[derive(Debug, Clone)]
pub struct XorShift64Star {
    /// Never zero.
    state: u64,
}

impl XorShift64Star {
    pub const TAG: &'static str = "XS64";

    /// Seed `0` maps to state `1`; zero is a fixed point of the xorshifts.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    /// The raw state word.
    pub fn state(&self) -> u64 {
        self.state
    }

    fn step_forward(mut x: u64) -> u64 {
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        x
    }

    fn step_back(x: u64) -> u64 {
        let x = unshift_right(x, 27);
        let x = unshift_left(x, 25);
        unshift_right(x, 12)
    }
}

/// Inverse of `x ^= x >> shift`.
fn unshift_right(y: u64, shift: u32) -> u64 {
    let mut x = y;
    let mut s = shift;
    while s < 64 {
        x ^= y >> s;
        s += shift;
    }
    x
}

/// Inverse of `x ^= x << shift`.
fn unshift_left(y: u64, shift: u32) -> u64 {
    let mut x = y;
    let mut s = shift;
    while s < 64 {
        x ^= y << s;
        s += shift;
    }
    x
}

impl Generator for XorShift64Star {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn state_count(&self) -> usize {
        1
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            read_access: true,
            write_access: true,
            skip: false,
            previous: true,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = Self::step_forward(self.state);
        self.state.wrapping_mul(MULTIPLIER)
    }

    fn select_state(&self, index: usize) -> Result<u64> {
        check_state_index(Self::TAG, index, 1)?;
        Ok(self.state)
    }

    fn set_selected_state(&mut self, index: usize, value: u64) -> Result<()> {
        check_state_index(Self::TAG, index, 1)?;
        if value == 0 {
            return Err(StochasticError::InvalidArgument(
                "xorshift state must be non-zero".to_string(),
            ));
        }
        self.state = value;
        Ok(())
    }

    fn seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn previous_u64(&mut self) -> Result<u64> {
        let value = self.state.wrapping_mul(MULTIPLIER);
        self.state = Self::step_back(self.state);
        Ok(value)
    }

    fn copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }

    fn write_payload(&self, out: &mut Vec<String>) -> Result<()> {
        out.push(encode_word(self.state));
        Ok(())
    }

    fn read_payload(&mut self, segments: &mut Segments<'_>, _registry: &Registry) -> Result<()> {
        let state = segments.next_word("xorshift state")?;
        if state == 0 {
            return Err(StochasticError::malformed("xorshift state must be non-zero"));
        }
        self.state = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_maps_to_one() {
        assert_eq!(XorShift64Star::new(0).state(), 1);
        assert_eq!(XorShift64Star::new(0).next_u64(), XorShift64Star::new(1).next_u64());
    }

    #[test]
    fn test_step_back_inverts_step_forward() {
        for seed in [1u64, 2, 12345, u64::MAX, 0x8000_0000_0000_0000] {
            let forward = XorShift64Star::step_forward(seed);
            assert_eq!(XorShift64Star::step_back(forward), seed);
        }
    }

    #[test]
    fn test_previous_walks_back_through_sequence() {
        let mut rng = XorShift64Star::new(99999);
        let start = rng.state();
        let forward: Vec<u64> = (0..50).map(|_| rng.next_u64()).collect();

        for expected in forward.iter().rev() {
            assert_eq!(rng.previous_u64().unwrap(), *expected);
        }
        assert_eq!(rng.state(), start);
    }

    #[test]
    fn test_zero_state_write_rejected() {
        let mut rng = XorShift64Star::new(5);
        assert!(matches!(
            rng.set_selected_state(0, 0),
            Err(StochasticError::InvalidArgument(_))
        ));
        assert_eq!(rng.state(), 5);
    }

    #[test]
    fn test_unit_draws_stay_below_one() {
        let mut rng = XorShift64Star::new(12345);
        assert!((0..1000).all(|_| (0.0..1.0).contains(&rng.next_f64())));
    }
}
