//! Generator contract
//!
//! Every source of randomness in the crate, leaf or wrapper, implements
//! [`Generator`]. The contract is small: one required primitive
//! (`next_u64`), a set of derived draws that every implementation computes the
//! same way, and a handful of capability-gated state operations.
//!
//! # Critical Invariants
//!
//! 1. Same seed → same stream, for every generator kind
//! 2. Capability-gated operations fail with `UnsupportedOperation`, never a no-op
//! 3. `copy()` is deep: the copy and the original never share state
//! 4. Every derived draw consumes a fixed number of `next_u64` steps, so call
//!    patterns stay reversible

pub mod derive;
mod lcg;
mod splitmix;
mod xorshift;
mod xoshiro;

pub use lcg::Lcg64;
pub use splitmix::SplitMix64;
pub use xorshift::XorShift64Star;
pub use xoshiro::Xoshiro256StarStar;

use crate::error::{Result, StochasticError};
use crate::registry::{Registry, Segments, DELIMITER};
use std::fmt::Debug;

/// Capability flags a generator reports about its state model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// `select_state` is available
    pub read_access: bool,
    /// `set_selected_state` is available
    pub write_access: bool,
    /// `skip` is available
    pub skip: bool,
    /// `previous_u64` is available
    pub previous: bool,
}

impl Capabilities {
    /// No capability at all.
    pub const NONE: Capabilities = Capabilities {
        read_access: false,
        write_access: false,
        skip: false,
        previous: false,
    };

    /// Every capability.
    pub const ALL: Capabilities = Capabilities {
        read_access: true,
        write_access: true,
        skip: true,
        previous: true,
    };

    /// Indexed state access only.
    pub const STATE_ACCESS: Capabilities = Capabilities {
        read_access: true,
        write_access: true,
        skip: false,
        previous: false,
    };
}

/// A stateful pseudorandom generator.
///
/// Implementors provide `next_u64`, the state model, seeding, copying and
/// their payload encoding. Everything else has a default built on those.
/// Wrappers override whatever they need to observe or transform.
///
/// # Example
/// ```
/// use stochastic_core::generator::{Generator, SplitMix64};
///
/// let mut a = SplitMix64::new(42);
/// let mut b = a.copy();
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
pub trait Generator: Debug + Send {
    /// Short string identifying the concrete kind (see `registry`).
    fn tag(&self) -> &str;

    /// Number of independent 64-bit state words.
    fn state_count(&self) -> usize;

    /// Capability flags for the state operations below.
    fn capabilities(&self) -> Capabilities;

    /// Advance one step and return the next 64-bit word.
    fn next_u64(&mut self) -> u64;

    /// High 32 bits of one word.
    fn next_u32(&mut self) -> u32 {
        derive::to_u32(self.next_u64())
    }

    fn next_i32(&mut self) -> i32 {
        derive::to_i32(self.next_u64())
    }

    fn next_i64(&mut self) -> i64 {
        derive::to_i64(self.next_u64())
    }

    /// Top bit of one word.
    fn next_bool(&mut self) -> bool {
        derive::to_bool(self.next_u64())
    }

    /// Top byte of one word.
    fn next_byte(&mut self) -> u8 {
        derive::to_byte(self.next_u64())
    }

    /// Uniform `f32` in [0.0, 1.0).
    fn next_f32(&mut self) -> f32 {
        derive::to_f32(self.next_u64())
    }

    /// Uniform `f64` in [0.0, 1.0).
    fn next_f64(&mut self) -> f64 {
        derive::to_f64(self.next_u64())
    }

    /// Fill `dest` with random bytes, one word per 8 bytes (or part thereof).
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        derive::fill(dest, || self.next_u64());
    }

    /// Uniform value in `[0, bound)` from exactly one word.
    ///
    /// # Panics
    /// Panics if `bound` is zero
    fn next_below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "bound must be positive");
        derive::below(self.next_u64(), bound)
    }

    /// Uniform value in `[min, max]` (inclusive) from exactly one word.
    ///
    /// # Panics
    /// Panics if `min > max`
    fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "min must not exceed max");
        derive::in_range(self.next_u64(), min, max)
    }

    /// Read state word `index`.
    fn select_state(&self, index: usize) -> Result<u64> {
        let _ = index;
        Err(StochasticError::unsupported(format!(
            "{} does not expose state reads",
            self.tag()
        )))
    }

    /// Overwrite state word `index`.
    fn set_selected_state(&mut self, index: usize, value: u64) -> Result<()> {
        let _ = (index, value);
        Err(StochasticError::unsupported(format!(
            "{} does not expose state writes",
            self.tag()
        )))
    }

    /// Reinitialise every state word from one scalar.
    fn seed(&mut self, seed: u64);

    /// Advance the state by `distance` steps without producing output.
    ///
    /// Passing `n.wrapping_neg()` retreats by `n` steps.
    fn skip(&mut self, distance: u64) -> Result<()> {
        let _ = distance;
        Err(StochasticError::unsupported(format!(
            "{} cannot skip",
            self.tag()
        )))
    }

    /// Return the value immediately preceding the current position and
    /// rewind one step.
    fn previous_u64(&mut self) -> Result<u64> {
        Err(StochasticError::unsupported(format!(
            "{} cannot step back",
            self.tag()
        )))
    }

    /// Deep, independent copy of the same kind and state.
    fn copy(&self) -> Box<dyn Generator>;

    /// Append this generator's payload segments (everything after the tag).
    fn write_payload(&self, out: &mut Vec<String>) -> Result<()>;

    /// Replace this generator's state with the payload read from `segments`.
    ///
    /// Implementations must leave `self` untouched when they fail.
    fn read_payload(&mut self, segments: &mut Segments<'_>, registry: &Registry) -> Result<()>;

    /// `TAG` + delimiter + payload.
    fn string_serialize(&self) -> Result<String> {
        let mut out = vec![self.tag().to_string()];
        self.write_payload(&mut out)?;
        Ok(out.join(&DELIMITER.to_string()))
    }

    /// Restore state from a payload (the data after the tag and its delimiter).
    fn string_deserialize(&mut self, payload: &str, registry: &Registry) -> Result<()> {
        let mut segments = Segments::new(payload);
        self.read_payload(&mut segments, registry)?;
        segments.finish()
    }
}

/// Fail with `UnsupportedOperation` for a state index past `state_count`.
pub(crate) fn check_state_index(tag: &str, index: usize, state_count: usize) -> Result<()> {
    if index < state_count {
        Ok(())
    } else {
        Err(StochasticError::unsupported(format!(
            "{} has {} state word(s), index {} is out of range",
            tag, state_count, index
        )))
    }
}

macro_rules! forward_generator {
    () => {
        fn tag(&self) -> &str {
            (**self).tag()
        }
        fn state_count(&self) -> usize {
            (**self).state_count()
        }
        fn capabilities(&self) -> Capabilities {
            (**self).capabilities()
        }
        fn next_u64(&mut self) -> u64 {
            (**self).next_u64()
        }
        fn next_u32(&mut self) -> u32 {
            (**self).next_u32()
        }
        fn next_i32(&mut self) -> i32 {
            (**self).next_i32()
        }
        fn next_i64(&mut self) -> i64 {
            (**self).next_i64()
        }
        fn next_bool(&mut self) -> bool {
            (**self).next_bool()
        }
        fn next_byte(&mut self) -> u8 {
            (**self).next_byte()
        }
        fn next_f32(&mut self) -> f32 {
            (**self).next_f32()
        }
        fn next_f64(&mut self) -> f64 {
            (**self).next_f64()
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            (**self).fill_bytes(dest)
        }
        fn next_below(&mut self, bound: u64) -> u64 {
            (**self).next_below(bound)
        }
        fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
            (**self).next_in_range(min, max)
        }
        fn select_state(&self, index: usize) -> Result<u64> {
            (**self).select_state(index)
        }
        fn set_selected_state(&mut self, index: usize, value: u64) -> Result<()> {
            (**self).set_selected_state(index, value)
        }
        fn seed(&mut self, seed: u64) {
            (**self).seed(seed)
        }
        fn skip(&mut self, distance: u64) -> Result<()> {
            (**self).skip(distance)
        }
        fn previous_u64(&mut self) -> Result<u64> {
            (**self).previous_u64()
        }
        fn copy(&self) -> Box<dyn Generator> {
            (**self).copy()
        }
        fn write_payload(&self, out: &mut Vec<String>) -> Result<()> {
            (**self).write_payload(out)
        }
        fn read_payload(&mut self, segments: &mut Segments<'_>, registry: &Registry) -> Result<()> {
            (**self).read_payload(segments, registry)
        }
        fn string_serialize(&self) -> Result<String> {
            (**self).string_serialize()
        }
        fn string_deserialize(&mut self, payload: &str, registry: &Registry) -> Result<()> {
            (**self).string_deserialize(payload, registry)
        }
    };
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    forward_generator!();
}

impl<G: Generator + ?Sized> Generator for &mut G {
    forward_generator!();
}

/// Generic helpers available on every generator, including `dyn Generator`.
pub trait GeneratorExt: Generator {
    /// Fisher–Yates shuffle, one `next_below` per swap (descending index).
    ///
    /// # Panics
    /// Never; every bound passed to `next_below` is at least 2. Empty and
    /// single-element slices draw nothing.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_below(i as u64 + 1) as usize;
            items.swap(i, j);
        }
    }

    /// Uniformly chosen element, or `None` for an empty slice.
    ///
    /// # Panics
    /// Never; the empty case returns before `next_below` is reached.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_below(items.len() as u64) as usize;
        items.get(index)
    }
}

impl<G: Generator + ?Sized> GeneratorExt for G {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_generator_forwards_overrides() {
        let mut plain = SplitMix64::new(7);
        let mut boxed: Box<dyn Generator> = Box::new(SplitMix64::new(7));

        assert_eq!(boxed.tag(), "SMIX");
        assert_eq!(plain.next_u64(), boxed.next_u64());
        assert_eq!(plain.previous_u64(), boxed.previous_u64());
        assert_eq!(boxed.capabilities(), Capabilities::ALL);
    }

    #[test]
    fn test_default_capability_gates_fail() {
        let mut rng = Xoshiro256StarStar::new(1);
        assert!(matches!(
            rng.skip(3),
            Err(StochasticError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            rng.previous_u64(),
            Err(StochasticError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_state_index_out_of_range() {
        let rng = SplitMix64::new(1);
        assert!(matches!(
            rng.select_state(1),
            Err(StochasticError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = SplitMix64::new(99);
        let mut items: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut items);

        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = SplitMix64::new(3);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        assert_eq!(rng.choose(&[5]), Some(&5));
    }

    #[test]
    fn test_shuffle_short_slices_draw_nothing() {
        let mut rng = SplitMix64::new(3);
        let mut empty: [u8; 0] = [];
        rng.shuffle(&mut empty);
        let mut single = [9u8];
        rng.shuffle(&mut single);
        assert_eq!(single, [9]);

        let mut untouched = SplitMix64::new(3);
        assert_eq!(rng.next_u64(), untouched.next_u64());
    }

    #[test]
    #[should_panic(expected = "min must not exceed max")]
    fn test_range_invalid_bounds() {
        let mut rng = SplitMix64::new(12345);
        rng.next_in_range(100, 50);
    }
}
