//! 64-bit linear congruential generator with a finalised output.
//!
//! The raw LCG has full period 2^64, so any skip distance (including the
//! wrapped negation used to retreat) is an O(log n) jump.

use super::{check_state_index, Capabilities, Generator};
use crate::error::Result;
use crate::registry::{encode_word, Registry, Segments};

const MULTIPLIER: u64 = 6364136223846793005;
const INCREMENT: u64 = 1442695040888963407;
const MULTIPLIER_INVERSE: u64 = inverse_mod_2_64(MULTIPLIER);

/// Newton iteration for the inverse of an odd number modulo 2^64.
const fn inverse_mod_2_64(a: u64) -> u64 {
    let mut x = a;
    let mut i = 0;
    while i < 6 {
        x = x.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(x)));
        i += 1;
    }
    x
}

/// Murmur3 64-bit finaliser.
fn output(state: u64) -> u64 {
    let mut z = state;
    z = (z ^ (z >> 33)).wrapping_mul(0xFF51AFD7ED558CCD);
    z = (z ^ (z >> 33)).wrapping_mul(0xC4CEB9FE1A85EC53);
    z ^ (z >> 33)
}

#[derive(Debug, Clone)]
pub struct Lcg64 {
    state: u64,
}

impl Lcg64 {
    pub const TAG: &'static str = "LC64";

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl Generator for Lcg64 {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn state_count(&self) -> usize {
        1
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        output(self.state)
    }

    fn select_state(&self, index: usize) -> Result<u64> {
        check_state_index(Self::TAG, index, 1)?;
        Ok(self.state)
    }

    fn set_selected_state(&mut self, index: usize, value: u64) -> Result<()> {
        check_state_index(Self::TAG, index, 1)?;
        self.state = value;
        Ok(())
    }

    fn seed(&mut self, seed: u64) {
        self.state = seed;
    }

    fn skip(&mut self, distance: u64) -> Result<()> {
        // Brown, "Random Number Generation with Arbitrary Strides" (1994)
        let mut acc_mult = 1u64;
        let mut acc_plus = 0u64;
        let mut cur_mult = MULTIPLIER;
        let mut cur_plus = INCREMENT;
        let mut delta = distance;
        while delta > 0 {
            if delta & 1 == 1 {
                acc_mult = acc_mult.wrapping_mul(cur_mult);
                acc_plus = acc_plus.wrapping_mul(cur_mult).wrapping_add(cur_plus);
            }
            cur_plus = cur_mult.wrapping_add(1).wrapping_mul(cur_plus);
            cur_mult = cur_mult.wrapping_mul(cur_mult);
            delta >>= 1;
        }
        self.state = acc_mult.wrapping_mul(self.state).wrapping_add(acc_plus);
        Ok(())
    }

    fn previous_u64(&mut self) -> Result<u64> {
        let value = output(self.state);
        self.state = self
            .state
            .wrapping_sub(INCREMENT)
            .wrapping_mul(MULTIPLIER_INVERSE);
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
        self.state = segments.next_word("lcg state")?;
        Ok(())
    }
}
