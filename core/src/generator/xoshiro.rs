//! xoshiro256** with four state words.
//!
//! Supports indexed state access and the fixed 2^128 `jump`, but neither
//! arbitrary skipping nor stepping back.

use super::{check_state_index, Capabilities, Generator, SplitMix64};
use crate::error::{Result, StochasticError};
use crate::registry::{encode_word, Registry, Segments};

const STATE_WORDS: usize = 4;
const JUMP: [u64; 4] = [
    0x180EC6D33CFD0ABA,
    0xD5A61266F0C9392C,
    0xA9582618E03FC9AA,
    0x39ABDC4529B1661C,
];

#[derive(Debug, Clone)]
pub struct Xoshiro256StarStar {
    s: [u64; STATE_WORDS],
}

impl Xoshiro256StarStar {
    pub const TAG: &'static str = "X256";

    /// Expand `seed` into four words with SplitMix64, as the reference does.
    pub fn new(seed: u64) -> Self {
        let mut expander = SplitMix64::new(seed);
        let mut s = [0u64; STATE_WORDS];
        for word in s.iter_mut() {
            *word = expander.next_u64();
        }
        Self { s }
    }

    /// Build from explicit words.
    pub fn from_state(s: [u64; STATE_WORDS]) -> Result<Self> {
        if s.iter().all(|&w| w == 0) {
            return Err(StochasticError::InvalidArgument(
                "xoshiro state must not be all zero".to_string(),
            ));
        }
        Ok(Self { s })
    }

    /// Advance by 2^128 steps.
    pub fn jump(&mut self) {
        let mut acc = [0u64; STATE_WORDS];
        for &word in JUMP.iter() {
            for bit in 0..64 {
                if word & (1u64 << bit) != 0 {
                    for (a, s) in acc.iter_mut().zip(self.s.iter()) {
                        *a ^= *s;
                    }
                }
                self.next_u64();
            }
        }
        self.s = acc;
    }
}

impl Generator for Xoshiro256StarStar {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn state_count(&self) -> usize {
        STATE_WORDS
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::STATE_ACCESS
    }

    fn next_u64(&mut self) -> u64 {
        let result = self.s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);

        result
    }

    fn select_state(&self, index: usize) -> Result<u64> {
        check_state_index(Self::TAG, index, STATE_WORDS)?;
        Ok(self.s[index])
    }

    fn set_selected_state(&mut self, index: usize, value: u64) -> Result<()> {
        check_state_index(Self::TAG, index, STATE_WORDS)?;
        let mut candidate = self.s;
        candidate[index] = value;
        *self = Self::from_state(candidate)?;
        Ok(())
    }

    fn seed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    fn copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }

    fn write_payload(&self, out: &mut Vec<String>) -> Result<()> {
        out.extend(self.s.iter().map(|&w| encode_word(w)));
        Ok(())
    }

    fn read_payload(&mut self, segments: &mut Segments<'_>, _registry: &Registry) -> Result<()> {
        let mut s = [0u64; STATE_WORDS];
        for word in s.iter_mut() {
            *word = segments.next_word("xoshiro state")?;
        }
        *self = Self::from_state(s)
            .map_err(|_| StochasticError::malformed("xoshiro state must not be all zero"))?;
        Ok(())
    }
}
