//! SplitMix64: a Weyl sequence passed through a 64-bit finaliser.
//!
//! The state advances by a fixed odd increment, which makes skipping in either
//! direction a single multiply-add.

use super::{check_state_index, Capabilities, Generator};
use crate::error::Result;
use crate::registry::{encode_word, Registry, Segments};

const GOLDEN_GAMMA: u64 = 0x9E3779B97F4A7C15;

/// SplitMix64 generator with every capability.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub const TAG: &'static str = "SMIX";

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// One finaliser pass; also used to expand seeds for multi-word generators.
    pub(crate) fn mix(mut z: u64) -> u64 {
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl Generator for SplitMix64 {
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
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        Self::mix(self.state)
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
        self.state = self
            .state
            .wrapping_add(GOLDEN_GAMMA.wrapping_mul(distance));
        Ok(())
    }

    fn previous_u64(&mut self) -> Result<u64> {
        let value = Self::mix(self.state);
        self.state = self.state.wrapping_sub(GOLDEN_GAMMA);
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
        self.state = segments.next_word("splitmix state")?;
        Ok(())
    }
}
