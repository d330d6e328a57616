//! Replay-only view over recorded series.
//!
//! Each value kind reads its own series through its own cursor. Once a series
//! is exhausted its cursor wraps back to index 0, so a replay never runs dry;
//! an empty series yields the zero value of its kind.

use super::records::{Records, SERIES_COUNT};
use crate::error::{Result, StochasticError};
use crate::generator::{Capabilities, Generator};
use crate::registry::{Registry, Segments};

const BIT: usize = 0;
const BYTE: usize = 1;
const I32: usize = 2;
const U32: usize = 3;
const I64: usize = 4;
const U64: usize = 5;
const F32: usize = 6;
const F64: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct Replay {
    records: Records,
    cursors: [usize; SERIES_COUNT],
}

impl Replay {
    pub const TAG: &'static str = "RPLY";

    pub fn new(records: Records) -> Self {
        Self {
            records,
            cursors: [0; SERIES_COUNT],
        }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Next read position of each series, in wire order.
    pub fn cursors(&self) -> [usize; SERIES_COUNT] {
        self.cursors
    }
}

/// Read `series[cursor]` and advance the cursor modulo the series length.
fn take<T: Copy + Default>(series: &[T], cursor: &mut usize) -> T {
    if series.is_empty() {
        return T::default();
    }
    let value = series[*cursor];
    *cursor = (*cursor + 1) % series.len();
    value
}

impl Generator for Replay {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn state_count(&self) -> usize {
        0
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    fn next_u64(&mut self) -> u64 {
        take(&self.records.u64s, &mut self.cursors[U64])
    }

    fn next_u32(&mut self) -> u32 {
        take(&self.records.u32s, &mut self.cursors[U32])
    }

    fn next_i32(&mut self) -> i32 {
        take(&self.records.i32s, &mut self.cursors[I32])
    }

    fn next_i64(&mut self) -> i64 {
        take(&self.records.i64s, &mut self.cursors[I64])
    }

    fn next_bool(&mut self) -> bool {
        take(&self.records.bits, &mut self.cursors[BIT])
    }

    fn next_byte(&mut self) -> u8 {
        take(&self.records.bytes, &mut self.cursors[BYTE])
    }

    fn next_f32(&mut self) -> f32 {
        take(&self.records.f32s, &mut self.cursors[F32])
    }

    fn next_f64(&mut self) -> f64 {
        take(&self.records.f64s, &mut self.cursors[F64])
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = take(&self.records.bytes, &mut self.cursors[BYTE]);
        }
    }

    /// Rewind every series; the seed value is irrelevant to a replay.
    fn seed(&mut self, _seed: u64) {
        self.cursors = [0; SERIES_COUNT];
    }

    fn copy(&self) -> Box<dyn Generator> {
        Box::new(self.clone())
    }

    fn write_payload(&self, out: &mut Vec<String>) -> Result<()> {
        self.records.write(out);
        out.push(
            self.cursors
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );
        Ok(())
    }

    fn read_payload(&mut self, segments: &mut Segments<'_>, _registry: &Registry) -> Result<()> {
        let records = Records::read(segments)?;
        let cursor_segment = segments.next_segment("replay cursors")?;
        let parsed = cursor_segment
            .split(',')
            .map(|s| {
                s.parse::<usize>()
                    .map_err(|e| StochasticError::malformed(format!("bad cursor '{}': {}", s, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let cursors: [usize; SERIES_COUNT] = parsed
            .try_into()
            .map_err(|_| StochasticError::malformed("replay needs one cursor per series"))?;
        let lengths = records.lengths();
        for (cursor, len) in cursors.iter().zip(lengths.iter()) {
            if *cursor > 0 && cursor >= len {
                return Err(StochasticError::malformed(format!(
                    "cursor {} outside series of length {}",
                    cursor, len
                )));
            }
        }

        self.records = records;
        self.cursors = cursors;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_around_when_exhausted() {
        let mut replay = Replay::new(Records {
            u64s: vec![10, 20, 30],
            ..Records::default()
        });

        let drawn: Vec<u64> = (0..7).map(|_| replay.next_u64()).collect();
        assert_eq!(drawn, vec![10, 20, 30, 10, 20, 30, 10]);
    }

    #[test]
    fn test_empty_series_yields_zero() {
        let mut replay = Replay::default();
        assert_eq!(replay.next_u64(), 0);
        assert!(!replay.next_bool());
        assert_eq!(replay.next_f64(), 0.0);
    }

    #[test]
    fn test_series_are_independent() {
        let mut replay = Replay::new(Records {
            bits: vec![true],
            u32s: vec![1, 2],
            ..Records::default()
        });
        assert_eq!(replay.next_u32(), 1);
        assert!(replay.next_bool());
        assert_eq!(replay.next_u32(), 2);
        assert_eq!(replay.cursors()[U32], 0);
    }

    #[test]
    fn test_seed_rewinds() {
        let mut replay = Replay::new(Records {
            f64s: vec![0.5, 0.25],
            ..Records::default()
        });
        replay.next_f64();
        replay.seed(123);
        assert_eq!(replay.next_f64(), 0.5);
    }

    #[test]
    fn test_cursor_out_of_range_rejected() {
        let registry = Registry::with_defaults();
        assert!(registry
            .deserialize("RPLY`````````5,0,0,0,0,0,0,0")
            .is_err());
    }
}
