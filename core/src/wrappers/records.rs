//! Recorded output series and their wire encoding.

use crate::error::{Result, StochasticError};
use crate::registry::{parse_hex_u32, parse_hex_u64, parse_hex_u8, Segments, DELIMITER};
use sha2::{Digest, Sha256};
use std::fmt::Write;
use std::str::FromStr;

/// Number of recorded series (one per value kind).
pub const SERIES_COUNT: usize = 8;

/// One append-only series per produced value kind, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Records {
    pub bits: Vec<bool>,
    pub bytes: Vec<u8>,
    pub i32s: Vec<i32>,
    pub u32s: Vec<u32>,
    pub i64s: Vec<i64>,
    pub u64s: Vec<u64>,
    pub f32s: Vec<f32>,
    pub f64s: Vec<f64>,
}

impl Records {
    /// Lengths in wire order: bit, byte, i32, u32, i64, u64, f32, f64.
    pub fn lengths(&self) -> [usize; SERIES_COUNT] {
        [
            self.bits.len(),
            self.bytes.len(),
            self.i32s.len(),
            self.u32s.len(),
            self.i64s.len(),
            self.u64s.len(),
            self.f32s.len(),
            self.f64s.len(),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.lengths().iter().all(|&n| n == 0)
    }

    /// Append one segment per series, in wire order.
    pub fn write(&self, out: &mut Vec<String>) {
        out.push(self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect());
        out.push(self.bytes.iter().fold(String::new(), |mut s, b| {
            let _ = write!(s, "{:02x}", b);
            s
        }));
        out.push(join_decimal(&self.i32s));
        out.push(join_decimal(&self.u32s));
        out.push(join_decimal(&self.i64s));
        out.push(join_decimal(&self.u64s));
        out.push(join_hex(self.f32s.iter().map(|f| format!("{:08x}", f.to_bits()))));
        out.push(join_hex(self.f64s.iter().map(|f| format!("{:016x}", f.to_bits()))));
    }

    /// Read the eight series segments written by [`Records::write`].
    pub fn read(segments: &mut Segments<'_>) -> Result<Self> {
        let bits = segments
            .next_segment("bit series")?
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(StochasticError::malformed(format!("bad bit '{}'", other))),
            })
            .collect::<Result<Vec<_>>>()?;

        let byte_segment = segments.next_segment("byte series")?;
        if byte_segment.len() % 2 != 0 || !byte_segment.is_ascii() {
            return Err(StochasticError::malformed("byte series must be hex pairs"));
        }
        let bytes = (0..byte_segment.len())
            .step_by(2)
            .map(|i| {
                parse_hex_u8(&byte_segment[i..i + 2])
                    .map_err(|e| StochasticError::malformed(format!("bad byte: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let i32s = parse_decimal(segments.next_segment("i32 series")?)?;
        let u32s = parse_decimal(segments.next_segment("u32 series")?)?;
        let i64s = parse_decimal(segments.next_segment("i64 series")?)?;
        let u64s = parse_decimal(segments.next_segment("u64 series")?)?;
        let f32s = split_list(segments.next_segment("f32 series")?)
            .map(|s| {
                parse_hex_u32(s)
                    .map(f32::from_bits)
                    .map_err(|e| StochasticError::malformed(format!("bad f32 bits: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;
        let f64s = split_list(segments.next_segment("f64 series")?)
            .map(|s| {
                parse_hex_u64(s)
                    .map(f64::from_bits)
                    .map_err(|e| StochasticError::malformed(format!("bad f64 bits: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Records {
            bits,
            bytes,
            i32s,
            u32s,
            i64s,
            u64s,
            f32s,
            f64s,
        })
    }

    /// SHA-256 over the canonical encoding of every series.
    pub fn digest(&self) -> String {
        let mut segments = Vec::with_capacity(SERIES_COUNT);
        self.write(&mut segments);

        let mut hasher = Sha256::new();
        hasher.update(segments.join(&DELIMITER.to_string()).as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn join_decimal<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn join_hex(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(",")
}

fn split_list(segment: &str) -> impl Iterator<Item = &str> {
    segment.split(',').filter(move |_| !segment.is_empty())
}

fn parse_decimal<T>(segment: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    split_list(segment)
        .map(|s| {
            if s.starts_with('+') {
                return Err(StochasticError::malformed(format!("bad value '{}': signed", s)));
            }
            s.parse::<T>()
                .map_err(|e| StochasticError::malformed(format!("bad value '{}': {}", s, e)))
        })
        .collect()
}
