//! Word → value derivations shared by every generator.
//!
//! Wrappers and distributions rely on these being identical everywhere, so a
//! recorded or reversed stream maps to the same values as the original.

/// High 32 bits.
#[inline]
pub fn to_u32(word: u64) -> u32 {
    (word >> 32) as u32
}

#[inline]
pub fn to_i32(word: u64) -> i32 {
    to_u32(word) as i32
}

#[inline]
pub fn to_i64(word: u64) -> i64 {
    word as i64
}

#[inline]
pub fn to_bool(word: u64) -> bool {
    word >> 63 == 1
}

#[inline]
pub fn to_byte(word: u64) -> u8 {
    (word >> 56) as u8
}

/// Top 53 bits scaled into [0.0, 1.0).
#[inline]
pub fn to_f64(word: u64) -> f64 {
    (word >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
}

/// Top 24 bits scaled into [0.0, 1.0).
#[inline]
pub fn to_f32(word: u64) -> f32 {
    (word >> 40) as f32 * (1.0 / ((1u32 << 24) as f32))
}

/// Multiply-high reduction into `[0, bound)`.
#[inline]
pub fn below(word: u64, bound: u64) -> u64 {
    ((word as u128 * bound as u128) >> 64) as u64
}

/// Inclusive `[min, max]`; the full i64 span maps the word directly.
#[inline]
pub fn in_range(word: u64, min: i64, max: i64) -> i64 {
    let span = (max as i128 - min as i128 + 1) as u128;
    if span > u64::MAX as u128 {
        return word as i64;
    }
    (min as i128 + below(word, span as u64) as i128) as i64
}

/// Fill `dest` from little-endian words pulled from `next`.
pub fn fill(dest: &mut [u8], mut next: impl FnMut() -> u64) {
    for chunk in dest.chunks_mut(8) {
        let bytes = next().to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}
