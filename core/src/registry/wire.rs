//! Wire format primitives
//!
//! `TAG` + `` ` `` + payload [+ `` ` `` + extra segment]*. Segments never
//! contain the delimiter, and every kind consumes a fixed number of them, so
//! nested payloads need no escaping.

use crate::error::{Result, StochasticError};

/// Segment delimiter.
pub const DELIMITER: char = '`';

/// Length of tags that may be created independently from the registry.
pub const LEAF_TAG_LEN: usize = 4;

/// Length of chain-only wrapper tags.
pub const WRAPPER_TAG_LEN: usize = 5;

/// Deepest wrapper chain accepted when deserializing.
pub const MAX_CHAIN_DEPTH: usize = 64;

/// Cursor over the segments of a serialized generator.
#[derive(Debug)]
pub struct Segments<'a> {
    inner: std::str::Split<'a, char>,
    depth: usize,
}

impl<'a> Segments<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            inner: data.split(DELIMITER),
            depth: 0,
        }
    }

    /// Next raw segment; `what` names it in the error.
    pub fn next_segment(&mut self, what: &str) -> Result<&'a str> {
        self.inner
            .next()
            .ok_or_else(|| StochasticError::malformed(format!("missing {}", what)))
    }

    /// Next segment parsed as a hex state word.
    pub fn next_word(&mut self, what: &str) -> Result<u64> {
        let segment = self.next_segment(what)?;
        parse_hex_u64(segment)
            .map_err(|e| StochasticError::malformed(format!("bad {}: {}", what, e)))
    }

    /// Fail unless every segment was consumed.
    pub fn finish(mut self) -> Result<()> {
        match self.inner.next() {
            None => Ok(()),
            Some(extra) => Err(StochasticError::malformed(format!(
                "unexpected trailing segment '{}'",
                extra
            ))),
        }
    }

    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.depth >= MAX_CHAIN_DEPTH {
            return Err(StochasticError::malformed(format!(
                "wrapper chain deeper than {}",
                MAX_CHAIN_DEPTH
            )));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// A state word as 16 lowercase hex digits.
pub fn encode_word(word: u64) -> String {
    format!("{:016x}", word)
}

/// Bare hex digits only; `from_str_radix` alone would also take a sign.
fn hex_digits(segment: &str) -> Result<&str> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(StochasticError::malformed(format!("'{}' is not hex", segment)));
    }
    Ok(segment)
}

pub(crate) fn parse_hex_u64(segment: &str) -> Result<u64> {
    u64::from_str_radix(hex_digits(segment)?, 16)
        .map_err(|e| StochasticError::malformed(format!("'{}': {}", segment, e)))
}

pub(crate) fn parse_hex_u32(segment: &str) -> Result<u32> {
    u32::from_str_radix(hex_digits(segment)?, 16)
        .map_err(|e| StochasticError::malformed(format!("'{}': {}", segment, e)))
}

pub(crate) fn parse_hex_u8(segment: &str) -> Result<u8> {
    u8::from_str_radix(hex_digits(segment)?, 16)
        .map_err(|e| StochasticError::malformed(format!("'{}': {}", segment, e)))
}

/// Whether `tag` is usable as a registry key.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.contains(DELIMITER)
}

/// Wrapper tags are chain-only.
pub fn is_wrapper_tag(tag: &str) -> bool {
    tag.chars().count() == WRAPPER_TAG_LEN
}
