//! Archival wrapper: record every value the delegate produces.
//!
//! The recorded history survives any later change to the delegate's
//! algorithm, which a serialized leaf state alone does not: a new transition
//! function still parses the old state but yields different numbers.
//!
//! # Critical Invariants
//!
//! - Every returned value equals what the delegate alone would return
//! - Each series, read in call order, reproduces the returned values
//! - The recorder never wraps or rewrites, it only appends

use super::records::Records;
use super::Replay;
use crate::error::{Result, StochasticError};
use crate::generator::{Capabilities, Generator};
use crate::registry::{Registry, Segments};

/// Records each draw into a per-kind series while delegating it.
#[derive(Debug)]
pub struct ArchivalWrapper {
    delegate: Box<dyn Generator>,
    records: Records,
}

impl ArchivalWrapper {
    pub const TAG: &'static str = "ARCHV";

    pub fn new(delegate: Box<dyn Generator>) -> Self {
        tracing::debug!(delegate = delegate.tag(), "wrapping generator for archival");
        Self {
            delegate,
            records: Records::default(),
        }
    }

    /// Everything recorded so far.
    pub fn records(&self) -> &Records {
        &self.records
    }

    /// SHA-256 of the recorded series (hex).
    pub fn digest(&self) -> String {
        self.records.digest()
    }

    /// A replay-only view over a snapshot of the recorded series.
    pub fn replay(&self) -> Replay {
        Replay::new(self.records.clone())
    }

    pub fn delegate(&self) -> &dyn Generator {
        self.delegate.as_ref()
    }

    /// Release the delegate and the recorded series.
    pub fn into_parts(self) -> (Box<dyn Generator>, Records) {
        (self.delegate, self.records)
    }
}

impl Generator for ArchivalWrapper {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn state_count(&self) -> usize {
        self.delegate.state_count()
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            skip: false,
            previous: false,
            ..self.delegate.capabilities()
        }
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.delegate.next_u64();
        self.records.u64s.push(value);
        value
    }

    fn next_u32(&mut self) -> u32 {
        let value = self.delegate.next_u32();
        self.records.u32s.push(value);
        value
    }

    fn next_i32(&mut self) -> i32 {
        let value = self.delegate.next_i32();
        self.records.i32s.push(value);
        value
    }

    fn next_i64(&mut self) -> i64 {
        let value = self.delegate.next_i64();
        self.records.i64s.push(value);
        value
    }

    fn next_bool(&mut self) -> bool {
        let value = self.delegate.next_bool();
        self.records.bits.push(value);
        value
    }

    fn next_byte(&mut self) -> u8 {
        let value = self.delegate.next_byte();
        self.records.bytes.push(value);
        value
    }

    fn next_f32(&mut self) -> f32 {
        let value = self.delegate.next_f32();
        self.records.f32s.push(value);
        value
    }

    fn next_f64(&mut self) -> f64 {
        let value = self.delegate.next_f64();
        self.records.f64s.push(value);
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.delegate.fill_bytes(dest);
        self.records.bytes.extend_from_slice(dest);
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

    fn skip(&mut self, _distance: u64) -> Result<()> {
        Err(StochasticError::unsupported(
            "an archived stream cannot skip without recording",
        ))
    }

    fn previous_u64(&mut self) -> Result<u64> {
        Err(StochasticError::unsupported(
            "an archived stream cannot step back",
        ))
    }

    fn copy(&self) -> Box<dyn Generator> {
        Box::new(ArchivalWrapper {
            delegate: self.delegate.copy(),
            records: self.records.clone(),
        })
    }

    fn write_payload(&self, out: &mut Vec<String>) -> Result<()> {
        out.push(self.delegate.string_serialize()?);
        self.records.write(out);
        out.push(self.records.digest());
        Ok(())
    }

    fn read_payload(&mut self, segments: &mut Segments<'_>, registry: &Registry) -> Result<()> {
        let delegate = registry.read_generator(segments)?;
        let records = Records::read(segments)?;
        let digest = segments.next_segment("archive digest")?;
        if digest != records.digest() {
            return Err(StochasticError::malformed(
                "archive digest does not match recorded series",
            ));
        }
        self.delegate = delegate;
        self.records = records;
        Ok(())
    }
}
