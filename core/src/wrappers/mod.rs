//! Wrapper generators
//!
//! Each wrapper owns exactly one delegate and implements [`Generator`] by
//! delegating to it, transforming or observing the stream without touching
//! the delegate's algorithm. Ownership rules out cycles: a wrapper can only be
//! built from a generator that already exists.
//!
//! - [`ReversingWrapper`]: runs a reversible generator backwards
//! - [`ArchivalWrapper`]: records every produced value
//! - [`Replay`]: replays recorded values, wrapping around when exhausted
//! - [`RandAdapter`] / [`ForeignGenerator`]: bridges to and from `rand`
//!
//! [`Generator`]: crate::generator::Generator

mod archival;
mod foreign;
mod records;
mod replay;
mod reversing;

pub use archival::ArchivalWrapper;
pub use foreign::{ForeignGenerator, RandAdapter};
pub use records::{Records, SERIES_COUNT};
pub use replay::Replay;
pub use reversing::ReversingWrapper;
