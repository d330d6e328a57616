//! Tag registry and tag-directed deserialization
//!
//! A [`Registry`] maps short tag strings to prototype generators. Deserializing
//! looks up the tag in front of the first delimiter, copies the prototype and
//! lets it read the rest of the payload. Wrappers read their delegate through
//! the same registry, so arbitrarily deep chains round-trip:
//!
//! ```
//! use stochastic_core::generator::{Generator, SplitMix64};
//! use stochastic_core::registry::Registry;
//! use stochastic_core::wrappers::ArchivalWrapper;
//!
//! let registry = Registry::with_defaults();
//! let mut archived = ArchivalWrapper::new(Box::new(SplitMix64::new(9)));
//! archived.next_u64();
//!
//! let data = registry.serialize(&archived).unwrap();
//! let restored = registry.deserialize(&data).unwrap();
//! assert_eq!(restored.string_serialize().unwrap(), data);
//! ```
//!
//! A process-wide default registry, pre-populated with every built-in kind,
//! is reachable through the free functions of this module.

mod wire;

pub(crate) use wire::{parse_hex_u32, parse_hex_u64, parse_hex_u8};
pub use wire::{
    encode_word, is_valid_tag, is_wrapper_tag, Segments, DELIMITER, LEAF_TAG_LEN,
    MAX_CHAIN_DEPTH, WRAPPER_TAG_LEN,
};

use crate::error::{Result, StochasticError};
use crate::generator::{Generator, Lcg64, SplitMix64, XorShift64Star, Xoshiro256StarStar};
use crate::wrappers::{ArchivalWrapper, Replay, ReversingWrapper};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Mapping from tag to prototype generator.
#[derive(Debug, Default)]
pub struct Registry {
    prototypes: BTreeMap<String, Box<dyn Generator>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in leaf and wrapper kind.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_tag(Box::new(SplitMix64::new(0)));
        registry.register_tag(Box::new(XorShift64Star::new(1)));
        registry.register_tag(Box::new(Lcg64::new(0)));
        registry.register_tag(Box::new(Xoshiro256StarStar::new(0)));
        registry.register_tag(Box::new(Replay::default()));
        // Wrapper prototypes only carry a placeholder delegate; reading a
        // payload replaces it.
        if let Ok(reversing) = ReversingWrapper::new(Box::new(SplitMix64::new(0))) {
            registry.register_tag(Box::new(reversing));
        }
        registry.register_tag(Box::new(ArchivalWrapper::new(Box::new(SplitMix64::new(0)))));
        registry
    }

    /// Insert `instance` under its tag unless the tag is empty, contains the
    /// delimiter, or is already present.
    ///
    /// Returns whether the insertion happened; an existing entry is never
    /// overwritten.
    pub fn register_tag(&mut self, instance: Box<dyn Generator>) -> bool {
        let tag = instance.tag().to_string();
        if !is_valid_tag(&tag) {
            tracing::debug!(tag = %tag, "rejected invalid tag");
            return false;
        }
        if self.prototypes.contains_key(&tag) {
            tracing::debug!(tag = %tag, "tag already registered");
            return false;
        }
        tracing::debug!(tag = %tag, "registered generator prototype");
        self.prototypes.insert(tag, instance);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.prototypes.contains_key(tag)
    }

    /// Read-only view of the tag → prototype map.
    pub fn tags(&self) -> &BTreeMap<String, Box<dyn Generator>> {
        &self.prototypes
    }

    /// `generator.string_serialize()`.
    pub fn serialize(&self, generator: &dyn Generator) -> Result<String> {
        generator.string_serialize()
    }

    /// Rebuild a generator (or a whole wrapper chain) from serialized data.
    pub fn deserialize(&self, data: &str) -> Result<Box<dyn Generator>> {
        let (tag, payload) = data
            .split_once(DELIMITER)
            .ok_or_else(|| StochasticError::malformed("missing tag delimiter"))?;
        let mut generator = self.prototype(tag)?.copy();
        generator.string_deserialize(payload, self)?;
        tracing::trace!(tag = %tag, "deserialized generator");
        Ok(generator)
    }

    /// Read one nested generator (tag and payload) from `segments`.
    ///
    /// Wrappers call this for their delegate.
    pub fn read_generator(&self, segments: &mut Segments<'_>) -> Result<Box<dyn Generator>> {
        segments.enter()?;
        let tag = segments.next_segment("tag")?;
        let mut generator = self.prototype(tag)?.copy();
        generator.read_payload(segments, self)?;
        segments.leave();
        Ok(generator)
    }

    /// A freshly seeded generator of a leaf kind.
    ///
    /// Wrapper tags are chain-only and fail with `InvalidArgument`.
    pub fn create(&self, tag: &str, seed: u64) -> Result<Box<dyn Generator>> {
        if is_wrapper_tag(tag) {
            return Err(StochasticError::InvalidArgument(format!(
                "{} is a wrapper tag and cannot be created on its own",
                tag
            )));
        }
        let mut generator = self.prototype(tag)?.copy();
        generator.seed(seed);
        Ok(generator)
    }

    /// An independent registry holding copies of every prototype.
    pub fn snapshot(&self) -> Self {
        Self {
            prototypes: self
                .prototypes
                .iter()
                .map(|(tag, prototype)| (tag.clone(), prototype.copy()))
                .collect(),
        }
    }

    fn prototype(&self, tag: &str) -> Result<&dyn Generator> {
        self.prototypes
            .get(tag)
            .map(|p| p.as_ref())
            .ok_or_else(|| StochasticError::UnknownTag(tag.to_string()))
    }
}

// ============================================================================
// Process-wide default registry
// ============================================================================

/// The lock is only held by the caller of this function; the free
/// functions below release it before running any generator code, so a
/// kind's `read_payload` may itself call back into [`deserialize`].
fn global() -> MutexGuard<'static, Registry> {
    static GLOBAL: OnceLock<Mutex<Registry>> = OnceLock::new();
    GLOBAL
        .get_or_init(|| Mutex::new(Registry::with_defaults()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Register a prototype in the default registry.
pub fn register_tag(instance: Box<dyn Generator>) -> bool {
    global().register_tag(instance)
}

/// Deserialize through the default registry.
pub fn deserialize(data: &str) -> Result<Box<dyn Generator>> {
    let registry = global().snapshot();
    registry.deserialize(data)
}

pub fn serialize(generator: &dyn Generator) -> Result<String> {
    generator.string_serialize()
}

/// Tags currently held by the default registry, sorted.
pub fn tags() -> Vec<String> {
    global().tags().keys().cloned().collect()
}

/// Create a seeded leaf generator through the default registry.
pub fn create(tag: &str, seed: u64) -> Result<Box<dyn Generator>> {
    let registry = global().snapshot();
    registry.create(tag, seed)
}
