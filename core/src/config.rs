//! serde descriptions of generator chains and distributions.
//!
//! These are the JSON inputs of the `stochastic` CLI and the easiest way to
//! reproduce a run: a [`SamplingConfig`] plus its [`SamplingConfig::hash`]
//! identifies a sample sequence exactly.
//!
//! ```
//! use stochastic_core::config::SamplingConfig;
//!
//! let json = r#"{
//!     "generator": { "tag": "SMIX", "seed": 7, "wrappers": ["archival"] },
//!     "distribution": { "type": "poisson", "lambda": 3.0 },
//!     "count": 5
//! }"#;
//!
//! let config = SamplingConfig::from_json(json).unwrap();
//! let report = config.run().unwrap();
//! assert_eq!(report.samples.len(), 5);
//! assert!(report.final_state.starts_with("ARCHV`"));
//! ```

use crate::distributions::{
    share, Bernoulli, Binomial, ContinuousUniform, DiscreteUniform, Discretized, Distribution,
    Exponential, Geometric, Laplace, LogNormal, Normal, Poisson, SharedGenerator, Weibull,
};
use crate::error::{Result, StochasticError};
use crate::generator::Generator;
use crate::registry::Registry;
use crate::wrappers::{ArchivalWrapper, ReversingWrapper};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// Generator chains
// ============================================================================

/// A wrapper applied around the chain built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapperKind {
    Reversing,
    Archival,
}

/// A leaf generator plus the wrappers around it, innermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Registered leaf tag, e.g. `"SMIX"`
    pub tag: String,

    pub seed: u64,

    #[serde(default)]
    pub wrappers: Vec<WrapperKind>,
}

impl GeneratorConfig {
    pub fn new(tag: impl Into<String>, seed: u64) -> Self {
        Self {
            tag: tag.into(),
            seed,
            wrappers: Vec::new(),
        }
    }

    pub fn with_wrapper(mut self, wrapper: WrapperKind) -> Self {
        self.wrappers.push(wrapper);
        self
    }

    /// Build the chain through `registry`.
    pub fn build(&self, registry: &Registry) -> Result<Box<dyn Generator>> {
        let mut generator = registry.create(&self.tag, self.seed)?;
        for wrapper in &self.wrappers {
            generator = match wrapper {
                WrapperKind::Reversing => Box::new(ReversingWrapper::new(generator)?),
                WrapperKind::Archival => Box::new(ArchivalWrapper::new(generator)),
            };
        }
        Ok(generator)
    }

    /// Build the chain and share it for use by distributions.
    pub fn build_shared(&self, registry: &Registry) -> Result<SharedGenerator> {
        Ok(share(self.build(registry)?))
    }
}

// ============================================================================
// Distributions
// ============================================================================

/// One distribution with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistributionConfig {
    Bernoulli { alpha: f64 },
    DiscreteUniform { alpha: i64, beta: i64 },
    Geometric { alpha: f64 },
    Poisson { lambda: f64 },
    Binomial { alpha: f64, beta: u32 },
    ContinuousUniform { alpha: f64, beta: f64 },
    Exponential { lambda: f64 },
    Normal { mu: f64, sigma: f64 },
    LogNormal { mu: f64, sigma: f64 },
    Weibull { alpha: f64, lambda: f64 },
    Laplace { alpha: f64, mu: f64 },
    /// Nearest-integer rounding of another distribution
    Discretized { inner: Box<DistributionConfig> },
}

impl DistributionConfig {
    /// Build the distribution bound to `generator`.
    ///
    /// Parameter errors surface as `InvalidParameter`.
    pub fn build(&self, generator: SharedGenerator) -> Result<Box<dyn Distribution>> {
        let distribution: Box<dyn Distribution> = match *self {
            DistributionConfig::Bernoulli { alpha } => Box::new(Bernoulli::new(generator, alpha)?),
            DistributionConfig::DiscreteUniform { alpha, beta } => {
                Box::new(DiscreteUniform::new(generator, alpha, beta)?)
            }
            DistributionConfig::Geometric { alpha } => Box::new(Geometric::new(generator, alpha)?),
            DistributionConfig::Poisson { lambda } => Box::new(Poisson::new(generator, lambda)?),
            DistributionConfig::Binomial { alpha, beta } => {
                Box::new(Binomial::new(generator, alpha, beta)?)
            }
            DistributionConfig::ContinuousUniform { alpha, beta } => {
                Box::new(ContinuousUniform::new(generator, alpha, beta)?)
            }
            DistributionConfig::Exponential { lambda } => {
                Box::new(Exponential::new(generator, lambda)?)
            }
            DistributionConfig::Normal { mu, sigma } => Box::new(Normal::new(generator, mu, sigma)?),
            DistributionConfig::LogNormal { mu, sigma } => {
                Box::new(LogNormal::new(generator, mu, sigma)?)
            }
            DistributionConfig::Weibull { alpha, lambda } => {
                Box::new(Weibull::new(generator, alpha, lambda)?)
            }
            DistributionConfig::Laplace { alpha, mu } => Box::new(Laplace::new(generator, alpha, mu)?),
            DistributionConfig::Discretized { ref inner } => {
                Box::new(Discretized::new(inner.build(generator)?))
            }
        };
        Ok(distribution)
    }
}

// ============================================================================
// Sampling runs
// ============================================================================

fn default_count() -> usize {
    10
}

/// A generator chain, a distribution over it and a sample count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub generator: GeneratorConfig,
    pub distribution: DistributionConfig,
    #[serde(default = "default_count")]
    pub count: usize,
}

/// Result of [`SamplingConfig::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingReport {
    /// Hash of the config that produced this report
    pub config_hash: String,
    pub samples: Vec<f64>,
    /// `None` where undefined for the parameters
    pub mean: Option<f64>,
    pub variance: Option<f64>,
    /// Serialized generator chain after the last draw
    pub final_state: String,
}

impl SamplingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| StochasticError::InvalidArgument(format!("invalid sampling config: {}", e)))
    }

    /// Deterministic SHA-256 of the canonical JSON form.
    ///
    /// Struct fields serialize in declaration order, so equal configs always
    /// produce equal text.
    pub fn hash(&self) -> Result<String> {
        let json = serde_json::to_string(self).map_err(|e| {
            StochasticError::InvalidArgument(format!("config serialization failed: {}", e))
        })?;
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Build everything through the default tag set and draw `count` samples.
    pub fn run(&self) -> Result<SamplingReport> {
        self.run_with(&Registry::with_defaults())
    }

    pub fn run_with(&self, registry: &Registry) -> Result<SamplingReport> {
        let generator = self.generator.build_shared(registry)?;
        let mut distribution = self.distribution.build(generator.clone())?;
        tracing::debug!(
            tag = %self.generator.tag,
            count = self.count,
            "sampling from configured distribution"
        );

        let samples = (0..self.count).map(|_| distribution.next_f64()).collect();
        let final_state = generator.borrow().string_serialize()?;

        Ok(SamplingReport {
            config_hash: self.hash()?,
            samples,
            mean: distribution.mean().ok(),
            variance: distribution.variance().ok(),
            final_state,
        })
    }
}
