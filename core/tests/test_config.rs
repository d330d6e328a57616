//! Sampling Config Tests
//!
//! Critical invariants tested:
//! - Same config = same report (samples, moments, final state, hash)
//! - The final state restores a chain that continues the run
//! - Bad input fails before any sampling

use stochastic_core::config::{DistributionConfig, GeneratorConfig, SamplingConfig, WrapperKind};
use stochastic_core::distributions::{share, Distribution, SharedGenerator};
use stochastic_core::error::StochasticError;
use stochastic_core::generator::Generator;
use stochastic_core::registry::Registry;

fn poisson_config() -> SamplingConfig {
    SamplingConfig::from_json(
        r#"{
            "generator": { "tag": "XS64", "seed": 42, "wrappers": ["archival"] },
            "distribution": { "type": "poisson", "lambda": 4.0 },
            "count": 25
        }"#,
    )
    .unwrap()
}

#[test]
fn test_same_config_same_report() {
    let config = poisson_config();
    let first = config.run().unwrap();
    let second = poisson_config().run().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.samples.len(), 25);
    assert_eq!(first.mean, Some(4.0));
    assert_eq!(first.variance, Some(4.0));
    assert_eq!(first.config_hash, config.hash().unwrap());
    assert!(first.samples.iter().all(|x| x.fract() == 0.0 && *x >= 0.0));
}

#[test]
fn test_different_seed_different_hash() {
    let mut config = poisson_config();
    let before = config.hash().unwrap();
    config.generator.seed = 43;
    assert_ne!(config.hash().unwrap(), before);
}

#[test]
fn test_final_state_continues_run() {
    let registry = Registry::with_defaults();
    let mut longer = poisson_config();
    longer.count = 30;
    let full = longer.run().unwrap();

    let short = poisson_config().run().unwrap();
    let generator = share_restored(&registry, &short.final_state);
    let mut poisson = DistributionConfig::Poisson { lambda: 4.0 }
        .build(generator)
        .unwrap();
    let tail: Vec<f64> = (0..5).map(|_| poisson.next_f64()).collect();
    assert_eq!(&full.samples[25..], &tail[..]);
}

fn share_restored(registry: &Registry, data: &str) -> SharedGenerator {
    let restored = registry.deserialize(data).unwrap();
    assert_eq!(restored.tag(), "ARCHV");
    share(restored)
}

#[test]
fn test_wrapper_chain_from_json() {
    let json = r#"{"tag": "LC64", "seed": 1, "wrappers": ["reversing", "archival"]}"#;
    let config: GeneratorConfig = serde_json::from_str(json).unwrap();
    assert_eq!(
        config,
        GeneratorConfig::new("LC64", 1)
            .with_wrapper(WrapperKind::Reversing)
            .with_wrapper(WrapperKind::Archival)
    );

    let generator = config.build(&Registry::with_defaults()).unwrap();
    assert!(generator
        .string_serialize()
        .unwrap()
        .starts_with("ARCHV`RVRSE`LC64`"));
}

#[test]
fn test_discretized_normal_reports_integers() {
    let config = SamplingConfig {
        generator: GeneratorConfig::new("SMIX", 5),
        distribution: DistributionConfig::Discretized {
            inner: Box::new(DistributionConfig::Normal {
                mu: 50.0,
                sigma: 3.0,
            }),
        },
        count: 100,
    };
    let report = config.run().unwrap();
    assert!(report.samples.iter().all(|x| x.fract() == 0.0));
    assert_eq!(report.mean, None);
    assert_eq!(report.variance, None);
}

#[test]
fn test_invalid_inputs_rejected() {
    let bad_param = SamplingConfig {
        generator: GeneratorConfig::new("SMIX", 1),
        distribution: DistributionConfig::Geometric { alpha: 0.0 },
        count: 1,
    };
    assert!(matches!(
        bad_param.run(),
        Err(StochasticError::InvalidParameter { name: "alpha", .. })
    ));

    let bad_tag = SamplingConfig {
        generator: GeneratorConfig::new("NOPE", 1),
        distribution: DistributionConfig::Exponential { lambda: 1.0 },
        count: 1,
    };
    assert!(matches!(bad_tag.run(), Err(StochasticError::UnknownTag(_))));

    let unknown_type = r#"{"generator": {"tag": "SMIX", "seed": 1}, "distribution": {"type": "cauchy"}}"#;
    assert!(matches!(
        SamplingConfig::from_json(unknown_type),
        Err(StochasticError::InvalidArgument(_))
    ));
}

#[test]
fn test_report_serializes() {
    let report = poisson_config().run().unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["samples"].as_array().unwrap().len(), 25);
    assert_eq!(json["config_hash"].as_str().unwrap().len(), 64);
    assert!(json["final_state"].as_str().unwrap().starts_with("ARCHV`XS64`"));
}
