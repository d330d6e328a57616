//! rand Interop Tests
//!
//! Critical invariants tested:
//! - Native generators drive `rand` APIs without altering the word stream
//! - `rand` generators drive native distributions and wrappers
//! - Distributions cross the boundary in both directions

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use stochastic_core::distributions::{
    share, Distribution, Exponential, ForeignDistribution, Normal, RandDistribution,
};
use stochastic_core::error::StochasticError;
use stochastic_core::generator::{Generator, Lcg64, SplitMix64};
use stochastic_core::wrappers::{ArchivalWrapper, ForeignGenerator, RandAdapter, ReversingWrapper};

#[test]
fn test_adapter_drives_rand_api() {
    let mut rng = RandAdapter::new(SplitMix64::new(2024));
    for _ in 0..1_000 {
        let roll: u32 = rng.gen_range(1..=6);
        assert!((1..=6).contains(&roll));
        let x: f64 = rng.gen();
        assert!((0.0..1.0).contains(&x));
    }

    let mut deck: Vec<u8> = (0..52).collect();
    deck.shuffle(&mut rng);
    deck.sort_unstable();
    assert_eq!(deck, (0..52).collect::<Vec<_>>());
}

#[test]
fn test_adapter_word_stream_unchanged() {
    let mut native = Lcg64::new(77);
    let mut adapter = RandAdapter::new(Lcg64::new(77));
    let mut buffer = [0u8; 16];
    adapter.fill_bytes(&mut buffer);

    let mut expected = [0u8; 16];
    native.fill_bytes(&mut expected);
    assert_eq!(buffer, expected);
    assert_eq!(adapter.next_u64(), native.next_u64());
    assert_eq!(
        adapter.into_inner().select_state(0).unwrap(),
        native.select_state(0).unwrap()
    );
}

#[test]
fn test_adapter_over_wrapper_chain() {
    // rand draws through a reversing wrapper walk the delegate backwards.
    let mut forward = Lcg64::new(5);
    let values: Vec<u64> = (0..4).map(|_| forward.next_u64()).collect();

    let reversed = ReversingWrapper::new(Box::new(forward)).unwrap();
    let mut rng = RandAdapter::new(reversed);
    let backward: Vec<u64> = (0..4).map(|_| rng.next_u64()).collect();
    assert_eq!(backward, values.into_iter().rev().collect::<Vec<_>>());
}

#[test]
fn test_inclusive_max_range() {
    let mut rng = RandAdapter::new(SplitMix64::new(1));
    let max = (0..10_000).map(|_| rng.next_inclusive_max()).max().unwrap();
    assert!(max >= 0);
    assert!(max <= i32::MAX);
    assert!(!rng.reset());
}

#[test]
fn test_foreign_generator_is_recorded() {
    let mut archived = ArchivalWrapper::new(Box::new(ForeignGenerator::<StdRng>::from_seed(8)));
    let mut reference = StdRng::seed_from_u64(8);
    for _ in 0..10 {
        assert_eq!(archived.next_u64(), reference.next_u64());
    }
    assert_eq!(archived.records().u64s.len(), 10);

    // The foreign state is opaque, so neither it nor anything around it
    // can be serialized.
    assert!(matches!(
        archived.string_serialize(),
        Err(StochasticError::UnsupportedOperation(_))
    ));

    let mut replay = archived.replay();
    let mut again = StdRng::seed_from_u64(8);
    assert_eq!(replay.next_u64(), again.next_u64());
}

#[test]
fn test_foreign_generator_drives_native_distribution() {
    let mut a = Normal::new(share(ForeignGenerator::<StdRng>::from_seed(3)), 10.0, 2.0).unwrap();
    let mut b = Normal::new(share(ForeignGenerator::<StdRng>::from_seed(3)), 10.0, 2.0).unwrap();
    for _ in 0..100 {
        assert_eq!(a.next_f64(), b.next_f64());
    }
}

#[test]
fn test_foreign_distribution_over_native_generator() {
    let generator = share(SplitMix64::new(12));
    let mut uniform = ForeignDistribution::new(generator.clone(), Uniform::new(2.0, 5.0));
    assert_eq!(uniform.parameter_count(), 0);
    assert!(uniform.mean().is_err());
    assert!(uniform.steps().is_none());

    for _ in 0..1_000 {
        let x = uniform.next_f64();
        assert!((2.0..5.0).contains(&x));
    }

    let mut reference = RandAdapter::new(SplitMix64::new(12));
    let first: f64 = reference.sample(Uniform::new(2.0, 5.0));
    let mut replayed = ForeignDistribution::new(share(SplitMix64::new(12)), Uniform::new(2.0, 5.0));
    assert_eq!(replayed.next_f64(), first);
}

#[test]
fn test_native_distribution_inside_rand() {
    let exponential = Exponential::new(share(SplitMix64::new(0)), 4.0).unwrap();
    let bridge = RandDistribution::new(exponential);

    let mut rng1 = StdRng::seed_from_u64(21);
    let mut rng2 = StdRng::seed_from_u64(21);
    let a: Vec<f64> = (&mut rng1).sample_iter(&bridge).take(50).collect();
    let b: Vec<f64> = (&mut rng2).sample_iter(&bridge).take(50).collect();
    assert_eq!(a, b);
    assert!(a.iter().all(|&x| x >= 0.0));

    // The bound generator is never touched.
    let exponential = bridge.into_inner();
    assert_eq!(
        exponential.generator().borrow().select_state(0).unwrap(),
        0
    );
}
