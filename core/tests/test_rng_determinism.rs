//! Tests for deterministic generators
//!
//! CRITICAL: Determinism is sacred. Same tag + same seed MUST produce the
//! same sequence, through every derived draw kind.

use stochastic_core::generator::{
    Generator, GeneratorExt, Lcg64, SplitMix64, XorShift64Star, Xoshiro256StarStar,
};
use stochastic_core::registry;
use std::collections::HashSet;

const LEAF_TAGS: [&str; 4] = ["SMIX", "XS64", "LC64", "X256"];

#[test]
fn test_rng_new_with_seed() {
    let rng = XorShift64Star::new(12345);
    assert_eq!(rng.state(), 12345);
    assert_eq!(rng.select_state(0).unwrap(), 12345);
}

#[test]
fn test_rng_next_deterministic() {
    for tag in LEAF_TAGS {
        let mut rng1 = registry::create(tag, 12345).unwrap();
        let mut rng2 = registry::create(tag, 12345).unwrap();

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64(), "{} not deterministic!", tag);
        }
    }
}

#[test]
fn test_rng_different_seeds_different_sequences() {
    for tag in LEAF_TAGS {
        let mut rng1 = registry::create(tag, 12345).unwrap();
        let mut rng2 = registry::create(tag, 54321).unwrap();

        assert_ne!(
            rng1.next_u64(),
            rng2.next_u64(),
            "{}: different seeds should produce different values",
            tag
        );
    }
}

#[test]
fn test_rng_range() {
    let mut rng = SplitMix64::new(12345);

    for _ in 0..100 {
        let val = rng.next_in_range(0, 99);
        assert!((0..=99).contains(&val), "Value {} out of range [0, 99]", val);
    }
}

#[test]
fn test_rng_range_single_value() {
    let mut rng = Lcg64::new(12345);
    assert_eq!(rng.next_in_range(5, 5), 5);
    assert_eq!(rng.next_below(1), 0);
}

#[test]
#[should_panic(expected = "min must not exceed max")]
fn test_rng_range_invalid_bounds() {
    let mut rng = SplitMix64::new(12345);
    rng.next_in_range(100, 50);
}

#[test]
fn test_rng_range_deterministic() {
    let mut rng1 = Xoshiro256StarStar::new(99999);
    let mut rng2 = Xoshiro256StarStar::new(99999);

    for _ in 0..50 {
        assert_eq!(rng1.next_in_range(10, 1000), rng2.next_in_range(10, 1000));
    }
}

#[test]
fn test_rng_state_advances() {
    let mut rng = SplitMix64::new(12345);
    let initial_state = rng.select_state(0).unwrap();

    rng.next_u64();

    assert_ne!(
        initial_state,
        rng.select_state(0).unwrap(),
        "RNG state should advance"
    );
}

#[test]
fn test_rng_replay_from_state() {
    let mut rng1 = XorShift64Star::new(12345);
    for _ in 0..10 {
        rng1.next_u64();
    }

    let checkpoint_state = rng1.state();
    let val1_a = rng1.next_u64();
    let val1_b = rng1.next_u64();

    let mut rng2 = XorShift64Star::new(checkpoint_state);
    assert_eq!(val1_a, rng2.next_u64());
    assert_eq!(val1_b, rng2.next_u64());
}

#[test]
fn test_rng_replay_through_state_words() {
    let mut rng1 = Xoshiro256StarStar::new(7);
    rng1.next_u64();

    let mut rng2 = Xoshiro256StarStar::new(0);
    for i in 0..rng1.state_count() {
        rng2.set_selected_state(i, rng1.select_state(i).unwrap()).unwrap();
    }
    for _ in 0..20 {
        assert_eq!(rng1.next_u64(), rng2.next_u64());
    }
}

#[test]
fn test_rng_long_sequence_determinism() {
    let mut rng1 = Lcg64::new(42);
    let mut rng2 = Lcg64::new(42);

    for i in 0..1000 {
        let val1 = rng1.next_f64();
        let val2 = rng2.next_f64();
        assert_eq!(
            val1, val2,
            "Determinism broken at iteration {}: {} != {}",
            i, val1, val2
        );
    }
}

#[test]
fn test_rng_produces_diverse_values() {
    for tag in LEAF_TAGS {
        let mut rng = registry::create(tag, 12345).unwrap();
        let unique_count = (0..100)
            .map(|_| rng.next_u64())
            .collect::<HashSet<_>>()
            .len();
        assert!(
            unique_count > 90,
            "{} not diverse enough: only {} unique values out of 100",
            tag,
            unique_count
        );
    }
}

#[test]
fn test_reseeding_restarts_sequence() {
    for tag in LEAF_TAGS {
        let mut rng = registry::create(tag, 77).unwrap();
        let first: Vec<u64> = (0..5).map(|_| rng.next_u64()).collect();
        rng.seed(77);
        let again: Vec<u64> = (0..5).map(|_| rng.next_u64()).collect();
        assert_eq!(first, again, "{} reseed did not restart", tag);
    }
}

#[test]
fn test_copy_is_independent() {
    let mut original = SplitMix64::new(5);
    original.next_u64();
    let mut copy = original.copy();

    let expected = original.next_u64();
    assert_eq!(copy.next_u64(), expected);
    copy.next_u64();
    assert_ne!(
        copy.select_state(0).unwrap(),
        original.select_state(0).unwrap()
    );
}

#[test]
fn test_shuffle_deterministic() {
    let mut deck1: Vec<u32> = (0..52).collect();
    let mut deck2 = deck1.clone();
    SplitMix64::new(3).shuffle(&mut deck1);
    SplitMix64::new(3).shuffle(&mut deck2);
    assert_eq!(deck1, deck2);

    deck1.sort_unstable();
    assert_eq!(deck1, (0..52).collect::<Vec<_>>());
}

#[test]
fn test_capability_gating() {
    let mut rng = Xoshiro256StarStar::new(1);
    assert!(!rng.capabilities().skip);
    assert!(rng.skip(3).is_err());
    assert!(rng.previous_u64().is_err());

    let mut rng = XorShift64Star::new(1);
    assert!(rng.skip(1).is_err());
    assert!(rng.select_state(1).is_err());
}
