// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec;

use proptest::prelude::*;
use rand::Rng;
use rand_core::RngCore;

use crate::generator::Generator;

fn stream(generator: &mut Generator, len: usize) -> alloc::vec::Vec<u8> {
    let mut out = vec![0u8; len];
    generator.fill(&mut out);
    out
}

// =============================================================================
// from_seed()
// =============================================================================

#[test]
fn test_same_seed_same_stream() {
    let mut a = Generator::from_seed(b"identical seed material");
    let mut b = Generator::from_seed(b"identical seed material");

    assert_eq!(stream(&mut a, 1000), stream(&mut b, 1000));
}

#[test]
fn test_different_seed_different_stream() {
    let mut a = Generator::from_seed(b"seed one");
    let mut b = Generator::from_seed(b"seed two");

    assert_ne!(stream(&mut a, 64), stream(&mut b, 64));
}

#[test]
fn test_seed_length_is_bound() {
    let mut a = Generator::from_seed(&[0u8; 16]);
    let mut b = Generator::from_seed(&[0u8; 17]);

    assert_ne!(stream(&mut a, 32), stream(&mut b, 32));
}

// =============================================================================
// reseed()
// =============================================================================

#[test]
fn test_reseed_changes_stream() {
    let mut a = Generator::from_seed(b"base");
    let mut b = Generator::from_seed(b"base");
    b.reseed(b"label", b"extra");

    assert_ne!(stream(&mut a, 64), stream(&mut b, 64));
}

#[test]
fn test_reseed_is_deterministic() {
    let mut a = Generator::from_seed(b"base");
    let mut b = Generator::from_seed(b"base");
    a.reseed(b"label", b"extra");
    b.reseed(b"label", b"extra");

    assert_eq!(stream(&mut a, 256), stream(&mut b, 256));
}

#[test]
fn test_reseed_label_separates_domains() {
    let mut a = Generator::from_seed(b"base");
    let mut b = Generator::from_seed(b"base");
    a.reseed(b"label-a", b"extra");
    b.reseed(b"label-b", b"extra");

    assert_ne!(stream(&mut a, 64), stream(&mut b, 64));
}

#[test]
fn test_reseed_discards_buffered_block() {
    let mut a = Generator::from_seed(b"base");
    let _ = a.next_word();
    a.reseed(b"label", b"extra");

    let mut b = Generator::from_seed(b"base");
    let _ = b.next_word();

    // Without the reseed, `b` keeps serving its buffered block.
    assert_ne!(a.next_word(), b.next_word());
}

// =============================================================================
// fill(), next_word()
// =============================================================================

#[test]
fn test_fill_matches_word_stream() {
    let mut a = Generator::from_seed(b"words");
    let mut b = Generator::from_seed(b"words");

    let bytes = stream(&mut a, 200);

    for chunk in bytes.chunks(4) {
        assert_eq!(chunk, b.next_word().to_le_bytes());
    }
}

#[test]
fn test_fill_partial_tail_uses_one_extra_word() {
    let mut a = Generator::from_seed(b"tail");
    let mut b = Generator::from_seed(b"tail");

    let seven = stream(&mut a, 7);
    let eight = stream(&mut b, 8);
    assert_eq!(&seven[..], &eight[..7]);

    // The partially used word is gone entirely.
    let next = a.next_word();
    let mut c = Generator::from_seed(b"tail");
    let twelve = stream(&mut c, 12);
    assert_eq!(next.to_le_bytes(), twelve[8..12]);
}

#[test]
fn test_next_u64_is_two_words() {
    let mut a = Generator::from_seed(b"u64");
    let mut b = Generator::from_seed(b"u64");

    let lo = u64::from(b.next_word());
    let hi = u64::from(b.next_word());

    assert_eq!(a.next_u64(), (hi << 32) | lo);
}

#[test]
fn test_consecutive_words_differ() {
    let mut generator = Generator::from_seed(b"consecutive");

    for _ in 0..1000 {
        assert_ne!(generator.next_word(), generator.next_word());
    }
}

#[test]
fn test_byte_histogram() {
    let mut generator = Generator::from_seed(b"histogram");
    let bytes = stream(&mut generator, 65536);

    let mut counts = [0usize; 256];
    for &b in &bytes {
        counts[b as usize] += 1;
    }

    // Expected 256 per value.
    assert!(counts.iter().all(|&c| c > 0));
    assert!(counts.iter().all(|&c| c < 512));
}

// =============================================================================
// RngCore
// =============================================================================

#[test]
fn test_usable_through_rand() {
    let mut generator = Generator::from_seed(b"rand consumer");

    for _ in 0..1000 {
        let roll: u8 = generator.random_range(1..=6);
        assert!((1..=6).contains(&roll));
    }
}

#[test]
fn test_debug_is_redacted() {
    let generator = Generator::from_seed(b"secret");

    assert!(alloc::format!("{:?}", generator).contains("REDACTED"));
}

proptest! {
    #[test]
    fn prop_fill_is_prefix_of_longer_fill(seed in proptest::collection::vec(any::<u8>(), 1..64), len in 1usize..300) {
        let mut a = Generator::from_seed(&seed);
        let mut b = Generator::from_seed(&seed);

        let short = stream(&mut a, len);
        let long = stream(&mut b, len + 4);

        prop_assert_eq!(&short[..], &long[..len]);
    }
}
