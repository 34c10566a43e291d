// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use serial_test::serial;

use crate::error::RandError;
use crate::keys::generate_key;

#[test]
#[serial(engine)]
fn test_generate_key() {
    let key = generate_key(32).expect("Failed to generate_key()");

    assert_eq!(key.len(), 32);
    assert!(key.iter().any(|&b| b != 0));
    assert!(key.raw_capacity()[32..].iter().all(|&b| b == 0));
}

#[test]
#[serial(engine)]
fn test_generate_key_odd_length() {
    let key = generate_key(13).expect("Failed to generate_key()");

    assert_eq!(key.len(), 13);
}

#[test]
#[serial(engine)]
fn test_generate_key_rejects_zero() {
    assert_eq!(
        generate_key(0).map(|key| key.len()),
        Err(RandError::EmptyRequest)
    );
}

#[test]
#[serial(engine)]
fn test_keys_are_distinct() {
    let a = generate_key(16).expect("Failed to generate_key(a)");
    let b = generate_key(16).expect("Failed to generate_key(b)");

    assert_ne!(a.as_slice(), b.as_slice());
}
