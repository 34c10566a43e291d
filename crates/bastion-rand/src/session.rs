// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rand_core::{CryptoRng, RngCore};

use crate::adapter::EngineRng;
use crate::traits::NonceGenerator;

pub(crate) type Counter = u32;

const COUNTER_LEN: usize = size_of::<Counter>();

/// Session-based nonce generator with configurable nonce size.
///
/// Generates unique nonces using a hybrid approach:
/// - **Counter prefix**: Incrementing session counter (type `Counter`) with automatic wrapping
/// - **Random suffix**: Remaining bytes filled from the RNG
///
/// # Collision resistance
///
/// A collision needs **both** the counter to wrap (after 2^32 nonces) and the
/// random suffix to repeat. For a 12-byte GCM nonce that leaves 8 random
/// bytes, ~1/2^64 per nonce pair after wrapping.
///
/// # Example
///
/// ```rust
/// use bastion_rand::{EngineRng, NonceGenerator, NonceSessionGenerator};
///
/// let mut session = NonceSessionGenerator::<EngineRng, 12>::from_engine();
/// let first = session.generate_nonce();
/// let second = session.generate_nonce();
///
/// assert_ne!(first, second);
/// ```
pub struct NonceSessionGenerator<R: RngCore + CryptoRng, const N: usize> {
    rng: R,
    counter: Counter,
    initialized: bool,
}

impl<R: RngCore + CryptoRng, const N: usize> NonceSessionGenerator<R, N> {
    /// Creates a new nonce session generator.
    ///
    /// The counter is lazily initialized from the RNG on first use.
    pub fn new(rng: R) -> Self {
        const { assert!(N > COUNTER_LEN, "nonce must be longer than the counter") };

        Self {
            rng,
            counter: 0,
            initialized: false,
        }
    }

    fn maybe_initialize(&mut self) {
        if !self.initialized {
            self.counter = self.rng.next_u32();
            self.initialized = true;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_counter_for_test(&mut self, counter: Counter) {
        self.counter = counter;
        self.initialized = true;
    }
}

impl<const N: usize> NonceSessionGenerator<EngineRng, N> {
    /// Session drawing from the process-wide engine.
    pub fn from_engine() -> Self {
        Self::new(EngineRng)
    }
}

impl<R: RngCore + CryptoRng, const N: usize> NonceGenerator<N> for NonceSessionGenerator<R, N> {
    fn generate_nonce(&mut self) -> [u8; N] {
        self.maybe_initialize();

        let mut nonce = [0u8; N];
        nonce[..COUNTER_LEN].copy_from_slice(&self.counter.to_le_bytes());
        self.rng.fill_bytes(&mut nonce[COUNTER_LEN..]);

        self.counter = self.counter.wrapping_add(1);

        nonce
    }
}
