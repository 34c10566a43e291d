// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use rand_core::{CryptoRng, RngCore};

use crate::global;

/// Handle to the process-wide engine for generic RNG consumers.
///
/// Every call takes the engine lock for its own duration only. Hold a
/// [`lock()`](crate::lock) guard and use its `ctx()` instead when several
/// draws must not interleave with other callers.
///
/// ```rust
/// use bastion_rand::EngineRng;
/// use rand_core::RngCore;
///
/// let mut rng = EngineRng;
/// let mut nonce = [0u8; 12];
/// rng.fill_bytes(&mut nonce);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineRng;

impl EngineRng {
    /// Smallest value returned by [`generate`](Self::generate).
    pub const MIN: u32 = 0;
    /// Largest value returned by [`generate`](Self::generate).
    pub const MAX: u32 = u32::MAX;

    /// One uniformly distributed 32-bit value.
    pub fn generate(&mut self) -> u32 {
        global::rand_u32()
    }
}

impl RngCore for EngineRng {
    fn next_u32(&mut self) -> u32 {
        global::rand_u32()
    }

    fn next_u64(&mut self) -> u64 {
        global::rand_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if dest.is_empty() {
            return;
        }

        global::lock().ctx().fill(dest);
    }
}

impl CryptoRng for EngineRng {}
