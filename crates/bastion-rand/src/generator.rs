// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! BLAKE3 fast-key-erasure DRBG.
//!
//! State is one [`SecureBuffer`] laid out as `key (32) || block (64)`.
//!
//! - **Instantiate**: `key = BLAKE3-derive-key(CONTEXT, len || seed)`
//! - **Refill**: 96 bytes of keyed XOF output over the refill counter replace
//!   both the key and the block, so the key that produced a block is gone
//!   before the block is handed out.
//! - **Reseed**: `key = BLAKE3-keyed(key, label || len || material)`; the
//!   pending block is discarded.
//! - **Output**: 32-bit words, each wiped from the block as it is consumed.

use bastion_buffer::SecureBuffer;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

const KEY_LEN: usize = 32;
const BLOCK_LEN: usize = 64;
const STATE_LEN: usize = KEY_LEN + BLOCK_LEN;
const WORD_LEN: usize = size_of::<u32>();

const INSTANTIATE_CONTEXT: &str = "bastion-rand 2026-01-01 generator instantiate v1";

/// Deterministic generator state behind the random engine.
///
/// Equal seed material yields equal output streams. Implements
/// [`RngCore`] and [`CryptoRng`], so it can be handed to any `rand`
/// consumer while the engine lock is held.
pub struct Generator {
    state: SecureBuffer<u8>,
    cursor: usize,
    counter: u64,
}

impl Generator {
    /// Instantiates a generator from seed material.
    pub fn from_seed(material: &[u8]) -> Self {
        let mut state = SecureBuffer::with_capacity(STATE_LEN);
        state.resize(STATE_LEN);

        let mut hasher = blake3::Hasher::new_derive_key(INSTANTIATE_CONTEXT);
        hasher.update(&(material.len() as u64).to_le_bytes());
        hasher.update(material);

        let mut reader = hasher.finalize_xof();
        reader.fill(&mut state[..KEY_LEN]);

        hasher.zeroize();
        reader.zeroize();

        Self {
            state,
            cursor: BLOCK_LEN,
            counter: 0,
        }
    }

    /// Absorbs `material` under a domain-separation `label`.
    ///
    /// Any buffered output is discarded.
    pub fn reseed(&mut self, label: &[u8], material: &[u8]) {
        let mut hasher = self.keyed_hasher();
        hasher.update(label);
        hasher.update(&(material.len() as u64).to_le_bytes());
        hasher.update(material);

        let mut reader = hasher.finalize_xof();
        reader.fill(&mut self.state[..KEY_LEN]);
        self.state[KEY_LEN..].zeroize();
        self.cursor = BLOCK_LEN;

        hasher.zeroize();
        reader.zeroize();
    }

    fn keyed_hasher(&self) -> blake3::Hasher {
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&self.state[..KEY_LEN]);

        let hasher = blake3::Hasher::new_keyed(&key);
        key.zeroize();

        hasher
    }

    fn refill(&mut self) {
        let mut hasher = self.keyed_hasher();
        hasher.update(&self.counter.to_le_bytes());

        let mut reader = hasher.finalize_xof();
        reader.fill(&mut self.state[..]);

        self.counter = self.counter.wrapping_add(1);
        self.cursor = 0;

        hasher.zeroize();
        reader.zeroize();
    }

    /// Returns the next 32-bit output word.
    pub fn next_word(&mut self) -> u32 {
        if self.cursor + WORD_LEN > BLOCK_LEN {
            self.refill();
        }

        let start = KEY_LEN + self.cursor;
        let slot = &mut self.state[start..start + WORD_LEN];

        let mut bytes = [0u8; WORD_LEN];
        bytes.copy_from_slice(slot);
        slot.zeroize();
        self.cursor += WORD_LEN;

        let word = u32::from_le_bytes(bytes);
        bytes.zeroize();

        word
    }

    /// Fills `dest` in whole words; a partial tail consumes one extra word.
    pub fn fill(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(WORD_LEN);

        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_word().to_le_bytes());
        }

        let tail = chunks.into_remainder();

        if !tail.is_empty() {
            let mut word = self.next_word().to_le_bytes();
            tail.copy_from_slice(&word[..tail.len()]);
            word.zeroize();
        }
    }
}

impl RngCore for Generator {
    fn next_u32(&mut self) -> u32 {
        self.next_word()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_word());
        let hi = u64::from(self.next_word());

        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }
}

impl CryptoRng for Generator {}

impl core::fmt::Debug for Generator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Generator")
            .field("state", &"REDACTED")
            .finish()
    }
}
