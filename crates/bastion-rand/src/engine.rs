// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bastion_buffer::SecureBuffer;

use crate::chain::{EntropyChain, EntropyOrigin};
use crate::error::RandError;
use crate::generator::Generator;

/// Largest seed drawn from the entropy chain, in bits.
pub const MAX_SEED_BITS: usize = 512;

const SEED_LEN: usize = MAX_SEED_BITS / 8;

const AUGMENT_LABEL: &[u8] = b"bastion-rand augment";
const CALLER_SEED_LABEL: &[u8] = b"bastion-rand caller seed";
const RANDOM_SEED_LABEL: &[u8] = b"bastion-rand chain seed";

/// A generator bound to the entropy chain that seeds it.
///
/// The process-wide instance is reached through the free functions of this
/// crate; a standalone `RandomEngine` behaves identically but is owned by
/// the caller.
///
/// On construction the generator is instantiated from one 512-bit chain draw
/// and then absorbs a second, independent draw (the augment). Two processes
/// that later apply the same explicit seed therefore still diverge.
pub struct RandomEngine {
    generator: Generator,
    chain: EntropyChain,
}

impl RandomEngine {
    /// Engine over [`EntropyChain::system`].
    pub fn new() -> Self {
        Self::with_chain(EntropyChain::system())
    }

    /// Engine over a caller-supplied chain.
    pub fn with_chain(chain: EntropyChain) -> Self {
        let mut seed = SecureBuffer::with_capacity(SEED_LEN);
        seed.resize(SEED_LEN);

        let origin = chain.draw(&mut seed);
        let mut generator = Generator::from_seed(&seed);

        let augment = chain.draw(&mut seed);
        generator.reseed(AUGMENT_LABEL, &seed);

        tracing::debug!(%origin, %augment, "random engine instantiated");

        Self { generator, chain }
    }

    /// Mixes caller-supplied material into the generator.
    ///
    /// # Errors
    ///
    /// [`RandError::EmptySeed`] if `material` is empty.
    pub fn seed(&mut self, material: &[u8]) -> Result<(), RandError> {
        if material.is_empty() {
            return Err(RandError::EmptySeed);
        }

        self.generator.reseed(CALLER_SEED_LABEL, material);

        Ok(())
    }

    /// Draws a fresh 512-bit seed from the chain and applies it.
    ///
    /// Never fails; the returned origin tells whether the compiled-in fallback
    /// was needed.
    pub fn random_seed(&mut self) -> EntropyOrigin {
        let mut seed = SecureBuffer::with_capacity(SEED_LEN);
        seed.resize(SEED_LEN);

        let origin = self.chain.draw(&mut seed);
        self.generator.reseed(RANDOM_SEED_LABEL, &seed);

        origin
    }

    /// Fills `dest` with random bytes.
    ///
    /// # Errors
    ///
    /// [`RandError::EmptyRequest`] if `dest` is empty.
    pub fn rand_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        if dest.is_empty() {
            return Err(RandError::EmptyRequest);
        }

        self.generator.fill(dest);

        Ok(())
    }

    /// Next 32-bit value.
    pub fn rand_u32(&mut self) -> u32 {
        self.generator.next_word()
    }

    /// Next 64-bit value.
    pub fn rand_u64(&mut self) -> u64 {
        rand_core::RngCore::next_u64(&mut self.generator)
    }

    /// Direct access to the generator.
    pub fn ctx(&mut self) -> &mut Generator {
        &mut self.generator
    }

    /// The chain used by [`random_seed`](Self::random_seed).
    pub fn chain(&self) -> &EntropyChain {
        &self.chain
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for RandomEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RandomEngine")
            .field("generator", &self.generator)
            .field("chain", &self.chain)
            .finish()
    }
}
