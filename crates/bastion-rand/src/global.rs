// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! The process-wide engine.
//!
//! A single [`Mutex`] guards both the lazy creation and every operation, so
//! there is no separate initialization race. [`shutdown`] drops the engine,
//! which zeroizes the generator state; the next call creates a fresh one.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::chain::{EntropyChain, EntropyOrigin};
use crate::engine::RandomEngine;
use crate::error::RandError;
use crate::generator::Generator;

pub(crate) static ENGINE: Mutex<Option<RandomEngine>> = Mutex::new(None);

fn acquire() -> MutexGuard<'static, Option<RandomEngine>> {
    ENGINE.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("random engine mutex poisoned, recovering");
        ENGINE.clear_poison();
        PoisonError::into_inner(poisoned)
    })
}

/// Exclusive access to the process-wide engine.
///
/// Other callers block until the guard is dropped or [`unlock`](Self::unlock)ed.
/// Use it when several draws must come from the generator without
/// interleaving, e.g. the limbs of a multi-word integer.
///
/// ```rust
/// let mut guard = bastion_rand::lock();
/// let hi = guard.rand_u64();
/// let lo = guard.rand_u64();
/// guard.unlock();
/// # let _ = (hi, lo);
/// ```
pub struct EngineGuard {
    guard: MutexGuard<'static, Option<RandomEngine>>,
}

impl EngineGuard {
    fn engine(&mut self) -> &mut RandomEngine {
        self.guard.get_or_insert_with(RandomEngine::new)
    }

    /// See [`rand_bytes`](crate::rand_bytes).
    pub fn rand_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.engine().rand_bytes(dest)
    }

    /// See [`rand_u32`](crate::rand_u32).
    pub fn rand_u32(&mut self) -> u32 {
        self.engine().rand_u32()
    }

    /// See [`rand_u64`](crate::rand_u64).
    pub fn rand_u64(&mut self) -> u64 {
        self.engine().rand_u64()
    }

    /// See [`seed`](crate::seed).
    pub fn seed(&mut self, material: &[u8]) -> Result<(), RandError> {
        self.engine().seed(material)
    }

    /// See [`random_seed`](crate::random_seed).
    pub fn random_seed(&mut self) -> EntropyOrigin {
        self.engine().random_seed()
    }

    /// The generator itself, usable as a `rand_core` RNG while the guard lives.
    pub fn ctx(&mut self) -> &mut Generator {
        self.engine().ctx()
    }

    /// Releases the lock. Equivalent to dropping the guard.
    pub fn unlock(self) {}
}

impl core::fmt::Debug for EngineGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineGuard")
            .field("initialized", &self.guard.is_some())
            .finish()
    }
}

/// Acquires the engine lock, creating the engine on first use.
pub fn lock() -> EngineGuard {
    EngineGuard { guard: acquire() }
}

/// Fills `dest` with random bytes.
///
/// # Errors
///
/// [`RandError::EmptyRequest`] if `dest` is empty.
pub fn rand_bytes(dest: &mut [u8]) -> Result<(), RandError> {
    lock().rand_bytes(dest)
}

/// Next 32-bit value from the process-wide engine.
pub fn rand_u32() -> u32 {
    lock().rand_u32()
}

/// Next 64-bit value from the process-wide engine.
pub fn rand_u64() -> u64 {
    lock().rand_u64()
}

/// Mixes caller-supplied entropy into the process-wide engine.
///
/// # Errors
///
/// [`RandError::EmptySeed`] if `material` is empty.
pub fn seed(material: &[u8]) -> Result<(), RandError> {
    lock().seed(material)
}

/// Reseeds the process-wide engine from its entropy chain.
pub fn random_seed() -> EntropyOrigin {
    lock().random_seed()
}

/// Replaces the process-wide engine with one built over `chain`.
///
/// The previous engine, if any, is dropped and zeroized.
pub fn configure(chain: EntropyChain) {
    let mut guard = acquire();
    tracing::debug!(?chain, "configuring random engine");
    *guard = Some(RandomEngine::with_chain(chain));
}

/// Destroys the process-wide engine, zeroizing its state.
///
/// Idempotent. A later call to any entry point creates a new engine.
pub fn shutdown() {
    let engine = acquire().take();

    if engine.is_some() {
        tracing::debug!("random engine shut down");
    }

    drop(engine);
}

/// Reports whether the process-wide engine currently exists.
pub fn is_initialized() -> bool {
    acquire().is_some()
}
