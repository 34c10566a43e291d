// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! # bastion_rand
//!
//! Process-wide cryptographically secure random number generation.
//!
//! A single [`RandomEngine`] lives behind a process mutex. It is created on
//! first use, seeded from an [`EntropyChain`], and destroyed (zeroized) by
//! [`shutdown`].
//!
//! ## Entropy chain
//!
//! Sources are tried in order:
//!
//! 1. [`HardwareSeedSource`] (RDSEED)
//! 2. [`HardwareRandSource`] (RDRAND)
//! 3. [`KernelEntropySource`] (`getrandom`)
//! 4. [`FALLBACK_SEED`], a public constant used only if all of the above fail
//!
//! Every draw is XORed with a monotonic clock sample. Source failures are
//! logged at `debug`, use of the fallback at `warn`.
//!
//! ## Example
//!
//! ```rust
//! let mut key = [0u8; 32];
//! bastion_rand::rand_bytes(&mut key).expect("Failed to generate key");
//!
//! // Several draws without interleaving from other threads
//! let mut guard = bastion_rand::lock();
//! let a = guard.rand_u64();
//! let b = guard.rand_u64();
//! guard.unlock();
//! # let _ = (a, b);
//! ```
//!
//! ## Features
//!
//! - `hardware` (default): RDSEED/RDRAND sources on x86_64. Without it they
//!   report [`EntropyError::HardwareUnsupported`] and the chain moves on.
//! - `test-utils`: exposes [`test_utils`] mocks.

#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod adapter;
mod chain;
mod clock;
mod engine;
mod error;
mod generator;
mod global;
mod hardware;
mod kernel;
mod keys;
mod session;
mod support;
mod traits;

pub use adapter::EngineRng;
pub use chain::{BoxedEntropySource, EntropyChain, EntropyOrigin, FALLBACK_SEED};
pub use engine::{MAX_SEED_BITS, RandomEngine};
pub use error::{EntropyError, RandError};
pub use generator::Generator;
pub use global::{
    EngineGuard, configure, is_initialized, lock, rand_bytes, rand_u32, rand_u64, random_seed,
    seed, shutdown,
};
pub use hardware::{HardwareRandSource, HardwareSeedSource, MAX_RETRIES};
pub use kernel::KernelEntropySource;
pub use keys::generate_key;
pub use session::NonceSessionGenerator;
pub use traits::{EntropySource, NonceGenerator};

#[cfg(any(test, feature = "test-utils"))]
pub use support::test_utils;
