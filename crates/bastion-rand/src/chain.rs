// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Ordered entropy fallback.
//!
//! Sources are tried in order until one delivers. If every source fails the
//! compiled-in [`FALLBACK_SEED`] is used, so a draw never fails. Whatever the
//! origin, the first 8 bytes are XORed with a monotonic clock sample so that
//! repeated runs over identical source output still diverge.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use zeroize::Zeroize;

use crate::clock;
use crate::hardware::{HardwareRandSource, HardwareSeedSource};
use crate::kernel::KernelEntropySource;
use crate::traits::EntropySource;

/// Last-resort seed material: the SHA-512 initial hash values.
///
/// Public and constant. It only keeps the engine operational when the
/// environment offers no entropy at all; it provides no secrecy.
pub const FALLBACK_SEED: [u8; 64] = [
    0x6a, 0x09, 0xe6, 0x67, 0xf3, 0xbc, 0xc9, 0x08, //
    0xbb, 0x67, 0xae, 0x85, 0x84, 0xca, 0xa7, 0x3b, //
    0x3c, 0x6e, 0xf3, 0x72, 0xfe, 0x94, 0xf8, 0x2b, //
    0xa5, 0x4f, 0xf5, 0x3a, 0x5f, 0x1d, 0x36, 0xf1, //
    0x51, 0x0e, 0x52, 0x7f, 0xad, 0xe6, 0x82, 0xd1, //
    0x9b, 0x05, 0x68, 0x8c, 0x2b, 0x3e, 0x6c, 0x1f, //
    0x1f, 0x83, 0xd9, 0xab, 0xfb, 0x41, 0xbd, 0x6b, //
    0x5b, 0xe0, 0xcd, 0x19, 0x13, 0x7e, 0x21, 0x79, //
];

/// A chain member. `Send` so the chain can live inside the global engine.
pub type BoxedEntropySource = Box<dyn EntropySource + Send>;

/// Where the bytes of a draw came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyOrigin {
    /// The named source delivered.
    Source(&'static str),
    /// Every source failed; [`FALLBACK_SEED`] was used.
    Fallback,
}

impl EntropyOrigin {
    /// `true` if the draw came from the compiled-in constant.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl fmt::Display for EntropyOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(name) => f.write_str(name),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Ordered list of entropy sources.
pub struct EntropyChain {
    sources: Vec<BoxedEntropySource>,
}

impl EntropyChain {
    /// RDSEED, then RDRAND, then the kernel CSPRNG.
    pub fn system() -> Self {
        Self::with_sources(vec![
            Box::new(HardwareSeedSource),
            Box::new(HardwareRandSource),
            Box::new(KernelEntropySource),
        ])
    }

    /// A chain over caller-chosen sources, tried in the given order.
    ///
    /// An empty chain always yields [`FALLBACK_SEED`].
    pub fn with_sources(sources: Vec<BoxedEntropySource>) -> Self {
        Self { sources }
    }

    /// Names of the sources, in order.
    pub fn source_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sources.iter().map(|source| source.name())
    }

    /// Fills `dest` from the first source that delivers and mixes in the clock.
    pub fn draw(&self, dest: &mut [u8]) -> EntropyOrigin {
        let origin = self.draw_raw(dest);
        mix_clock(dest, clock::monotonic_sample());

        origin
    }

    pub(crate) fn draw_raw(&self, dest: &mut [u8]) -> EntropyOrigin {
        for source in &self.sources {
            match source.fill_bytes(dest) {
                Ok(()) => return EntropyOrigin::Source(source.name()),
                Err(error) => {
                    dest.zeroize();
                    tracing::debug!(source = source.name(), %error, "entropy source failed, falling through");
                }
            }
        }

        tracing::warn!(
            sources = self.sources.len(),
            "every entropy source failed, using compiled-in fallback seed"
        );

        for (byte, fallback) in dest.iter_mut().zip(FALLBACK_SEED.iter().cycle()) {
            *byte = *fallback;
        }

        EntropyOrigin::Fallback
    }
}

impl Default for EntropyChain {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for EntropyChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.source_names()).finish()
    }
}

/// XORs the little-endian clock sample into the first bytes of `dest`.
pub(crate) fn mix_clock(dest: &mut [u8], sample: u64) {
    let mut sample = sample.to_le_bytes();

    for (byte, mask) in dest.iter_mut().zip(sample.iter()) {
        *byte ^= mask;
    }

    sample.zeroize();
}
