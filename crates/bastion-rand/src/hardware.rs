// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! CPU entropy instructions.
//!
//! - **RDSEED**: reads the conditioned hardware entropy source directly.
//! - **RDRAND**: reads the on-chip DRBG that RDSEED reseeds.
//!
//! Both may transiently fail when the hardware pool is drained, so every
//! 64-bit word is retried up to [`MAX_RETRIES`] times before the source gives
//! up. Only available on x86_64 with the `hardware` feature; everywhere else
//! the sources report [`EntropyError::HardwareUnsupported`].

use zeroize::Zeroize;

use crate::error::EntropyError;
use crate::traits::EntropySource;

/// Maximum attempts per 64-bit word.
pub const MAX_RETRIES: usize = 10;

const WORD_LEN: usize = size_of::<u64>();

#[cfg(all(target_arch = "x86_64", feature = "hardware"))]
cpufeatures::new!(x86_64_rdseed_cpuid, "rdseed");
#[cfg(all(target_arch = "x86_64", feature = "hardware"))]
cpufeatures::new!(x86_64_rdrand_cpuid, "rdrand");

#[cfg(all(target_arch = "x86_64", feature = "hardware"))]
#[inline(always)]
fn try_rdseed() -> Option<u64> {
    let value: u64;
    let success: u8;

    // SAFETY: only executed after cpufeatures reported RDSEED support.
    unsafe {
        core::arch::asm!(
            "rdseed {value}",
            "setc {success}",
            value = out(reg) value,
            success = out(reg_byte) success,
            options(nomem, nostack)
        );
    }

    (success != 0).then_some(value)
}

#[cfg(all(target_arch = "x86_64", feature = "hardware"))]
#[inline(always)]
fn try_rdrand() -> Option<u64> {
    let value: u64;
    let success: u8;

    // SAFETY: only executed after cpufeatures reported RDRAND support.
    unsafe {
        core::arch::asm!(
            "rdrand {value}",
            "setc {success}",
            value = out(reg) value,
            success = out(reg_byte) success,
            options(nomem, nostack)
        );
    }

    (success != 0).then_some(value)
}

/// Fills `dest` word by word from `step`, retrying each word.
#[cfg_attr(
    not(all(target_arch = "x86_64", feature = "hardware")),
    allow(dead_code)
)]
pub(crate) fn fill_words_with(
    step: &dyn Fn() -> Option<u64>,
    dest: &mut [u8],
) -> Result<(), EntropyError> {
    for chunk in dest.chunks_mut(WORD_LEN) {
        let mut word = (0..MAX_RETRIES)
            .find_map(|_| step())
            .ok_or(EntropyError::HardwareExhausted {
                attempts: MAX_RETRIES,
            })?;

        let mut bytes = word.to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);

        word.zeroize();
        bytes.zeroize();
    }

    Ok(())
}

/// Entropy straight from the RDSEED instruction.
#[derive(Debug, Default, Clone, Copy)]
pub struct HardwareSeedSource;

impl HardwareSeedSource {
    /// Reports whether RDSEED can be used on this machine and build.
    pub fn is_available(&self) -> bool {
        #[cfg(all(target_arch = "x86_64", feature = "hardware"))]
        {
            x86_64_rdseed_cpuid::get()
        }

        #[cfg(not(all(target_arch = "x86_64", feature = "hardware")))]
        {
            false
        }
    }
}

impl EntropySource for HardwareSeedSource {
    fn name(&self) -> &'static str {
        "rdseed"
    }

    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if !self.is_available() {
            return Err(EntropyError::HardwareUnsupported);
        }

        #[cfg(all(target_arch = "x86_64", feature = "hardware"))]
        {
            fill_words_with(&try_rdseed, dest)
        }

        #[cfg(not(all(target_arch = "x86_64", feature = "hardware")))]
        {
            let _ = dest;
            Err(EntropyError::HardwareUnsupported)
        }
    }
}

/// Output of the RDRAND on-chip DRBG.
#[derive(Debug, Default, Clone, Copy)]
pub struct HardwareRandSource;

impl HardwareRandSource {
    /// Reports whether RDRAND can be used on this machine and build.
    pub fn is_available(&self) -> bool {
        #[cfg(all(target_arch = "x86_64", feature = "hardware"))]
        {
            x86_64_rdrand_cpuid::get()
        }

        #[cfg(not(all(target_arch = "x86_64", feature = "hardware")))]
        {
            false
        }
    }
}

impl EntropySource for HardwareRandSource {
    fn name(&self) -> &'static str {
        "rdrand"
    }

    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        if !self.is_available() {
            return Err(EntropyError::HardwareUnsupported);
        }

        #[cfg(all(target_arch = "x86_64", feature = "hardware"))]
        {
            fill_words_with(&try_rdrand, dest)
        }

        #[cfg(not(all(target_arch = "x86_64", feature = "hardware")))]
        {
            let _ = dest;
            Err(EntropyError::HardwareUnsupported)
        }
    }
}
