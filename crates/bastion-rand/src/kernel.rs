// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use getrandom::Error as GetRandomError;

use crate::error::EntropyError;
use crate::traits::EntropySource;

/// Kernel CSPRNG via `getrandom`.
///
/// - Linux/Android: `getrandom()` syscall, falling back to `/dev/urandom`
/// - macOS/iOS: `getentropy()`
/// - Windows: `ProcessPrng`
///
/// Interrupted reads are retried inside `getrandom`; any other failure is
/// reported as [`EntropyError::Kernel`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KernelEntropySource;

impl KernelEntropySource {
    pub(crate) fn fill_bytes_with(
        fill_fn: &dyn Fn(&mut [u8]) -> Result<(), GetRandomError>,
        dest: &mut [u8],
    ) -> Result<(), EntropyError> {
        fill_fn(dest).map_err(EntropyError::Kernel)
    }
}

impl EntropySource for KernelEntropySource {
    fn name(&self) -> &'static str {
        "kernel"
    }

    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        Self::fill_bytes_with(&getrandom::fill, dest)
    }
}
