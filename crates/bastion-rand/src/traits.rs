// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::EntropyError;

/// A raw entropy provider consulted by [`EntropyChain`](crate::EntropyChain).
///
/// Implementations must leave `dest` fully written on `Ok`. On `Err` the
/// contents of `dest` are unspecified; the chain wipes it before trying the
/// next source.
pub trait EntropySource {
    /// Short identifier used in log records.
    fn name(&self) -> &'static str;

    /// Fills `dest` with entropy.
    ///
    /// # Errors
    ///
    /// Returns an [`EntropyError`] describing why this source could not
    /// deliver.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError>;
}

/// Generator of unique per-message nonces of `N` bytes.
pub trait NonceGenerator<const N: usize> {
    /// Produces the next nonce.
    fn generate_nonce(&mut self) -> [u8; N];
}
