// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use bastion_buffer::SecureBuffer;

use crate::error::RandError;
use crate::global;

/// Draws a `len`-byte key from the process-wide engine.
///
/// The key is written straight into zeroizing storage.
///
/// # Errors
///
/// [`RandError::EmptyRequest`] if `len` is zero.
///
/// # Example
///
/// ```rust
/// let key = bastion_rand::generate_key(32).expect("Failed to generate key");
/// assert_eq!(key.len(), 32);
/// ```
pub fn generate_key(len: usize) -> Result<SecureBuffer<u8>, RandError> {
    let mut key = SecureBuffer::with_capacity(len);
    key.resize(len);

    global::rand_bytes(&mut key)?;

    Ok(key)
}
