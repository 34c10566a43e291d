// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;

/// Authenticated block-cipher mode of an [`AeadCipher`](crate::AeadCipher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AeadMode {
    /// Galois/Counter Mode: stream-style, associated data may be appended
    /// with `aad()` until the first transform.
    Gcm,
    /// Counter with CBC-MAC: associated data is fixed at `reset()`.
    Ccm,
}

impl AeadMode {
    /// Uppercase mode name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcm => "GCM",
            Self::Ccm => "CCM",
        }
    }
}

impl fmt::Display for AeadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
