// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Mode backend trait.

use crate::error::BackendError;

/// Per-mode primitive driven by [`AeadCipher`](crate::AeadCipher).
///
/// A backend is keyed once at construction and owns all of its scratch
/// state. The engine guarantees the call order
/// `reset_iv → process_aad* → (encrypt|decrypt)* → get_tag*`; backends still
/// reject the violations they can detect.
pub trait ModeBackend {
    /// Bytes of scratch state allocated for this backend.
    fn state_size(&self) -> usize;

    /// Starts a new message under `nonce`, discarding any previous one.
    fn reset_iv(&mut self, nonce: &[u8]) -> Result<(), BackendError>;

    /// Authenticates `aad` without encrypting it.
    fn process_aad(&mut self, aad: &[u8]) -> Result<(), BackendError>;

    /// Encrypts `buf` in place, continuing the current message.
    fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), BackendError>;

    /// Decrypts `buf` in place, continuing the current message.
    fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), BackendError>;

    /// Writes the tag over everything processed since `reset_iv`.
    ///
    /// Does not consume the message state: repeated calls yield the same tag.
    fn get_tag(&mut self, out: &mut [u8]) -> Result<(), BackendError>;

    /// Algorithm name, e.g. `"AES-256-GCM"`.
    fn name(&self) -> &'static str;
}
