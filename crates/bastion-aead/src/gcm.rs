// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AES-GCM (NIST SP 800-38D), streaming.
//!
//! - Keystream: `E(K, inc32^i(J0))` for `i >= 1`
//! - Authentication: `S = GHASH_H(pad(A) || pad(C) || [len(A)]_64 || [len(C)]_64)`
//! - Tag: `MSB_t(E(K, J0) XOR S)`
//!
//! Associated data and ciphertext share one pending-block buffer; the
//! pending associated data is padded and flushed when the first message
//! byte arrives.

use bastion_buffer::SecureBuffer;
use ghash::GHash;
use ghash::universal_hash::{KeyInit, UniversalHash};
use zeroize::Zeroize;

use crate::block::{BLOCK_LEN, BlockCipher};
use crate::error::BackendError;
use crate::traits::ModeBackend;

/// Fast-path nonce length.
pub const GCM_NONCE_LEN: usize = 12;
/// Largest tag.
pub const GCM_MAX_TAG_LEN: usize = 16;

/// Plaintext limit per message: 2^39 - 256 bits.
const MAX_MESSAGE_LEN: u64 = (1 << 36) - 32;
/// Associated data limit: 2^64 - 1 bits.
const MAX_AAD_LEN: u64 = (1 << 61) - 1;

// Scratch layout
const J0: usize = 0;
const COUNTER: usize = J0 + BLOCK_LEN;
const KEYSTREAM: usize = COUNTER + BLOCK_LEN;
const PENDING: usize = KEYSTREAM + BLOCK_LEN;
const HASH_KEY: usize = PENDING + BLOCK_LEN;
const STATE_LEN: usize = HASH_KEY + BLOCK_LEN;

/// GCM mode backend.
pub struct GcmBackend {
    cipher: BlockCipher,
    ghash: GHash,
    scratch: SecureBuffer<u8>,
    aad_len: u64,
    message_len: u64,
    pending_len: usize,
    keystream_pos: usize,
    in_message: bool,
}

impl GcmBackend {
    /// Keys a GCM backend. `key` must be 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, BackendError> {
        let cipher = BlockCipher::new(key)?;

        let mut scratch = SecureBuffer::with_capacity(STATE_LEN);
        scratch.resize(STATE_LEN);

        // H = E(K, 0^128)
        cipher.encrypt_block(&mut scratch[HASH_KEY..HASH_KEY + BLOCK_LEN]);
        let ghash = GHash::new(ghash::Key::from_slice(
            &scratch[HASH_KEY..HASH_KEY + BLOCK_LEN],
        ));

        Ok(Self {
            cipher,
            ghash,
            scratch,
            aad_len: 0,
            message_len: 0,
            pending_len: 0,
            keystream_pos: BLOCK_LEN,
            in_message: false,
        })
    }

    fn fresh_ghash(&self) -> GHash {
        GHash::new(ghash::Key::from_slice(
            &self.scratch[HASH_KEY..HASH_KEY + BLOCK_LEN],
        ))
    }

    fn derive_j0(&mut self, nonce: &[u8]) {
        let j0 = J0..J0 + BLOCK_LEN;

        if nonce.len() == GCM_NONCE_LEN {
            // J0 = IV || 0^31 || 1
            self.scratch[j0.clone()].zeroize();
            self.scratch[J0..J0 + GCM_NONCE_LEN].copy_from_slice(nonce);
            self.scratch[J0 + BLOCK_LEN - 1] = 1;
            return;
        }

        // J0 = GHASH_H(IV || 0^(s+64) || [len(IV)]_64)
        let mut ghash = self.fresh_ghash();
        ghash.update_padded(nonce);

        let mut len_block = [0u8; BLOCK_LEN];
        len_block[8..].copy_from_slice(&((nonce.len() as u64) * 8).to_be_bytes());
        ghash.update_padded(&len_block);

        let mut digest = ghash.finalize();
        self.scratch[j0].copy_from_slice(&digest);
        digest.as_mut_slice().zeroize();
    }

    fn next_keystream_block(&mut self) {
        let (counter, keystream) = self.scratch[COUNTER..PENDING].split_at_mut(BLOCK_LEN);
        keystream.copy_from_slice(counter);
        self.cipher.encrypt_block(keystream);
        inc32(counter);

        self.keystream_pos = 0;
    }

    fn absorb(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let take = (BLOCK_LEN - self.pending_len).min(data.len());
            let start = PENDING + self.pending_len;

            self.scratch[start..start + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];

            if self.pending_len == BLOCK_LEN {
                self.flush_pending();
            }
        }
    }

    fn flush_pending(&mut self) {
        if self.pending_len == 0 {
            return;
        }

        let pending = &mut self.scratch[PENDING..PENDING + BLOCK_LEN];
        self.ghash.update_padded(&pending[..self.pending_len]);
        pending.zeroize();
        self.pending_len = 0;
    }

    fn crypt(&mut self, buf: &mut [u8], encrypt: bool) -> Result<(), BackendError> {
        let new_len = self
            .message_len
            .checked_add(buf.len() as u64)
            .filter(|&len| len <= MAX_MESSAGE_LEN)
            .ok_or(BackendError::MessageTooLong)?;

        if !self.in_message {
            self.flush_pending();
            self.in_message = true;
        }

        let mut offset = 0;
        while offset < buf.len() {
            if self.keystream_pos == BLOCK_LEN {
                self.next_keystream_block();
            }

            let take = (BLOCK_LEN - self.keystream_pos).min(buf.len() - offset);
            let segment = &mut buf[offset..offset + take];

            if !encrypt {
                self.absorb(segment);
            }

            let keystream = KEYSTREAM + self.keystream_pos;
            for (byte, key) in segment
                .iter_mut()
                .zip(&self.scratch[keystream..keystream + take])
            {
                *byte ^= key;
            }

            if encrypt {
                self.absorb(segment);
            }

            self.keystream_pos += take;
            offset += take;
        }

        self.message_len = new_len;

        Ok(())
    }
}

/// Increments the rightmost 32 bits of a counter block, mod 2^32.
fn inc32(block: &mut [u8]) {
    let mut word = [0u8; 4];
    word.copy_from_slice(&block[BLOCK_LEN - 4..]);
    let next = u32::from_be_bytes(word).wrapping_add(1);
    block[BLOCK_LEN - 4..].copy_from_slice(&next.to_be_bytes());
}

impl ModeBackend for GcmBackend {
    fn state_size(&self) -> usize {
        STATE_LEN
    }

    fn reset_iv(&mut self, nonce: &[u8]) -> Result<(), BackendError> {
        if nonce.is_empty() {
            return Err(BackendError::InvalidNonceLength { len: 0 });
        }

        self.derive_j0(nonce);

        let (j0, rest) = self.scratch[J0..KEYSTREAM].split_at_mut(BLOCK_LEN);
        rest.copy_from_slice(j0);
        inc32(rest);

        self.scratch[KEYSTREAM..HASH_KEY].zeroize();
        self.ghash = self.fresh_ghash();
        self.aad_len = 0;
        self.message_len = 0;
        self.pending_len = 0;
        self.keystream_pos = BLOCK_LEN;
        self.in_message = false;

        Ok(())
    }

    fn process_aad(&mut self, aad: &[u8]) -> Result<(), BackendError> {
        if self.in_message {
            return Err(BackendError::AadAfterMessage);
        }

        self.aad_len = self
            .aad_len
            .checked_add(aad.len() as u64)
            .filter(|&len| len <= MAX_AAD_LEN)
            .ok_or(BackendError::AadTooLong)?;

        self.absorb(aad);

        Ok(())
    }

    fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), BackendError> {
        self.crypt(buf, true)
    }

    fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), BackendError> {
        self.crypt(buf, false)
    }

    fn get_tag(&mut self, out: &mut [u8]) -> Result<(), BackendError> {
        if out.is_empty() || out.len() > GCM_MAX_TAG_LEN {
            return Err(BackendError::InvalidTagLength { len: out.len() });
        }

        let mut ghash = self.ghash.clone();
        if self.pending_len > 0 {
            ghash.update_padded(&self.scratch[PENDING..PENDING + self.pending_len]);
        }

        let mut len_block = [0u8; BLOCK_LEN];
        len_block[..8].copy_from_slice(&(self.aad_len * 8).to_be_bytes());
        len_block[8..].copy_from_slice(&(self.message_len * 8).to_be_bytes());
        ghash.update_padded(&len_block);

        let mut s = ghash.finalize();

        let mut tag_mask = [0u8; BLOCK_LEN];
        tag_mask.copy_from_slice(&self.scratch[J0..J0 + BLOCK_LEN]);
        self.cipher.encrypt_block(&mut tag_mask);

        for ((dst, mask), hash) in out.iter_mut().zip(&tag_mask).zip(s.iter()) {
            *dst = mask ^ hash;
        }

        tag_mask.zeroize();
        s.as_mut_slice().zeroize();

        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.cipher.key_bits() {
            128 => "AES-128-GCM",
            192 => "AES-192-GCM",
            _ => "AES-256-GCM",
        }
    }
}
