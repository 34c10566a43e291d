// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AES-CCM (NIST SP 800-38C).
//!
//! Counter blocks are `A_i = [L - 1] || N || [i]_L` with `L = 15 - len(N)`;
//! the keystream starts at `A_1`. The CBC-MAC runs over
//! `B_0 || encode(A) || pad || P || pad` where `B_0` carries the exact
//! message length. Since that length is only known once the caller asks for
//! the tag, the plaintext is staged in a [`SecureBuffer`] and the MAC is
//! computed in `get_tag`. Encryption itself streams.

use bastion_buffer::SecureBuffer;
use zeroize::Zeroize;

use crate::block::{BLOCK_LEN, BlockCipher};
use crate::error::BackendError;
use crate::traits::ModeBackend;

/// Shortest accepted nonce.
pub const CCM_MIN_NONCE_LEN: usize = 8;
/// Longest accepted nonce.
pub const CCM_MAX_NONCE_LEN: usize = 12;
/// Accepted tag lengths.
pub const CCM_TAG_LENS: [usize; 7] = [4, 6, 8, 10, 12, 14, 16];

// Scratch layout
const COUNTER: usize = 0;
const KEYSTREAM: usize = COUNTER + BLOCK_LEN;
const MAC: usize = KEYSTREAM + BLOCK_LEN;
const NONCE: usize = MAC + BLOCK_LEN;
const STATE_LEN: usize = NONCE + BLOCK_LEN;

/// CBC-MAC over a borrowed 16-byte chaining block.
///
/// Input bytes are XORed into the block and the block is encrypted each time
/// it fills; `pad` closes a partial block with implicit zeros.
struct CbcMac<'a> {
    cipher: &'a BlockCipher,
    state: &'a mut [u8],
    filled: usize,
}

impl<'a> CbcMac<'a> {
    fn new(cipher: &'a BlockCipher, state: &'a mut [u8]) -> Self {
        state.zeroize();

        Self {
            cipher,
            state,
            filled: 0,
        }
    }

    fn update(&mut self, data: &[u8]) {
        for byte in data {
            self.state[self.filled] ^= byte;
            self.filled += 1;

            if self.filled == BLOCK_LEN {
                self.cipher.encrypt_block(self.state);
                self.filled = 0;
            }
        }
    }

    fn pad(&mut self) {
        if self.filled > 0 {
            self.cipher.encrypt_block(self.state);
            self.filled = 0;
        }
    }
}

/// CCM mode backend.
///
/// Memory grows with the streamed message: every transformed plaintext byte
/// is staged until `get_tag`, so a message of `n` bytes holds `O(n)` bytes
/// of zeroizing storage. `reset_iv` wipes it and keeps the capacity for the
/// next message.
pub struct CcmBackend {
    cipher: BlockCipher,
    tag_len: usize,
    scratch: SecureBuffer<u8>,
    aad: SecureBuffer<u8>,
    message: SecureBuffer<u8>,
    nonce_len: usize,
    keystream_pos: usize,
}

impl CcmBackend {
    /// Keys a CCM backend producing `tag_len`-byte tags.
    pub fn new(key: &[u8], tag_len: usize) -> Result<Self, BackendError> {
        if !CCM_TAG_LENS.contains(&tag_len) {
            return Err(BackendError::InvalidTagLength { len: tag_len });
        }

        let cipher = BlockCipher::new(key)?;

        let mut scratch = SecureBuffer::with_capacity(STATE_LEN);
        scratch.resize(STATE_LEN);

        Ok(Self {
            cipher,
            tag_len,
            scratch,
            aad: SecureBuffer::new(),
            message: SecureBuffer::new(),
            nonce_len: 0,
            keystream_pos: BLOCK_LEN,
        })
    }

    /// Tag length fixed at construction.
    pub fn tag_len(&self) -> usize {
        self.tag_len
    }

    /// Size of the length field, `L = 15 - len(N)`.
    fn length_size(&self) -> usize {
        15 - self.nonce_len
    }

    fn max_message_len(&self) -> u64 {
        match self.length_size() {
            l if l >= 8 => u64::MAX,
            l => (1u64 << (8 * l)) - 1,
        }
    }

    /// Writes `[flags] || N || [value]_L` into `block`.
    fn format_block(&self, block: &mut [u8], flags: u8, value: u64) {
        let l = self.length_size();

        block[0] = flags;
        block[1..1 + self.nonce_len].copy_from_slice(&self.scratch[NONCE..NONCE + self.nonce_len]);

        let value = value.to_be_bytes();
        block[1 + self.nonce_len..].copy_from_slice(&value[8 - l..]);
    }

    fn next_keystream_block(&mut self) {
        let (counter, keystream) = self.scratch[COUNTER..MAC].split_at_mut(BLOCK_LEN);
        keystream.copy_from_slice(counter);
        self.cipher.encrypt_block(keystream);

        // The counter field is the trailing L bytes, big-endian.
        let l = 15 - self.nonce_len;
        for byte in counter[BLOCK_LEN - l..].iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }

        self.keystream_pos = 0;
    }

    fn apply_keystream(&mut self, buf: &mut [u8]) {
        let mut offset = 0;

        while offset < buf.len() {
            if self.keystream_pos == BLOCK_LEN {
                self.next_keystream_block();
            }

            let take = (BLOCK_LEN - self.keystream_pos).min(buf.len() - offset);
            let keystream = KEYSTREAM + self.keystream_pos;

            for (byte, key) in buf[offset..offset + take]
                .iter_mut()
                .zip(&self.scratch[keystream..keystream + take])
            {
                *byte ^= key;
            }

            self.keystream_pos += take;
            offset += take;
        }
    }

    fn check_length(&self, additional: usize) -> Result<(), BackendError> {
        let total = (self.message.len() as u64).checked_add(additional as u64);

        match total {
            Some(len) if len <= self.max_message_len() => Ok(()),
            _ => Err(BackendError::MessageTooLong),
        }
    }

    fn ensure_started(&self) -> Result<(), BackendError> {
        if self.nonce_len == 0 {
            return Err(BackendError::InvalidNonceLength { len: 0 });
        }

        Ok(())
    }
}

/// Length prefix for associated data.
fn encode_aad_len(len: u64, out: &mut [u8; 10]) -> usize {
    if len < 0xFF00 {
        out[..2].copy_from_slice(&(len as u16).to_be_bytes());
        2
    } else if len <= u64::from(u32::MAX) {
        out[..2].copy_from_slice(&[0xFF, 0xFE]);
        out[2..6].copy_from_slice(&(len as u32).to_be_bytes());
        6
    } else {
        out[..2].copy_from_slice(&[0xFF, 0xFF]);
        out[2..10].copy_from_slice(&len.to_be_bytes());
        10
    }
}

impl ModeBackend for CcmBackend {
    fn state_size(&self) -> usize {
        STATE_LEN
    }

    fn reset_iv(&mut self, nonce: &[u8]) -> Result<(), BackendError> {
        if !(CCM_MIN_NONCE_LEN..=CCM_MAX_NONCE_LEN).contains(&nonce.len()) {
            return Err(BackendError::InvalidNonceLength { len: nonce.len() });
        }

        self.scratch.as_mut_slice().zeroize();
        self.nonce_len = nonce.len();
        self.scratch[NONCE..NONCE + nonce.len()].copy_from_slice(nonce);

        let mut counter = [0u8; BLOCK_LEN];
        self.format_block(&mut counter, (self.length_size() - 1) as u8, 1);
        self.scratch[COUNTER..COUNTER + BLOCK_LEN].copy_from_slice(&counter);
        counter.zeroize();

        self.aad.clear();
        self.message.clear();
        self.keystream_pos = BLOCK_LEN;

        Ok(())
    }

    fn process_aad(&mut self, aad: &[u8]) -> Result<(), BackendError> {
        self.ensure_started()?;

        if !self.message.is_empty() {
            return Err(BackendError::AadAfterMessage);
        }

        self.aad.extend_from_slice(aad);

        Ok(())
    }

    fn encrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), BackendError> {
        self.ensure_started()?;
        self.check_length(buf.len())?;

        self.message.extend_from_slice(buf);
        self.apply_keystream(buf);

        Ok(())
    }

    fn decrypt_in_place(&mut self, buf: &mut [u8]) -> Result<(), BackendError> {
        self.ensure_started()?;
        self.check_length(buf.len())?;

        self.apply_keystream(buf);
        self.message.extend_from_slice(buf);

        Ok(())
    }

    fn get_tag(&mut self, out: &mut [u8]) -> Result<(), BackendError> {
        self.ensure_started()?;

        if out.len() != self.tag_len {
            return Err(BackendError::InvalidTagLength { len: out.len() });
        }

        let l = self.length_size();
        let adata: u8 = if self.aad.is_empty() { 0 } else { 0x40 };
        let flags = adata | ((((self.tag_len - 2) / 2) as u8) << 3) | (l - 1) as u8;

        let mut b0 = [0u8; BLOCK_LEN];
        self.format_block(&mut b0, flags, self.message.len() as u64);

        let mut s0 = [0u8; BLOCK_LEN];
        self.format_block(&mut s0, (l - 1) as u8, 0);
        self.cipher.encrypt_block(&mut s0);

        let mut mac = CbcMac::new(&self.cipher, &mut self.scratch[MAC..NONCE]);
        mac.update(&b0);

        if !self.aad.is_empty() {
            let mut header = [0u8; 10];
            let header_len = encode_aad_len(self.aad.len() as u64, &mut header);
            mac.update(&header[..header_len]);
            mac.update(&self.aad);
            mac.pad();
        }

        mac.update(&self.message);
        mac.pad();

        for ((dst, tag), mask) in out.iter_mut().zip(mac.state.iter()).zip(&s0) {
            *dst = tag ^ mask;
        }

        b0.zeroize();
        s0.zeroize();

        Ok(())
    }

    fn name(&self) -> &'static str {
        match self.cipher.key_bits() {
            128 => "AES-128-CCM",
            192 => "AES-192-CCM",
            _ => "AES-256-CCM",
        }
    }
}
