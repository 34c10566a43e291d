// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256};

use crate::error::BackendError;

pub(crate) const BLOCK_LEN: usize = 16;

/// AES with the key size chosen at runtime.
///
/// Round keys are zeroized on drop by the `aes` crate.
pub(crate) enum BlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl BlockCipher {
    pub(crate) fn new(key: &[u8]) -> Result<Self, BackendError> {
        match key.len() {
            16 => Aes128::new_from_slice(key).map(Self::Aes128),
            24 => Aes192::new_from_slice(key).map(Self::Aes192),
            32 => Aes256::new_from_slice(key).map(Self::Aes256),
            len => return Err(BackendError::InvalidKeyLength { len }),
        }
        .map_err(|_| BackendError::InvalidKeyLength { len: key.len() })
    }

    /// Encrypts one 16-byte block in place.
    #[inline(always)]
    pub(crate) fn encrypt_block(&self, block: &mut [u8]) {
        debug_assert_eq!(block.len(), BLOCK_LEN);
        let block = GenericArray::from_mut_slice(block);

        match self {
            Self::Aes128(cipher) => cipher.encrypt_block(block),
            Self::Aes192(cipher) => cipher.encrypt_block(block),
            Self::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }

    pub(crate) fn key_bits(&self) -> usize {
        match self {
            Self::Aes128(_) => 128,
            Self::Aes192(_) => 192,
            Self::Aes256(_) => 256,
        }
    }
}
