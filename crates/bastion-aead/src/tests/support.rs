// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{AeadCipher, AeadMode};

pub(crate) fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s.replace(' ', "")).expect("Failed to decode hex")
}

/// Encrypts `plaintext` in one call and returns `(ciphertext, tag)`.
pub(crate) fn seal(
    cipher: &mut AeadCipher,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    tag_len: usize,
) -> (Vec<u8>, Vec<u8>) {
    cipher.reset(nonce, aad).expect("Failed to reset()");

    let mut ciphertext = plaintext.to_vec();
    if !ciphertext.is_empty() {
        let len = ciphertext.len();
        cipher
            .encrypt_in_place(&mut ciphertext, len)
            .expect("Failed to encrypt_in_place()");
    }

    let mut tag = vec![0u8; tag_len];
    cipher.auth_tag(&mut tag).expect("Failed to auth_tag()");

    (ciphertext, tag)
}

/// Decrypts `ciphertext` in one call and returns `(plaintext, tag)`.
pub(crate) fn open(
    cipher: &mut AeadCipher,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag_len: usize,
) -> (Vec<u8>, Vec<u8>) {
    cipher.reset(nonce, aad).expect("Failed to reset()");

    let mut plaintext = ciphertext.to_vec();
    if !plaintext.is_empty() {
        let len = plaintext.len();
        cipher
            .decrypt_in_place(&mut plaintext, len)
            .expect("Failed to decrypt_in_place()");
    }

    let mut tag = vec![0u8; tag_len];
    cipher.auth_tag(&mut tag).expect("Failed to auth_tag()");

    (plaintext, tag)
}

/// Encrypts `plaintext` split at the given chunk sizes (cycled).
pub(crate) fn seal_chunked(
    cipher: &mut AeadCipher,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    chunks: &[usize],
    tag_len: usize,
) -> (Vec<u8>, Vec<u8>) {
    cipher.reset(nonce, aad).expect("Failed to reset()");

    let mut ciphertext = plaintext.to_vec();
    let mut offset = 0;
    let mut sizes = chunks.iter().cycle();

    while offset < ciphertext.len() {
        let size = (*sizes.next().expect("chunk sizes must not be empty"))
            .max(1)
            .min(ciphertext.len() - offset);
        cipher
            .encrypt_in_place(&mut ciphertext[offset..], size)
            .expect("Failed to encrypt_in_place()");
        offset += size;
    }

    let mut tag = vec![0u8; tag_len];
    cipher.auth_tag(&mut tag).expect("Failed to auth_tag()");

    (ciphertext, tag)
}

pub(crate) fn gcm(key: &[u8]) -> AeadCipher {
    AeadCipher::new(AeadMode::Gcm, key).expect("Failed to create GCM cipher")
}

pub(crate) fn ccm(key: &[u8], tag_len: usize) -> AeadCipher {
    AeadCipher::with_tag_len(AeadMode::Ccm, key, tag_len).expect("Failed to create CCM cipher")
}
