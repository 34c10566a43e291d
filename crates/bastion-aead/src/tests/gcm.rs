// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use aes::{Aes128, Aes256};
use aes_gcm::AesGcm;
use aes_gcm::aead::consts::{U8, U12, U16, U60};
use aes_gcm::aead::{Aead, KeyInit, Nonce, Payload};

use crate::ModeBackend;
use crate::gcm::GcmBackend;

use super::support::{gcm, open, seal, seal_chunked, unhex};

// Test vectors from "The Galois/Counter Mode of Operation (GCM)",
// McGrew & Viega, Appendix B.

const TC3_KEY: &str = "feffe9928665731c6d6a8f9467308308";
const TC3_IV: &str = "cafebabefacedbaddecaf888";
const TC3_PLAINTEXT: &str = "d9313225f88406e5a55909c5aff5269a\
                             86a7a9531534f7da2e4c303d8a318a72\
                             1c3c0c95956809532fcf0e2449a6b525\
                             b16aedf5aa0de657ba637b391aafd255";
const TC3_CIPHERTEXT: &str = "42831ec2217774244b7221b784d0d49c\
                              e3aa212f2c02a4e035c17e2329aca12e\
                              21d514b25466931c7d8f6a5aac84aa05\
                              1ba30b396a0aac973d58e091473f5985";
const TC4_AAD: &str = "feedfacedeadbeeffeedfacedeadbeefabaddad2";

// =============================================================================
// known answers
// =============================================================================

#[test]
fn test_gcm_tc1_empty_message() {
    let mut cipher = gcm(&[0u8; 16]);
    let (ciphertext, tag) = seal(&mut cipher, &[0u8; 12], &[], &[], 16);

    assert!(ciphertext.is_empty());
    assert_eq!(tag, unhex("58e2fccefa7e3061367f1d57a4e7455a"));
}

#[test]
fn test_gcm_tc2_single_zero_block() {
    let mut cipher = gcm(&[0u8; 16]);
    let (ciphertext, tag) = seal(&mut cipher, &[0u8; 12], &[], &[0u8; 16], 16);

    assert_eq!(ciphertext, unhex("0388dace60b6a392f328c2b971b2fe78"));
    assert_eq!(tag, unhex("ab6e47d42cec13bdf53a67b21257bddf"));
}

#[test]
fn test_gcm_tc3_four_blocks() {
    let mut cipher = gcm(&unhex(TC3_KEY));
    let (ciphertext, tag) = seal(
        &mut cipher,
        &unhex(TC3_IV),
        &[],
        &unhex(TC3_PLAINTEXT),
        16,
    );

    assert_eq!(ciphertext, unhex(TC3_CIPHERTEXT));
    assert_eq!(tag, unhex("4d5c2af327cd64a62cf35abd2ba6fab4"));
}

#[test]
fn test_gcm_tc4_with_aad_and_partial_block() {
    let plaintext = &unhex(TC3_PLAINTEXT)[..60];
    let expected = &unhex(TC3_CIPHERTEXT)[..60];

    let mut cipher = gcm(&unhex(TC3_KEY));
    let (ciphertext, tag) = seal(
        &mut cipher,
        &unhex(TC3_IV),
        &unhex(TC4_AAD),
        plaintext,
        16,
    );

    assert_eq!(ciphertext, expected);
    assert_eq!(tag, unhex("5bc94fbc3221a5db94fae95ae7121a47"));

    let (decrypted, tag) = open(
        &mut cipher,
        &unhex(TC3_IV),
        &unhex(TC4_AAD),
        &ciphertext,
        16,
    );

    assert_eq!(decrypted, plaintext);
    assert_eq!(tag, unhex("5bc94fbc3221a5db94fae95ae7121a47"));
}

#[test]
fn test_gcm_tc5_short_nonce() {
    let plaintext = &unhex(TC3_PLAINTEXT)[..60];

    let mut cipher = gcm(&unhex(TC3_KEY));
    let (ciphertext, tag) = seal(
        &mut cipher,
        &unhex("cafebabefacedbad"),
        &unhex(TC4_AAD),
        plaintext,
        16,
    );

    assert_eq!(
        ciphertext,
        unhex(
            "61353b4c2806934a777ff51fa22a4755\
             699b2a714fcdc6f83766e5f97b6c7423\
             73806900e49f24b22b097544d4896b42\
             4989b5e1ebac0f07c23f4598"
        )
    );
    assert_eq!(tag, unhex("3612d2e79e3b0785561be14aaca2fccb"));
}

#[test]
fn test_gcm_tc13_aes256_empty_message() {
    let mut cipher = gcm(&[0u8; 32]);
    let (_, tag) = seal(&mut cipher, &[0u8; 12], &[], &[], 16);

    assert_eq!(tag, unhex("530f8afbc74536b9a963b4f1c4cb738b"));
}

#[test]
fn test_gcm_tc14_aes256_single_zero_block() {
    let mut cipher = gcm(&[0u8; 32]);
    let (ciphertext, tag) = seal(&mut cipher, &[0u8; 12], &[], &[0u8; 16], 16);

    assert_eq!(ciphertext, unhex("cea7403d4d606b6e074ec5d3baf39d18"));
    assert_eq!(tag, unhex("d0d1c8a799996bf0265b98b5d48ab919"));
}

// =============================================================================
// differential against aes-gcm
// =============================================================================

fn reference_seal<C: KeyInit + Aead>(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Vec<u8> {
    let cipher = C::new_from_slice(key).expect("Failed to key reference cipher");
    cipher
        .encrypt(
            Nonce::<C>::from_slice(nonce),
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .expect("Failed to encrypt with reference cipher")
}

fn sample(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

#[test]
fn test_gcm_matches_reference_aes128() {
    let key = sample(16, 1);
    let nonce = sample(12, 2);

    for (aad_len, msg_len) in [(0, 1), (1, 15), (13, 16), (16, 17), (37, 100), (0, 1000)] {
        let aad = sample(aad_len, 3);
        let plaintext = sample(msg_len, 4);

        let mut cipher = gcm(&key);
        let (ciphertext, tag) = seal(&mut cipher, &nonce, &aad, &plaintext, 16);

        let expected = reference_seal::<AesGcm<Aes128, U12>>(&key, &nonce, &aad, &plaintext);

        assert_eq!(ciphertext, expected[..msg_len], "aad {aad_len}, msg {msg_len}");
        assert_eq!(tag, expected[msg_len..], "aad {aad_len}, msg {msg_len}");
    }
}

#[test]
fn test_gcm_matches_reference_aes256() {
    let key = sample(32, 5);
    let nonce = sample(12, 6);
    let aad = sample(20, 7);
    let plaintext = sample(333, 8);

    let mut cipher = gcm(&key);
    let (ciphertext, tag) = seal(&mut cipher, &nonce, &aad, &plaintext, 16);

    let expected = reference_seal::<AesGcm<Aes256, U12>>(&key, &nonce, &aad, &plaintext);

    assert_eq!(ciphertext, expected[..333]);
    assert_eq!(tag, expected[333..]);
}

#[test]
fn test_gcm_matches_reference_8_byte_nonce() {
    let key = sample(16, 9);
    let nonce = sample(8, 10);
    let plaintext = sample(70, 11);

    let mut cipher = gcm(&key);
    let (ciphertext, tag) = seal(&mut cipher, &nonce, b"hdr", &plaintext, 16);

    let expected = reference_seal::<AesGcm<Aes128, U8>>(&key, &nonce, b"hdr", &plaintext);

    assert_eq!(ciphertext, expected[..70]);
    assert_eq!(tag, expected[70..]);
}

#[test]
fn test_gcm_matches_reference_16_and_60_byte_nonces() {
    let key = sample(16, 12);
    let plaintext = sample(48, 13);

    let nonce = sample(16, 14);
    let mut cipher = gcm(&key);
    let (ciphertext, tag) = seal(&mut cipher, &nonce, &[], &plaintext, 16);
    let expected = reference_seal::<AesGcm<Aes128, U16>>(&key, &nonce, &[], &plaintext);
    assert_eq!(ciphertext, expected[..48]);
    assert_eq!(tag, expected[48..]);

    let nonce = sample(60, 15);
    let (ciphertext, tag) = seal(&mut cipher, &nonce, &[], &plaintext, 16);
    let expected = reference_seal::<AesGcm<Aes128, U60>>(&key, &nonce, &[], &plaintext);
    assert_eq!(ciphertext, expected[..48]);
    assert_eq!(tag, expected[48..]);
}

#[test]
fn test_gcm_streaming_matches_reference() {
    let key = sample(16, 16);
    let nonce = sample(12, 17);
    let aad = sample(29, 18);
    let plaintext = sample(257, 19);

    let mut cipher = gcm(&key);
    let (ciphertext, tag) = seal_chunked(&mut cipher, &nonce, &aad, &plaintext, &[1, 7, 16, 33], 16);

    let expected = reference_seal::<AesGcm<Aes128, U12>>(&key, &nonce, &aad, &plaintext);

    assert_eq!(ciphertext, expected[..257]);
    assert_eq!(tag, expected[257..]);
}

#[test]
fn test_gcm_truncated_tag_is_prefix() {
    let mut cipher = gcm(&unhex(TC3_KEY));
    let (_, full) = seal(
        &mut cipher,
        &unhex(TC3_IV),
        &unhex(TC4_AAD),
        &unhex(TC3_PLAINTEXT),
        16,
    );

    for tag_len in 1..=16 {
        let (_, truncated) = seal(
            &mut cipher,
            &unhex(TC3_IV),
            &unhex(TC4_AAD),
            &unhex(TC3_PLAINTEXT),
            tag_len,
        );

        assert_eq!(truncated, full[..tag_len], "tag_len {tag_len}");
    }
}

// =============================================================================
// backend
// =============================================================================

#[test]
fn test_gcm_backend_rejects_empty_nonce() {
    let mut backend = GcmBackend::new(&[0u8; 16]).expect("Failed to new()");

    assert_eq!(
        backend.reset_iv(&[]),
        Err(crate::BackendError::InvalidNonceLength { len: 0 })
    );
}

#[test]
fn test_gcm_backend_rejects_bad_key() {
    assert!(matches!(
        GcmBackend::new(&[0u8; 20]),
        Err(crate::BackendError::InvalidKeyLength { len: 20 })
    ));
}

#[test]
fn test_gcm_backend_aad_after_message() {
    let mut backend = GcmBackend::new(&[0u8; 16]).expect("Failed to new()");
    backend.reset_iv(&[0u8; 12]).expect("Failed to reset_iv()");

    let mut buf = [0u8; 4];
    backend
        .encrypt_in_place(&mut buf)
        .expect("Failed to encrypt_in_place()");

    assert_eq!(
        backend.process_aad(b"late"),
        Err(crate::BackendError::AadAfterMessage)
    );
}

#[test]
fn test_gcm_backend_tag_length_bounds() {
    let mut backend = GcmBackend::new(&[0u8; 16]).expect("Failed to new()");
    backend.reset_iv(&[0u8; 12]).expect("Failed to reset_iv()");

    assert!(backend.get_tag(&mut []).is_err());
    assert!(backend.get_tag(&mut [0u8; 17]).is_err());
    assert!(backend.get_tag(&mut [0u8; 16]).is_ok());
}

#[test]
fn test_gcm_backend_state_size_and_name() {
    let backend = GcmBackend::new(&[0u8; 24]).expect("Failed to new()");

    assert_eq!(backend.state_size(), 80);
    assert_eq!(backend.name(), "AES-192-GCM");
}
