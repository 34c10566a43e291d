// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>AEAD sessions, a process-wide CSPRNG and zeroizing buffers.</em></p>
//!
//! ---
//!
//! Bastion bundles three crates:
//!
//! - [`aead`]: one session API (`reset → aad* → encrypt/decrypt* → auth_tag`)
//!   over AES-GCM and AES-CCM
//! - [`rand`]: a mutex-guarded random engine seeded from RDSEED, RDRAND and
//!   the kernel, with a compiled-in last resort seed
//! - [`buffer`]: [`SecureBuffer`](buffer::SecureBuffer), a growable buffer
//!   that zeroizes everything it releases
//!
//! # Quick Start
//!
//! ```rust
//! use bastion::aead::{AeadCipher, AeadMode, GCM_NONCE_LEN};
//!
//! let key = bastion::rand::generate_key(32).expect("Failed to generate key");
//! let mut nonce = [0u8; GCM_NONCE_LEN];
//! bastion::rand::rand_bytes(&mut nonce).expect("Failed to generate nonce");
//!
//! let mut cipher = AeadCipher::new(AeadMode::Gcm, &key).expect("Failed to create cipher");
//!
//! let mut message = *b"meet me at the usual place";
//! let len = message.len();
//! let mut tag = [0u8; 16];
//!
//! cipher.reset(&nonce, b"v1").expect("Failed to reset()");
//! cipher.encrypt_in_place(&mut message, len).expect("Failed to encrypt()");
//! cipher.auth_tag(&mut tag).expect("Failed to auth_tag()");
//!
//! cipher.reset(&nonce, b"v1").expect("Failed to reset()");
//! cipher.decrypt_in_place(&mut message, len).expect("Failed to decrypt()");
//! cipher.verify_tag(&tag).expect("Tag mismatch");
//!
//! assert_eq!(&message, b"meet me at the usual place");
//! ```
//!
//! # Nonces
//!
//! Reusing a nonce under one key breaks both modes. For long-lived keys use
//! [`NonceSessionGenerator`](rand::NonceSessionGenerator), which prefixes a
//! per-session counter to random bytes:
//!
//! ```rust
//! use bastion::rand::{NonceGenerator, NonceSessionGenerator, EngineRng};
//!
//! let mut nonces = NonceSessionGenerator::<EngineRng, 12>::from_engine();
//! let a = nonces.generate_nonce();
//! let b = nonces.generate_nonce();
//! assert_ne!(a, b);
//! ```
//!
//! # Logging
//!
//! The crates emit [`tracing`](https://docs.rs/tracing) events and never
//! install a subscriber. Entropy fallbacks and lock poisoning are logged at
//! `warn`.
//!
//! # Features
//!
//! - `test-utils`: mock entropy sources under [`support::test_utils`].

#![cfg_attr(not(test), no_std)]

pub mod support;

pub use bastion_aead as aead;
pub use bastion_buffer as buffer;
pub use bastion_rand as rand;
