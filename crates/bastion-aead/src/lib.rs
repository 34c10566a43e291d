// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AEAD sessions over AES-GCM and AES-CCM.
//!
//! [`AeadCipher`] exposes one state machine for both modes:
//!
//! ```text
//! Constructed → reset → aad* → (encrypt | decrypt)* → auth_tag → reset …
//! ```
//!
//! - **GCM**: any non-empty nonce (12 bytes recommended), associated data via
//!   `reset` and `aad()`, tags of 1 to 16 bytes.
//! - **CCM**: 8 to 12 byte nonces, associated data only at `reset`, tag length
//!   fixed at construction.
//!
//! All backend scratch state (counter blocks, keystream, GHASH pending block,
//! staged CCM input) lives in [`SecureBuffer`](bastion_buffer::SecureBuffer)s
//! and is zeroized when released.
//!
//! Tag comparison is the caller's job unless [`AeadCipher::verify_tag`] is
//! used, which compares in constant time.

#![cfg_attr(not(test), no_std)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod block;
mod ccm;
mod cipher;
mod error;
mod gcm;
mod mode;
mod traits;

pub use ccm::{CCM_MAX_NONCE_LEN, CCM_MIN_NONCE_LEN, CCM_TAG_LENS, CcmBackend};
pub use cipher::{AeadCipher, DEFAULT_TAG_LEN};
pub use error::{AeadError, BackendError};
pub use gcm::{GCM_MAX_TAG_LEN, GCM_NONCE_LEN, GcmBackend};
pub use mode::AeadMode;
pub use traits::ModeBackend;
