// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! AEAD error types.

use crate::mode::AeadMode;

/// Failures reported by a mode backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("invalid key length: {len} bytes")]
    InvalidKeyLength { len: usize },

    #[error("invalid nonce length: {len} bytes")]
    InvalidNonceLength { len: usize },

    #[error("invalid tag length: {len} bytes")]
    InvalidTagLength { len: usize },

    #[error("message exceeds the mode's length limit")]
    MessageTooLong,

    #[error("associated data exceeds the mode's length limit")]
    AadTooLong,

    #[error("associated data supplied after the message")]
    AadAfterMessage,
}

/// Errors returned by [`AeadCipher`](crate::AeadCipher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AeadError {
    #[error("invalid key length: {len} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength { len: usize },

    #[error("invalid tag length: {len} bytes")]
    InvalidTagLength { len: usize },

    #[error("empty input")]
    EmptyInput,

    #[error("output capacity {capacity} is smaller than input length {len}")]
    InsufficientCapacity { len: usize, capacity: usize },

    #[error("{operation} is not supported in {mode} mode")]
    Unsupported {
        operation: &'static str,
        mode: AeadMode,
    },

    #[error("session used before reset")]
    NotReset,

    #[error("associated data supplied after the first transform")]
    AadAfterMessage,

    #[error("transform after the tag was extracted; reset first")]
    TagExtracted,

    #[error("session faulted; reset first")]
    Faulted,

    #[error("{operation} failed during initialization: {source}")]
    Initialization {
        operation: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: BackendError,
    },

    #[error("authentication failed: tag mismatch")]
    AuthenticationFailed,
}
