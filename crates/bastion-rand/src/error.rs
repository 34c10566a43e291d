// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use thiserror::Error;

/// Failure of a single entropy source.
///
/// These never escape the chain as hard failures: the chain moves on to the
/// next source and finally to the compiled-in fallback seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// The CPU (or the build configuration) does not provide the instruction.
    #[error("hardware entropy instruction unsupported")]
    HardwareUnsupported,

    /// The instruction kept reporting an empty entropy pool.
    #[error("hardware entropy exhausted after {attempts} attempts")]
    HardwareExhausted {
        /// Number of attempts made for the failing word.
        attempts: usize,
    },

    /// The kernel entropy read failed.
    #[error("kernel entropy read failed: {0}")]
    Kernel(getrandom::Error),

    /// Source unavailable for any other reason.
    #[error("entropy source unavailable")]
    Unavailable,
}

/// Argument errors raised by the random engine entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RandError {
    /// A zero-length output was requested.
    #[error("requested zero random bytes")]
    EmptyRequest,

    /// A zero-length seed was supplied.
    #[error("seed material is empty")]
    EmptySeed,
}
