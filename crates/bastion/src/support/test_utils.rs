// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities re-exported from bastion-rand

#[cfg(feature = "test-utils")]
pub mod rand {
    pub use bastion_rand::test_utils::*;
}
