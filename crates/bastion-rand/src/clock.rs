// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::sync::OnceLock;
use std::time::Instant;

/// Nanoseconds from a monotonic clock.
///
/// Only the low bits matter to callers; the epoch is arbitrary.
pub(crate) fn monotonic_sample() -> u64 {
    #[cfg(unix)]
    {
        // SAFETY: timespec is a plain C struct, all-zero is a valid value.
        let mut ts: libc::timespec = unsafe { core::mem::zeroed() };
        // SAFETY: `ts` is a valid, writable timespec.
        let ret = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) };

        if ret == 0 {
            return (ts.tv_sec as u64)
                .wrapping_mul(1_000_000_000)
                .wrapping_add(ts.tv_nsec as u64);
        }
    }

    instant_sample()
}

fn instant_sample() -> u64 {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();

    ANCHOR.get_or_init(Instant::now).elapsed().as_nanos() as u64
}
