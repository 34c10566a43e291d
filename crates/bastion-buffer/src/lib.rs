// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Resizable buffer with zeroization of every released byte.
//!
//! [`SecureBuffer<T>`] is the storage used across bastion for key bytes,
//! cipher scratch state and tag staging.
//!
//! # Core Guarantees
//!
//! - **Shrinking zeroizes**: `truncate()`, `resize()` to a smaller length and
//!   `clear()` overwrite the released slots with zero before they become
//!   unreachable.
//! - **Growth zeroizes**: when capacity is exceeded the data is copied into a
//!   fresh allocation and the old allocation (including its spare capacity) is
//!   zeroized before it is freed.
//! - **Drop zeroizes**: the full backing storage is wiped on drop.
//! - **Spare capacity is always zero**: every slot in `[len, capacity)` reads as
//!   zero, which is observable through `raw_capacity()` in tests.
//!
//! # Example
//!
//! ```rust
//! use bastion_buffer::SecureBuffer;
//!
//! let mut key = [0x42u8; 16];
//! let mut buffer = SecureBuffer::drain_from(&mut key);
//!
//! // Source is zeroized
//! assert_eq!(key, [0u8; 16]);
//!
//! buffer.resize(4);
//! assert_eq!(buffer.as_slice(), &[0x42; 4]);
//!
//! buffer.clear();
//! assert!(buffer.is_empty());
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test-utils` feature to expose `raw_capacity()`, which returns
//! every slot of the backing allocation so tests can assert that released
//! bytes were wiped.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod secure_buffer;

pub use secure_buffer::SecureBuffer;
