// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::EntropyError;
use crate::kernel::KernelEntropySource;
use crate::traits::EntropySource;

/// Configurable behavior for [`MockEntropySource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEntropySourceBehaviour {
    /// Normal operation (delegates to the kernel source).
    None,
    /// Always fail fill_bytes.
    FailAlways,
    /// Fail fill_bytes on the Nth call (1-indexed: 1 = first call fails).
    FailAtNthFillBytes(usize),
    /// Fill every byte with the given value.
    Fixed(u8),
}

/// Mock entropy source for testing.
///
/// Wraps [`KernelEntropySource`] but allows simulating failures via
/// [`MockEntropySourceBehaviour`]. The call counter is shared, so a handle
/// obtained from [`call_counter`](Self::call_counter) keeps working after the
/// mock has been moved into a chain.
pub struct MockEntropySource {
    name: &'static str,
    inner: KernelEntropySource,
    behaviour: MockEntropySourceBehaviour,
    fill_bytes_count: Arc<AtomicUsize>,
}

impl MockEntropySource {
    /// Creates a new mock entropy source with the specified behavior.
    pub fn new(behaviour: MockEntropySourceBehaviour) -> Self {
        Self::named("mock", behaviour)
    }

    /// Same as [`new`](Self::new) with a custom name for log records and origins.
    pub fn named(name: &'static str, behaviour: MockEntropySourceBehaviour) -> Self {
        Self {
            name,
            inner: KernelEntropySource,
            behaviour,
            fill_bytes_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Changes the mock behavior at runtime.
    pub fn change_behaviour(&mut self, behaviour: MockEntropySourceBehaviour) {
        self.behaviour = behaviour;
    }

    /// Resets the call counter.
    pub fn reset_count(&self) {
        self.fill_bytes_count.store(0, Ordering::SeqCst);
    }

    /// Returns the current call count.
    pub fn call_count(&self) -> usize {
        self.fill_bytes_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fill_bytes_count)
    }
}

impl EntropySource for MockEntropySource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), EntropyError> {
        let current = self.fill_bytes_count.fetch_add(1, Ordering::SeqCst);

        match self.behaviour {
            MockEntropySourceBehaviour::None => self.inner.fill_bytes(dest),
            MockEntropySourceBehaviour::FailAlways => Err(EntropyError::Unavailable),
            MockEntropySourceBehaviour::FailAtNthFillBytes(n) if current + 1 == n => {
                Err(EntropyError::Unavailable)
            }
            MockEntropySourceBehaviour::FailAtNthFillBytes(_) => self.inner.fill_bytes(dest),
            MockEntropySourceBehaviour::Fixed(value) => {
                dest.fill(value);
                Ok(())
            }
        }
    }
}
