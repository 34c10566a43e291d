// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use zeroize::{DefaultIsZeroes, Zeroize, ZeroizeOnDrop};

/// A resizable buffer that zeroizes every slot it releases.
///
/// Invariant: every slot in `[len, capacity)` of the backing allocation holds
/// `T::default()` (all-zero for [`DefaultIsZeroes`] types). Growth never lets
/// `Vec` reallocate on its own; instead [`SecureBuffer`] performs the
/// reallocation itself:
///
/// 1. Allocates a fresh Vec with the next power-of-two capacity
/// 2. Zeroizes the fresh spare capacity
/// 3. Copies the current data over
/// 4. Zeroizes the old allocation (data and spare capacity) before freeing it
///
/// # Example
///
/// ```rust
/// use bastion_buffer::SecureBuffer;
///
/// let mut buffer = SecureBuffer::<u8>::new();
/// buffer.extend_from_slice(b"secret");
/// buffer.truncate(3);
///
/// assert_eq!(buffer.as_slice(), b"sec");
/// ```
pub struct SecureBuffer<T = u8>
where
    T: DefaultIsZeroes,
{
    inner: Vec<T>,
}

impl<T> SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    /// Creates a new empty `SecureBuffer` without allocating.
    pub fn new() -> Self {
        Self { inner: Vec::new() }
    }

    /// Creates a new `SecureBuffer` with at least the specified capacity.
    ///
    /// The whole allocation is zero-initialized.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Self::zeroed_allocation(capacity),
        }
    }

    /// Creates a buffer holding a copy of `src`.
    pub fn from_slice(src: &[T]) -> Self {
        let mut buffer = Self::with_capacity(src.len());
        buffer.extend_from_slice(src);

        buffer
    }

    /// Creates a buffer by moving `src` into it, zeroizing the source.
    pub fn drain_from(src: &mut [T]) -> Self {
        let buffer = Self::from_slice(src);
        src.zeroize();

        buffer
    }

    fn zeroed_allocation(capacity: usize) -> Vec<T> {
        let mut inner = Vec::with_capacity(capacity);
        inner.spare_capacity_mut().zeroize();

        inner
    }

    /// Returns the number of elements in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the buffer contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the capacity of the backing allocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[cold]
    #[inline(never)]
    fn grow_to(&mut self, min_capacity: usize) {
        let mut fresh = Self::zeroed_allocation(min_capacity.next_power_of_two());
        fresh.extend_from_slice(&self.inner);

        Self::release(&mut self.inner);
        self.inner = fresh;
    }

    /// Wipes an allocation, data and spare capacity, before it is freed.
    fn release(inner: &mut Vec<T>) {
        inner.zeroize();

        #[cfg(test)]
        release_log::record(inner);
    }

    #[inline(always)]
    fn maybe_grow_to(&mut self, min_capacity: usize) {
        if self.capacity() >= min_capacity {
            return;
        }

        self.grow_to(min_capacity);
    }

    /// Appends a single element.
    pub fn push(&mut self, value: T) {
        self.maybe_grow_to(self.len() + 1);
        self.inner.push(value);
    }

    /// Appends a copy of every element of `src`.
    pub fn extend_from_slice(&mut self, src: &[T]) {
        self.maybe_grow_to(self.len() + src.len());
        self.inner.extend_from_slice(src);
    }

    /// Shortens the buffer to `new_len`, zeroizing the released slots.
    ///
    /// Has no effect if `new_len` is greater than or equal to the current length.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len() {
            return;
        }

        self.inner[new_len..].zeroize();
        self.inner.truncate(new_len);
    }

    /// Resizes the buffer to `new_len`.
    ///
    /// Shrinking zeroizes the released slots. Growing fills the new slots with
    /// zero.
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with_value(new_len, T::default());
    }

    /// Resizes the buffer to `new_len`, filling new slots with `value`.
    ///
    /// Shrinking zeroizes the released slots and ignores `value`.
    pub fn resize_with_value(&mut self, new_len: usize, value: T) {
        if new_len <= self.len() {
            self.truncate(new_len);
            return;
        }

        self.maybe_grow_to(new_len);
        self.inner.resize(new_len, value);
    }

    /// Removes all elements, zeroizing the whole allocation.
    ///
    /// Capacity is kept.
    pub fn clear(&mut self) {
        self.inner.zeroize();
    }

    /// Returns a slice containing the entire buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    /// Returns a mutable slice containing the entire buffer.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.inner
    }

    /// Returns every slot of the backing allocation, including spare capacity.
    ///
    /// Used by tests to observe that released slots were zeroized.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn raw_capacity(&self) -> &[T] {
        // SAFETY: every slot in [0, capacity) is initialized: [0, len) holds
        // live elements and [len, capacity) is zeroized on allocation and on
        // every release path.
        unsafe { core::slice::from_raw_parts(self.inner.as_ptr(), self.inner.capacity()) }
    }
}

impl<T> Default for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T> AsRef<[T]> for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    fn as_ref(&self) -> &[T] {
        &self.inner
    }
}

impl<T> AsMut<[T]> for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.inner
    }
}

impl<T> Zeroize for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    fn zeroize(&mut self) {
        self.clear();
    }
}

impl<T> Drop for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    fn drop(&mut self) {
        Self::release(&mut self.inner);
    }
}

impl<T> ZeroizeOnDrop for SecureBuffer<T> where T: DefaultIsZeroes {}

impl<T> core::fmt::Debug for SecureBuffer<T>
where
    T: DefaultIsZeroes,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecureBuffer")
            .field("data", &"REDACTED")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
