//! An exclusively owned, fixed-length heap array of `T`.
//!
//! `OwningBuffer` holds either one heap-allocated slice or nothing at all. It
//! keeps no size or capacity bookkeeping of its own: the owner of the handle
//! decides how many of the slots are live and how many were requested.
//! Ownership is singular. The buffer can be moved or swapped, but never cloned,
//! and its storage is released when the handle goes out of scope.

use std::fmt;
use std::ops::{Index, IndexMut, Range};
use std::ptr;

use simvec_common::{ErrorKind, Result};

/// A single-owner handle over a contiguous heap array, or the empty sentinel.
pub struct OwningBuffer<T> {
    /// Owned slots. `None` is the empty sentinel and never holds an allocation.
    slots: Option<Box<[T]>>,
}

impl<T> OwningBuffer<T> {
    /// Creates the empty sentinel. Does not allocate.
    #[inline]
    pub const fn new() -> OwningBuffer<T> {
        OwningBuffer { slots: None }
    }

    /// Allocates `size` default-initialized slots.
    ///
    /// A zero `size` yields the empty sentinel without touching the allocator.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Allocation`] if the allocator cannot satisfy the
    /// request (including a request whose byte size overflows).
    pub fn create(size: usize) -> Result<OwningBuffer<T>>
    where
        T: Default,
    {
        Self::build(size, std::iter::repeat_with(T::default))
    }

    /// Allocates `size` slots, each holding a clone of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Allocation`] if the allocator cannot satisfy the request.
    pub fn filled(size: usize, value: &T) -> Result<OwningBuffer<T>>
    where
        T: Clone,
    {
        Self::build(size, std::iter::repeat_with(|| value.clone()))
    }

    /// Allocates `items.len()` slots holding clones of `items`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Allocation`] if the allocator cannot satisfy the request.
    pub fn cloned_from(items: &[T]) -> Result<OwningBuffer<T>>
    where
        T: Clone,
    {
        Self::build(items.len(), items.iter().cloned())
    }

    /// Adopts an existing boxed slice as owned storage.
    ///
    /// An empty slice becomes the empty sentinel.
    pub fn from_boxed(slots: Box<[T]>) -> OwningBuffer<T> {
        if slots.is_empty() {
            OwningBuffer::new()
        } else {
            OwningBuffer { slots: Some(slots) }
        }
    }

    /// Adopts a raw slice pointer as owned storage. A null pointer yields the
    /// empty sentinel.
    ///
    /// # Safety
    ///
    /// A non-null `raw` must have been produced by [`OwningBuffer::release`] (or
    /// `Box::<[T]>::into_raw`) and must not be owned by anything else.
    pub unsafe fn from_raw(raw: *mut [T]) -> OwningBuffer<T> {
        if raw.is_null() {
            return OwningBuffer::new();
        }
        let slots = unsafe { Box::from_raw(raw) };
        OwningBuffer::from_boxed(slots)
    }

    /// Relinquishes ownership and returns the raw slice pointer, leaving this
    /// handle empty. Returns a null pointer for the empty sentinel.
    ///
    /// The caller becomes responsible for releasing the storage, typically by
    /// handing it back to [`OwningBuffer::from_raw`].
    #[must_use]
    pub fn release(&mut self) -> *mut [T] {
        match self.slots.take() {
            Some(slots) => Box::into_raw(slots),
            None => ptr::slice_from_raw_parts_mut(ptr::null_mut(), 0),
        }
    }

    /// Relinquishes ownership as a boxed slice, leaving this handle empty.
    pub fn into_boxed(mut self) -> Option<Box<[T]>> {
        self.slots.take()
    }

    /// Returns `true` if the handle holds storage.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.slots.is_some()
    }

    /// Number of slots in the owned allocation (zero for the sentinel).
    ///
    /// Intended for invariant checks by the owner; the owner remains
    /// responsible for knowing how many slots it asked for.
    #[inline]
    pub fn allocated_len(&self) -> usize {
        self.slots.as_deref().map_or(0, <[T]>::len)
    }

    /// Raw pointer to the first slot, or null for the sentinel.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.slots.as_deref().map_or(ptr::null(), <[T]>::as_ptr)
    }

    /// Mutable raw pointer to the first slot, or null for the sentinel.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.slots
            .as_deref_mut()
            .map_or(ptr::null_mut(), <[T]>::as_mut_ptr)
    }

    /// All allocated slots.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.slots.as_deref().unwrap_or(&[])
    }

    /// All allocated slots, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.slots.as_deref_mut().unwrap_or(&mut [])
    }

    /// Exchanges the owned storage of two handles. Never allocates, never fails.
    #[inline]
    pub fn swap(&mut self, other: &mut OwningBuffer<T>) {
        std::mem::swap(&mut self.slots, &mut other.slots);
    }

    /// Moves the storage out into a new handle, leaving this one empty.
    #[inline]
    pub fn take(&mut self) -> OwningBuffer<T> {
        OwningBuffer {
            slots: self.slots.take(),
        }
    }

    /// Moves the values in `src_range` of `src` into this buffer starting at
    /// `dst_start`.
    ///
    /// The source slots receive the values previously held by the destination
    /// slots, so nothing is dropped or duplicated.
    ///
    /// # Panics
    ///
    /// Panics if either range falls outside its allocation.
    pub fn move_range_from(
        &mut self,
        src: &mut OwningBuffer<T>,
        src_range: Range<usize>,
        dst_start: usize,
    ) {
        let len = src_range.len();
        self.as_mut_slice()[dst_start..dst_start + len]
            .swap_with_slice(&mut src.as_mut_slice()[src_range]);
    }

    /// Overwrites the slots starting at `dst_start` with clones of the values
    /// in `src_range` of `src`. The source is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if either range falls outside its allocation. A panicking
    /// `clone` leaves the slots before the failing one already overwritten.
    pub fn clone_range_from(
        &mut self,
        src: &OwningBuffer<T>,
        src_range: Range<usize>,
        dst_start: usize,
    ) where
        T: Clone,
    {
        let len = src_range.len();
        self.as_mut_slice()[dst_start..dst_start + len]
            .clone_from_slice(&src.as_slice()[src_range]);
    }

    /// Moves every value in `range` one slot toward the end of the buffer.
    ///
    /// The value held in slot `range.end` before the call ends up in slot
    /// `range.start`, so the shift never overwrites a value it has not moved yet.
    ///
    /// # Panics
    ///
    /// Panics if `range.end` is not a valid slot.
    pub fn shift_right(&mut self, range: Range<usize>) {
        self.as_mut_slice()[range.start..=range.end].rotate_right(1);
    }

    /// Moves every value in `range.start + 1..range.end` one slot toward the
    /// beginning of the buffer.
    ///
    /// The value held in slot `range.start` before the call ends up in slot
    /// `range.end - 1`.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or falls outside the allocation.
    pub fn shift_left(&mut self, range: Range<usize>) {
        self.as_mut_slice()[range].rotate_left(1);
    }

    /// Overwrites every slot in `range` with a default value.
    pub fn fill_default(&mut self, range: Range<usize>)
    where
        T: Default,
    {
        self.as_mut_slice()[range].fill_with(T::default);
    }

    /// Allocates exactly `size` slots and fills them from `values`.
    fn build(size: usize, values: impl Iterator<Item = T>) -> Result<OwningBuffer<T>> {
        if size == 0 {
            return Ok(OwningBuffer::new());
        }
        let mut slots = Vec::new();
        if let Err(e) = slots.try_reserve_exact(size) {
            log::debug!(
                "allocation of {size} slots ({} bytes each) refused: {e}",
                std::mem::size_of::<T>()
            );
            return Err(ErrorKind::allocation_from::<T>(size, e).into());
        }
        slots.extend(values.take(size));
        debug_assert_eq!(slots.len(), size);
        Ok(OwningBuffer {
            slots: Some(slots.into_boxed_slice()),
        })
    }
}

impl<T> Default for OwningBuffer<T> {
    fn default() -> Self {
        OwningBuffer::new()
    }
}

impl<T> Index<usize> for OwningBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for OwningBuffer<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for OwningBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwningBuffer")
            .field("slots", &self.as_slice())
            .finish()
    }
}
