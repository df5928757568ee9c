//! The growable array and its capacity management.

use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut};

use simvec_common::{Error, Result, contract, result::verify_index};
use simvec_owning_buffer::OwningBuffer;

use crate::reserve_hint::ReserveHint;

/// A heap-backed growable array.
///
/// `DynamicArray` owns exactly one [`OwningBuffer`] together with the number
/// of live elements (`size`) and the number of allocated slots (`capacity`).
/// Slots past `size` always hold initialized values (defaults or stale
/// elements), so no uninitialized memory is ever reachable.
///
/// # Growth
///
/// - [`push_back`](Self::push_back) and [`insert`](Self::insert) double the
///   capacity when full (`0` grows to `1`), giving amortized O(1) appends.
/// - [`resize`](Self::resize) and [`reserve`](Self::reserve) grow to exactly the
///   requested length.
///
/// Every growth path builds the new buffer first, moves the live elements
/// into it and only then drops the old one. If the allocator refuses the
/// request the array is left exactly as it was.
///
/// # Positions
///
/// `insert` and `erase` take and return element positions as plain offsets
/// into the live range. Borrowed iterators and slices are tied to the array
/// by lifetime, so they cannot outlive a reallocation.
///
/// # Examples
///
/// ```
/// use simvec::{DynamicArray, dynamic_array};
///
/// let mut a = dynamic_array![1, 2, 3];
/// assert_eq!((a.size(), a.capacity()), (3, 3));
///
/// a.push_back(4)?;
/// assert_eq!((a.size(), a.capacity()), (4, 6));
///
/// let next = a.erase(1);
/// assert_eq!(a[next], 3);
///
/// let mut b = DynamicArray::new();
/// for v in [1, 3, 4] {
///     b.push_back(v)?;
/// }
/// assert_eq!(a, b);
/// # Ok::<(), simvec_common::Error>(())
/// ```
pub struct DynamicArray<T> {
    /// Number of live elements, always `<= capacity`.
    size: usize,
    /// Number of allocated slots. The buffer holds exactly this many.
    capacity: usize,
    buffer: OwningBuffer<T>,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array without allocating.
    #[inline]
    pub const fn new() -> DynamicArray<T> {
        DynamicArray {
            size: 0,
            capacity: 0,
            buffer: OwningBuffer::new(),
        }
    }

    /// Creates an array holding a copy of every element of `items`, in order.
    ///
    /// The resulting capacity equals `items.len()`; an empty list does not
    /// allocate.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn from_slice(items: &[T]) -> Result<DynamicArray<T>>
    where
        T: Clone,
    {
        let buffer = OwningBuffer::cloned_from(items)?;
        Ok(DynamicArray::from_parts(buffer, items.len(), items.len()))
    }

    /// Creates an array of `size` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn from_value(size: usize, value: &T) -> Result<DynamicArray<T>>
    where
        T: Clone,
    {
        let buffer = OwningBuffer::filled(size, value)?;
        Ok(DynamicArray::from_parts(buffer, size, size))
    }

    /// Number of live elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer.as_slice()[..self.size]
    }

    /// The live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let size = self.size;
        &mut self.buffer.as_mut_slice()[..size]
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error if `index >= size()`.
    pub fn at(&self, index: usize) -> Result<&T> {
        verify_index(index, self.size)?;
        Ok(&self.buffer[index])
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an out-of-range error if `index >= size()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index(index, self.size)?;
        Ok(&mut self.buffer[index])
    }

    /// Returns a reference to the element at `index` without any bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `size()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        contract!(index < self.size, "index {index} out of bounds for size {}", self.size);
        unsafe { self.buffer.as_slice().get_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index` without any bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `size()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        contract!(index < self.size, "index {index} out of bounds for size {}", self.size);
        unsafe { self.buffer.as_mut_slice().get_unchecked_mut(index) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Sets the size to zero. Capacity and storage are kept for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Removes the last element from the live range.
    ///
    /// The array must not be empty. The slot keeps its value until it is
    /// overwritten or the storage is released.
    pub fn pop_back(&mut self) {
        contract!(self.size != 0, "pop_back on an empty array");
        self.size = self.size.saturating_sub(1);
    }

    /// Removes the element at `position`, shifting every following element one
    /// slot toward the beginning.
    ///
    /// `position` must be less than `size()`. Returns the position that now
    /// holds the element which followed the erased one (equal to `size()` when
    /// the last element was erased).
    pub fn erase(&mut self, position: usize) -> usize {
        contract!(
            position < self.size,
            "erase position {position} out of bounds for size {}",
            self.size
        );
        self.buffer.shift_left(position..self.size);
        self.size -= 1;
        self.debug_check_invariants();
        position
    }

    /// Exchanges storage, size and capacity with `other`. Never fails.
    #[inline]
    pub fn swap(&mut self, other: &mut DynamicArray<T>) {
        self.buffer.swap(&mut other.buffer);
        std::mem::swap(&mut self.size, &mut other.size);
        std::mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Moves the contents out into a new array, leaving this one empty with
    /// zero capacity.
    pub fn take(&mut self) -> DynamicArray<T> {
        let mut moved = DynamicArray::new();
        self.swap(&mut moved);
        moved
    }

    /// Move assignment: takes over the contents of `source`, leaving it empty
    /// with zero capacity. The previous contents of `self` are released.
    pub fn assign_from(&mut self, source: &mut DynamicArray<T>) {
        let mut moved = source.take();
        self.swap(&mut moved);
    }

    pub(crate) fn from_parts(
        buffer: OwningBuffer<T>,
        size: usize,
        capacity: usize,
    ) -> DynamicArray<T> {
        let array = DynamicArray {
            size,
            capacity,
            buffer,
        };
        array.debug_check_invariants();
        array
    }

    pub(crate) fn into_buffer(self) -> OwningBuffer<T> {
        self.buffer
    }

    /// Installs `grown` as the new storage. The old buffer is released when
    /// it falls out of scope here.
    fn replace_buffer(&mut self, mut grown: OwningBuffer<T>, capacity: usize, policy: Growth) {
        log::trace!(
            "DynamicArray: reallocating {} -> {capacity} slots ({policy}), {} live",
            self.capacity,
            self.size
        );
        self.buffer.swap(&mut grown);
        self.capacity = capacity;
    }

    #[inline]
    fn debug_check_invariants(&self) {
        debug_assert!(self.size <= self.capacity);
        debug_assert_eq!(self.buffer.allocated_len(), self.capacity);
    }
}

impl<T: Default> DynamicArray<T> {
    /// Creates an array of `size` default values, with capacity `size`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn with_len(size: usize) -> Result<DynamicArray<T>> {
        let buffer = OwningBuffer::create(size)?;
        Ok(DynamicArray::from_parts(buffer, size, size))
    }

    /// Creates an empty array with the hinted capacity already allocated.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn with_capacity_hint(hint: ReserveHint) -> Result<DynamicArray<T>> {
        let capacity = hint.capacity();
        let buffer = OwningBuffer::create(capacity)?;
        Ok(DynamicArray::from_parts(buffer, 0, capacity))
    }

    /// Changes the number of live elements to `new_size`.
    ///
    /// Shrinking only lowers the size. Growing within capacity writes default
    /// values into the new slots. Growing past capacity reallocates to exactly
    /// `new_size` slots.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if reallocation fails; the array is unchanged.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        if new_size <= self.size {
            self.size = new_size;
        } else if new_size <= self.capacity {
            self.buffer.fill_default(self.size..new_size);
            self.size = new_size;
        } else {
            self.grow_to(new_size, Growth::ExactFit)?;
            self.size = new_size;
        }
        self.debug_check_invariants();
        Ok(())
    }

    /// Ensures the capacity is at least `new_capacity`, reallocating to exactly
    /// that many slots when it is not. The size is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if reallocation fails; the array is unchanged.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.capacity {
            self.grow_to(new_capacity, Growth::ExactFit)?;
        }
        Ok(())
    }

    /// Appends `value`, doubling the capacity first if the array is full.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth fails; the array is unchanged and
    /// `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<()> {
        if self.size == self.capacity {
            let capacity = doubled_capacity(self.capacity, self.size + 1)?;
            self.grow_to(capacity, Growth::Doubling)?;
        }
        self.buffer[self.size] = value;
        self.size += 1;
        Ok(())
    }

    /// Appends a clone of `value`.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth fails; the array is unchanged.
    pub fn push_back_cloned(&mut self, value: &T) -> Result<()>
    where
        T: Clone,
    {
        self.push_back(value.clone())
    }

    /// Inserts `value` at `position`, shifting the elements at and after it one
    /// slot toward the end. Doubles the capacity first if the array is full.
    ///
    /// `position` must be at most `size()`; inserting at `size()` appends.
    /// Returns the position of the inserted element.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth fails; the array is unchanged.
    pub fn insert(&mut self, position: usize, value: T) -> Result<usize> {
        contract!(
            position <= self.size,
            "insert position {position} out of bounds for size {}",
            self.size
        );
        if self.size == self.capacity {
            let capacity = doubled_capacity(self.capacity, self.size + 1)?;
            self.grow_to(capacity, Growth::Doubling)?;
        }
        self.buffer.shift_right(position..self.size);
        self.buffer[position] = value;
        self.size += 1;
        self.debug_check_invariants();
        Ok(position)
    }

    /// Inserts a clone of `value` at `position`. See [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth fails; the array is unchanged.
    pub fn insert_cloned(&mut self, position: usize, value: &T) -> Result<usize>
    where
        T: Clone,
    {
        self.insert(position, value.clone())
    }

    /// Reallocates to exactly `capacity` default-filled slots and moves the
    /// live elements over.
    fn grow_to(&mut self, capacity: usize, policy: Growth) -> Result<()> {
        debug_assert!(capacity > self.capacity);
        let mut grown = OwningBuffer::create(capacity)?;
        grown.move_range_from(&mut self.buffer, 0..self.size, 0);
        self.replace_buffer(grown, capacity, policy);
        self.debug_check_invariants();
        Ok(())
    }
}

impl<T: Default + Clone> DynamicArray<T> {
    /// Appends clones of every live element of `other`, in order.
    ///
    /// The capacity grows the same way a sequence of
    /// [`push_back`](Self::push_back) calls would grow it.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if growth fails; the array is unchanged.
    pub fn append_cloned(&mut self, other: &DynamicArray<T>) -> Result<()> {
        let required = self
            .size
            .checked_add(other.size)
            .ok_or_else(|| Error::capacity_overflow(self.capacity, usize::MAX))?;
        if required > self.capacity {
            let capacity = doubled_capacity(self.capacity, required)?;
            self.grow_to(capacity, Growth::Doubling)?;
        }
        self.buffer.clone_range_from(&other.buffer, 0..other.size, self.size);
        self.size = required;
        self.debug_check_invariants();
        Ok(())
    }
}

impl<T: Clone> DynamicArray<T> {
    /// Copy construction: a deep copy of the live elements whose capacity
    /// equals this array's size.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the storage cannot be obtained.
    pub fn try_clone(&self) -> Result<DynamicArray<T>> {
        DynamicArray::from_slice(self.as_slice())
    }

    /// Copy assignment: replaces the contents with a copy of `source`.
    ///
    /// The copy is built before anything in `self` changes, so on failure
    /// `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an allocation error if the copy cannot be allocated.
    pub fn assign(&mut self, source: &DynamicArray<T>) -> Result<()> {
        let mut copy = source.try_clone()?;
        self.swap(&mut copy);
        Ok(())
    }
}

/// Smallest capacity of the doubling sequence `current, 2 * current, ...`
/// (starting from `1` when `current` is zero) that holds `required` slots.
///
/// Fails with a capacity-overflow error instead of wrapping when the next
/// step no longer fits in `usize`.
pub(crate) fn doubled_capacity(current: usize, required: usize) -> Result<usize> {
    let mut capacity = current.max(1);
    while capacity < required {
        capacity = capacity
            .checked_mul(2)
            .ok_or_else(|| Error::capacity_overflow(current, required))?;
    }
    Ok(capacity)
}

/// Reallocation policy, reported in trace logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Growth {
    Doubling,
    ExactFit,
}

impl fmt::Display for Growth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Growth::Doubling => f.write_str("doubling"),
            Growth::ExactFit => f.write_str("exact fit"),
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        DynamicArray::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let buffer = OwningBuffer::from_boxed(self.as_slice().into());
        DynamicArray::from_parts(buffer, self.size, self.size)
    }

    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<T: Default> TryFrom<ReserveHint> for DynamicArray<T> {
    type Error = Error;

    fn try_from(hint: ReserveHint) -> Result<Self> {
        DynamicArray::with_capacity_hint(hint)
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

/// Unchecked element access.
///
/// The `index < size()` contract is asserted only in debug builds (or with
/// the `strict-contracts` feature). A violation in release builds may yield
/// a stale slot within capacity, and panics past the allocation.
impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        contract!(index < self.size, "index {index} out of bounds for size {}", self.size);
        &self.buffer[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        contract!(index < self.size, "index {index} out of bounds for size {}", self.size);
        &mut self.buffer[index]
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DynamicArray").field(&self.as_slice()).finish()
    }
}
