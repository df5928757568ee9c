//! Capacity hints for constructing an array with storage set aside up front.

/// A request to construct an empty [`DynamicArray`](crate::DynamicArray)
/// with room for `capacity` elements.
///
/// Produced by [`reserve`] and consumed by
/// [`DynamicArray::with_capacity_hint`](crate::DynamicArray::with_capacity_hint)
/// or `DynamicArray::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReserveHint {
    capacity: usize,
}

impl ReserveHint {
    #[inline]
    pub const fn new(capacity: usize) -> ReserveHint {
        ReserveHint { capacity }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Returns a hint requesting `capacity` slots for a new array.
///
/// ```
/// use simvec::{DynamicArray, reserve};
///
/// let a = DynamicArray::<u32>::try_from(reserve(16))?;
/// assert!(a.is_empty());
/// assert_eq!(a.capacity(), 16);
/// # Ok::<(), simvec_common::Error>(())
/// ```
#[inline]
pub const fn reserve(capacity: usize) -> ReserveHint {
    ReserveHint::new(capacity)
}
