//! Conversions into and out of `DynamicArray`.

use simvec_owning_buffer::OwningBuffer;

use crate::DynamicArray;

impl<T> DynamicArray<T> {
    /// Builds an array that adopts `slots` as its storage, every slot live.
    fn from_boxed(slots: Box<[T]>) -> DynamicArray<T> {
        let len = slots.len();
        DynamicArray::from_parts(OwningBuffer::from_boxed(slots), len, len)
    }

    /// Consumes the array, returning the live elements as a `Vec`.
    ///
    /// Slots past the size are dropped.
    pub fn into_vec(self) -> Vec<T> {
        let size = self.size();
        let mut items = self.into_buffer().into_boxed().map_or_else(Vec::new, Vec::from);
        items.truncate(size);
        items
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        DynamicArray::from_boxed(Box::new(items))
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        DynamicArray::from_boxed(items.into_boxed_slice())
    }
}

impl<T> From<DynamicArray<T>> for Vec<T> {
    fn from(array: DynamicArray<T>) -> Self {
        array.into_vec()
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        DynamicArray::from(iter.into_iter().collect::<Vec<T>>())
    }
}

/// Appends every item with [`DynamicArray::push_back`], so the capacity
/// follows the doubling policy.
///
/// # Panics
///
/// `Extend` cannot report errors, so a failed growth panics, as it does for
/// `Vec`. Call `push_back` directly to handle allocation failures.
impl<T: Default> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if let Err(e) = self.push_back(item) {
                panic!("DynamicArray::extend: {e}");
            }
        }
    }
}

impl<'a, T: Copy + Default + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        <Self as Extend<T>>::extend(self, iter.into_iter().copied());
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// By-value iteration over the live elements.
impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}
