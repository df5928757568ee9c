/// Creates a [`DynamicArray`](crate::DynamicArray) from a literal element list.
///
/// Size and capacity both equal the number of elements.
///
/// ```
/// use simvec::dynamic_array;
///
/// let a = dynamic_array![1, 2, 3];
/// assert_eq!(a.size(), 3);
/// assert_eq!(a.capacity(), 3);
///
/// let empty: simvec::DynamicArray<u8> = dynamic_array![];
/// assert_eq!(empty.capacity(), 0);
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($item),+])
    };
}
