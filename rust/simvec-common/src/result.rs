pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Succeeds when `index` addresses one of the `size` live elements.
#[inline]
pub fn verify_index(index: usize, size: usize) -> Result<()> {
    if index < size {
        Ok(())
    } else {
        out_of_range(index, size)
    }
}

#[cold]
pub fn out_of_range(index: usize, size: usize) -> Result<()> {
    Err(crate::error::Error::out_of_range(index, size))
}
