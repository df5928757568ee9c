use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn out_of_range(index: usize, size: usize) -> Error {
        Error(ErrorKind::OutOfRange { index, size }.into())
    }

    /// Growing past `capacity` to hold `required` elements would overflow `usize`.
    pub fn capacity_overflow(capacity: usize, required: usize) -> Error {
        Error(ErrorKind::CapacityOverflow { capacity, required }.into())
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange { .. })
    }

    /// `true` for any failure to obtain storage, including a capacity
    /// computation that overflowed before the allocator was asked.
    pub fn is_allocation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Allocation { .. } | ErrorKind::CapacityOverflow { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("index {index} is out of range for size {size}")]
    OutOfRange { index: usize, size: usize },

    #[error("failed to allocate {requested} slots of {element_size} bytes")]
    Allocation {
        requested: usize,
        element_size: usize,
        #[source]
        source: Option<TryReserveError>,
    },

    #[error("capacity {capacity} cannot grow to hold {required} elements without overflow")]
    CapacityOverflow { capacity: usize, required: usize },
}

impl ErrorKind {
    pub fn allocation_from<T>(requested: usize, source: TryReserveError) -> ErrorKind {
        ErrorKind::Allocation {
            requested,
            element_size: std::mem::size_of::<T>(),
            source: Some(source),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message() {
        let e = Error::out_of_range(5, 3);
        assert!(e.is_out_of_range());
        assert!(!e.is_allocation());
        assert_eq!(e.to_string(), "index 5 is out of range for size 3");
    }

    #[test]
    fn allocation_from_try_reserve() {
        let source = Vec::<u64>::new()
            .try_reserve_exact(usize::MAX)
            .expect_err("must overflow");
        let e: Error = ErrorKind::allocation_from::<u64>(usize::MAX, source).into();
        assert!(e.is_allocation());
        match e.into_kind() {
            ErrorKind::Allocation {
                requested,
                element_size,
                source,
            } => {
                assert_eq!(requested, usize::MAX);
                assert_eq!(element_size, 8);
                assert!(source.is_some());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn capacity_overflow_counts_as_allocation_failure() {
        let e = Error::capacity_overflow(usize::MAX / 2 + 1, usize::MAX / 2 + 2);
        assert!(e.is_allocation());
        assert!(!e.is_out_of_range());
        assert!(matches!(
            e.kind(),
            ErrorKind::CapacityOverflow { capacity, .. } if *capacity == usize::MAX / 2 + 1
        ));
        assert!(e.to_string().ends_with("without overflow"));
    }
}
