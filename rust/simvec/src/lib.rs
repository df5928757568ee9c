//! A heap-backed growable array built on a single-owner buffer.
//!
//! [`DynamicArray`] tracks a live-element count and an allocated-slot count
//! over one [`OwningBuffer`](simvec_owning_buffer::OwningBuffer). All
//! reallocation goes through the buffer's allocate, move-range and swap
//! primitives, and a failed allocation leaves the array untouched.
//!
//! Fallible operations return [`simvec_common::Result`]: checked access
//! reports out-of-range indices, and every growth path reports allocator
//! failure. Unchecked indexing, `pop_back` on an empty array, and positions
//! outside the live range are caller contract violations, asserted in debug
//! builds or with the `strict-contracts` feature.

pub mod compare;
pub mod dynamic_array;
pub mod iter;
pub mod macros;
pub mod reserve_hint;

pub use dynamic_array::DynamicArray;
pub use reserve_hint::{ReserveHint, reserve};
