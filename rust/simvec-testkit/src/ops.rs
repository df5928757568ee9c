//! Randomized operation sequences for model-based container tests.
//!
//! A test generates a seeded sequence of [`ArrayOp`]s, applies each one to
//! the container under test and to a `Vec` model, and compares the two after
//! every step. Positions are carried as raw seeds and reduced against the
//! current length by [`ArrayOp::position`], so every generated sequence is
//! valid regardless of how the length evolves.

/// A single mutating operation on a growable array of `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOp {
    PushBack(u32),
    PopBack,
    Insert { position_seed: usize, value: u32 },
    Erase { position_seed: usize },
    Resize(usize),
    Reserve(usize),
    Clear,
    /// Replace the array with a copy of itself.
    CloneAssign,
    /// Move the array out and back in.
    MoveAssign,
}

impl ArrayOp {
    /// Reduces a position seed to an index in `0..=len` (for insertion) or
    /// `0..len` (for erasure).
    pub fn position(seed: usize, len: usize, inclusive_end: bool) -> usize {
        let span = if inclusive_end { len + 1 } else { len };
        if span == 0 { 0 } else { seed % span }
    }
}

/// Generates `count` operations from the given seed.
///
/// Sizes passed to `Resize` and `Reserve` stay below `max_len` so a sequence
/// never asks for an unreasonable amount of memory.
pub fn random_ops(seed: u64, count: usize, max_len: usize) -> Vec<ArrayOp> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let max_len = max_len.max(1);
    (0..count)
        .map(|_| match rng.u8(0..20) {
            0..=6 => ArrayOp::PushBack(rng.u32(..)),
            7..=8 => ArrayOp::PopBack,
            9..=11 => ArrayOp::Insert {
                position_seed: rng.usize(..),
                value: rng.u32(..),
            },
            12..=13 => ArrayOp::Erase {
                position_seed: rng.usize(..),
            },
            14 => ArrayOp::Resize(rng.usize(0..max_len)),
            15 => ArrayOp::Reserve(rng.usize(0..max_len)),
            16 => ArrayOp::Clear,
            17..=18 => ArrayOp::CloneAssign,
            _ => ArrayOp::MoveAssign,
        })
        .collect()
}
