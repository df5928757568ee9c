//! Element types that count their own live instances.
//!
//! Every [`Tracked`] value registers itself in a thread-local counter when it
//! is created (by `new`, `Default` or `Clone`) and unregisters when dropped.
//! A [`LiveScope`] snapshots the counter so a test can assert that a block of
//! container operations neither leaked nor released anything twice.

use std::cell::Cell;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
}

fn register() {
    LIVE.with(|live| live.set(live.get() + 1));
}

fn unregister() {
    LIVE.with(|live| live.set(live.get() - 1));
    DROPS.with(|drops| drops.set(drops.get() + 1));
}

/// A value wrapper that is counted while alive.
pub struct Tracked<T> {
    value: T,
}

impl<T> Tracked<T> {
    pub fn new(value: T) -> Tracked<T> {
        register();
        Tracked { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
    }
}

impl<T: Default> Default for Tracked<T> {
    fn default() -> Self {
        Tracked::new(T::default())
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        Tracked::new(self.value.clone())
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        unregister();
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Tracked<T> {}

impl<T: PartialOrd> PartialOrd for Tracked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T: Ord> Ord for Tracked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T: Hash> Hash for Tracked<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state)
    }
}

/// A snapshot of the thread-local live and drop counters.
#[derive(Debug, Clone, Copy)]
pub struct LiveScope {
    live_at_start: isize,
    drops_at_start: usize,
}

impl LiveScope {
    pub fn begin() -> LiveScope {
        LiveScope {
            live_at_start: LIVE.with(Cell::get),
            drops_at_start: DROPS.with(Cell::get),
        }
    }

    /// Number of `Tracked` values created since the scope began and still alive.
    pub fn live(&self) -> isize {
        LIVE.with(Cell::get) - self.live_at_start
    }

    /// Number of `Tracked` values dropped since the scope began.
    pub fn drops(&self) -> usize {
        DROPS.with(Cell::get) - self.drops_at_start
    }

    /// Asserts that every value created inside the scope has been dropped
    /// exactly once.
    ///
    /// # Panics
    ///
    /// Panics if values leaked (positive balance) or were dropped more often
    /// than created (negative balance).
    pub fn assert_balanced(&self) {
        let live = self.live();
        assert_eq!(live, 0, "unbalanced Tracked instances: {live}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_create_clone_drop() {
        let scope = LiveScope::begin();
        let a = Tracked::new(1);
        let b = a.clone();
        let c = Tracked::<i32>::default();
        assert_eq!(scope.live(), 3);
        assert_eq!(*b.get(), 1);
        assert_eq!(*c.get(), 0);
        drop(a);
        assert_eq!(scope.live(), 2);
        assert_eq!(scope.drops(), 1);
        drop((b, c));
        scope.assert_balanced();
    }

    #[test]
    fn compares_by_value() {
        let scope = LiveScope::begin();
        {
            let mut a = Tracked::new(1);
            let b = Tracked::new(2);
            assert!(a < b);
            a.set(2);
            assert_eq!(a, b);
        }
        scope.assert_balanced();
    }

    #[test]
    #[should_panic(expected = "unbalanced")]
    fn detects_leak() {
        let scope = LiveScope::begin();
        std::mem::forget(Tracked::new(5));
        scope.assert_balanced();
    }
}
