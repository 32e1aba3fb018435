//! Edit/commit bookkeeping shared by every settings domain.

/// A value with an in-memory edit and a committed snapshot.
///
/// Invariant: `!is_dirty()` implies `current() == committed()`. The dirty
/// flag is recomputed on every edit so reading it is O(1).
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    current: T,
    committed: T,
    dirty: bool,
}

impl<T: Clone + PartialEq> Tracked<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            committed: value,
            dirty: false,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mutate the in-memory value. An edit that leaves the value equal to
    /// the snapshot does not make it dirty.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.current);
        self.dirty = self.current != self.committed;
        result
    }

    /// Update derived state (not compared for equality) on both the edit and
    /// the snapshot. Never changes the dirty flag.
    pub fn refresh_derived<R>(&mut self, mut f: impl FnMut(&mut T) -> R) -> R {
        f(&mut self.committed);
        f(&mut self.current)
    }

    /// Replace both values, e.g. after loading. Always clean.
    pub fn reset(&mut self, value: T) {
        self.current = value.clone();
        self.committed = value;
        self.dirty = false;
    }

    pub fn commit(&mut self) {
        self.committed = self.current.clone();
        self.dirty = false;
    }

    pub fn revert(&mut self) {
        self.current = self.committed.clone();
        self.dirty = false;
    }
}

impl<T: Clone + PartialEq + Default> Default for Tracked<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
