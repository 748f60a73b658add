//! SlotVec: structural layer with index-stable slots and tombstones.
//!
//! Removal only flags a slot; indices never shift until `compact` runs.

use crate::errors::{CollectorError, Result};

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    removed: bool,
}

#[derive(Debug, Clone)]
pub struct SlotVec<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for SlotVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over every slot, tombstones included.
pub struct Iter<'a, T> {
    it: core::iter::Enumerate<core::slice::Iter<'a, Slot<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T, bool);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(i, s)| (i, &s.value, s.removed))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

/// Iterator over live (non-removed) slots in index order.
pub struct IterLive<'a, T> {
    it: core::iter::Enumerate<core::slice::Iter<'a, Slot<T>>>,
}

impl<'a, T> Iterator for IterLive<'a, T> {
    type Item = (usize, &'a T);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .by_ref()
            .find(|(_, s)| !s.removed)
            .map(|(i, s)| (i, &s.value))
    }
}

impl<T> SlotVec<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Total slot count, tombstones included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.removed).count()
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(CollectorError::OutOfBounds {
                index,
                size: self.slots.len(),
            })
        }
    }

    /// Append a live slot and return its index.
    pub fn push(&mut self, value: T) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot {
            value,
            removed: false,
        });
        index
    }

    /// Flag the slot at `index` as removed. A second removal is rejected
    /// and leaves the slot untouched.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.check(index)?;
        let slot = &mut self.slots[index];
        if slot.removed {
            return Err(CollectorError::AlreadyRemoved(index));
        }
        slot.removed = true;
        Ok(())
    }

    /// Replace the value at `index` in place, clearing its removed flag.
    /// Returns the previous value.
    pub fn replace(&mut self, index: usize, value: T) -> Result<T> {
        self.check(index)?;
        let slot = &mut self.slots[index];
        slot.removed = false;
        Ok(core::mem::replace(&mut slot.value, value))
    }

    /// Value at `index` regardless of its removed flag.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check(index)?;
        Ok(&self.slots[index].value)
    }

    pub fn is_removed(&self, index: usize) -> Result<bool> {
        self.check(index)?;
        Ok(self.slots[index].removed)
    }

    /// Drop every removed slot, renumbering survivors contiguously in their
    /// relative order. Returns how many slots were purged.
    pub fn compact(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| !s.removed);
        before - self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            it: self.slots.iter().enumerate(),
        }
    }

    pub fn iter_live(&self) -> IterLive<'_, T> {
        IterLive {
            it: self.slots.iter().enumerate(),
        }
    }
}

impl<T> FromIterator<T> for SlotVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            slots: iter
                .into_iter()
                .map(|value| Slot {
                    value,
                    removed: false,
                })
                .collect(),
        }
    }
}
