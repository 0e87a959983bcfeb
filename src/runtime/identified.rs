//! Ordered, duplicate-free collection keyed by a stable identity.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use thiserror::Error;

/// Slots below this count are never compacted.
const COMPACT_MIN_SLOTS: usize = 16;

/// A value carrying an identifier that never changes for its lifetime.
pub trait Identifiable {
    type Id: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifiedError {
    #[error("identifier {id} is already present in the collection")]
    Duplicate { id: String },
}

/// Insertion-ordered collection with O(1) lookup and removal by id.
///
/// Removal leaves a tombstone so the relative order of the remaining
/// elements is untouched; tombstones are compacted once they outnumber the
/// live elements.
#[derive(Clone)]
pub struct IdentifiedVec<T: Identifiable> {
    slots: Vec<Option<T>>,
    index: HashMap<T::Id, usize>,
    /// Id order as of the last structural change; cleared by every
    /// push, insert or removal.
    snapshot: Option<Arc<[T::Id]>>,
}

impl<T: Identifiable> IdentifiedVec<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            index: HashMap::new(),
            snapshot: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            snapshot: None,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        let slot = *self.index.get(id)?;
        self.slots[slot].as_ref()
    }

    /// Mutable access to an element. The element's id must not change.
    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        let slot = *self.index.get(id)?;
        self.slots[slot].as_mut()
    }

    /// Apply `mutate` to the element with `id`, if present.
    pub fn update<R>(&mut self, id: &T::Id, mutate: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.get_mut(id).map(mutate)
    }

    /// Append an element.
    ///
    /// # Errors
    /// Returns [`IdentifiedError::Duplicate`] if the id is already present;
    /// the collection is left unchanged.
    pub fn try_push(&mut self, element: T) -> Result<(), IdentifiedError> {
        if self.index.contains_key(element.id()) {
            return Err(IdentifiedError::Duplicate {
                id: format!("{:?}", element.id()),
            });
        }
        self.index.insert(element.id().clone(), self.slots.len());
        self.slots.push(Some(element));
        self.snapshot = None;
        Ok(())
    }

    /// Append an element.
    ///
    /// # Panics
    /// Panics if the id is already present. Duplicate ids are a caller bug.
    pub fn push(&mut self, element: T) {
        if let Err(err) = self.try_push(element) {
            panic!("{}", err);
        }
    }

    /// Insert an element at `position` among the live elements.
    ///
    /// # Panics
    /// Panics if `position > len` or the id is already present.
    pub fn insert(&mut self, position: usize, element: T) {
        assert!(
            position <= self.len(),
            "insert position {} out of bounds (len {})",
            position,
            self.len()
        );
        assert!(
            !self.index.contains_key(element.id()),
            "identifier {:?} is already present in the collection",
            element.id()
        );

        self.compact();
        self.snapshot = None;
        self.index.insert(element.id().clone(), position);
        self.slots.insert(position, Some(element));
        self.reindex_from(position + 1);
    }

    /// Remove the element with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let slot = self.index.remove(id)?;
        let removed = self.slots[slot].take();
        self.snapshot = None;

        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
        if self.slots.len() > COMPACT_MIN_SLOTS && self.slots.len() > 2 * self.index.len() {
            self.compact();
        }
        removed
    }

    /// Keep only the elements for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.slots
            .retain(|slot| matches!(slot, Some(element) if keep(element)));
        self.index.clear();
        self.reindex_from(0);
        self.snapshot = None;
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.snapshot = None;
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = &T::Id> + '_ {
        self.iter().map(Identifiable::id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Mutable iteration in order. Element ids must not change.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    pub fn first(&self) -> Option<&T> {
        self.iter().next()
    }

    pub fn last(&self) -> Option<&T> {
        self.iter().next_back()
    }

    /// Shared copy of the current id order, rebuilt only after a structural
    /// change. Clones of an unchanged collection share the same snapshot.
    pub(crate) fn id_snapshot(&mut self) -> Arc<[T::Id]> {
        if let Some(snapshot) = &self.snapshot {
            return Arc::clone(snapshot);
        }
        let snapshot: Arc<[T::Id]> = self.ids().cloned().collect();
        self.snapshot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Whether no element was added or removed since `snapshot` was taken.
    pub(crate) fn is_unchanged_since(&self, snapshot: &Arc<[T::Id]>) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, snapshot))
    }

    fn compact(&mut self) {
        if self.slots.len() == self.index.len() {
            return;
        }
        self.slots.retain(Option::is_some);
        self.reindex_from(0);
    }

    fn reindex_from(&mut self, start: usize) {
        for (slot, element) in self.slots.iter().enumerate().skip(start) {
            if let Some(element) = element {
                self.index.insert(element.id().clone(), slot);
            }
        }
    }
}

impl<T: Identifiable> Default for IdentifiedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable + PartialEq> PartialEq for IdentifiedVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Identifiable + fmt::Debug> fmt::Debug for IdentifiedVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Identifiable> FromIterator<T> for IdentifiedVec<T> {
    /// # Panics
    /// Panics on duplicate ids.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut collection = Self::with_capacity(iter.size_hint().0);
        for element in iter {
            collection.push(element);
        }
        collection
    }
}

impl<T: Identifiable> Extend<T> for IdentifiedVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<T: Identifiable> From<Vec<T>> for IdentifiedVec<T> {
    fn from(elements: Vec<T>) -> Self {
        elements.into_iter().collect()
    }
}

impl<'a, T: Identifiable> IntoIterator for &'a IdentifiedVec<T> {
    type Item = &'a T;
    type IntoIter =
        std::iter::FilterMap<std::slice::Iter<'a, Option<T>>, fn(&'a Option<T>) -> Option<&'a T>>;

    fn into_iter(self) -> Self::IntoIter {
        let live: fn(&'a Option<T>) -> Option<&'a T> = Option::as_ref;
        self.slots.iter().filter_map(live)
    }
}
