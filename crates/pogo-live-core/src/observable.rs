//! Ordered collection that records every structural change.
//!
//! The presentation layer renders the collection and replays the recorded
//! [`CollectionChange`]s to animate only what moved. Mutations never emit
//! anything themselves; the owner drains them with
//! [`ObservableCollection::take_changes`] and publishes them.

use crate::error::{CoreError, Result};

/// A single change applied to an [`ObservableCollection`].
///
/// Indices refer to the collection state right after the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    /// An entry was appended at `index`.
    Added { index: usize },
    /// The entry at `index` was removed; later entries shifted down.
    Removed { index: usize },
    /// The entry at `index` was updated in place.
    Updated { index: usize },
    /// The collection was emptied.
    Reset,
}

/// An ordered collection with a pending change log.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableCollection<T> {
    items: Vec<T>,
    changes: Vec<CollectionChange>,
}

impl<T> ObservableCollection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            changes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Append an entry.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.changes.push(CollectionChange::Added {
            index: self.items.len() - 1,
        });
    }

    /// Remove the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(CoreError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        self.changes.push(CollectionChange::Removed { index });
        Ok(item)
    }

    /// Mutate the entry at `index` in place.
    pub fn update_at<F>(&mut self, index: usize, f: F) -> Result<()>
    where
        F: FnOnce(&mut T),
    {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange { index, len })?;
        f(item);
        self.changes.push(CollectionChange::Updated { index });
        Ok(())
    }

    /// Drop every entry from `len` onwards, last first.
    pub fn truncate(&mut self, len: usize) {
        while self.items.len() > len {
            self.items.pop();
            self.changes.push(CollectionChange::Removed {
                index: self.items.len(),
            });
        }
    }

    /// Remove all entries.
    ///
    /// Records a single `Reset`, even when already empty.
    pub fn clear(&mut self) {
        self.items.clear();
        self.changes.push(CollectionChange::Reset);
    }

    /// Whether changes are waiting to be published.
    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Drain the pending change log.
    pub fn take_changes(&mut self) -> Vec<CollectionChange> {
        std::mem::take(&mut self.changes)
    }
}

impl<T: Clone> ObservableCollection<T> {
    /// Copy of the current entries, without the change log.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> Default for ObservableCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ObservableCollection<T> {
    /// Build a collection without recording any change.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            changes: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ObservableCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove_record_changes() {
        let mut c = ObservableCollection::new();
        c.push('a');
        c.push('b');
        assert_eq!(c.remove(0).unwrap(), 'a');

        assert_eq!(
            c.take_changes(),
            vec![
                CollectionChange::Added { index: 0 },
                CollectionChange::Added { index: 1 },
                CollectionChange::Removed { index: 0 },
            ]
        );
        assert!(!c.has_pending_changes());
        assert_eq!(c.as_slice(), &['b']);
    }

    #[test]
    fn test_out_of_range() {
        let mut c: ObservableCollection<u8> = ObservableCollection::new();
        assert_eq!(
            c.remove(3),
            Err(CoreError::IndexOutOfRange { index: 3, len: 0 })
        );
        assert!(c.update_at(0, |_| {}).is_err());
        assert!(!c.has_pending_changes());
    }

    #[test]
    fn test_truncate_removes_from_tail() {
        let mut c: ObservableCollection<u8> = vec![1, 2, 3, 4].into_iter().collect();
        c.truncate(2);
        assert_eq!(c.as_slice(), &[1, 2]);
        assert_eq!(
            c.take_changes(),
            vec![
                CollectionChange::Removed { index: 3 },
                CollectionChange::Removed { index: 2 },
            ]
        );
    }

    #[test]
    fn test_clear_records_reset() {
        let mut c: ObservableCollection<u8> = vec![1, 2].into_iter().collect();
        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.take_changes(), vec![CollectionChange::Reset]);
    }
}
