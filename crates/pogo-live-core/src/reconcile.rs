//! Incremental reconciliation of published collections.
//!
//! A refresh cycle fetches the whole neighbourhood again, but the
//! presentation layer holds on to the entries it already rendered. The two
//! strategies here merge a fresh fetch into the existing collection while
//! keeping untouched entries exactly where and what they are.
//!
//! ## Set mode ([`update_with`])
//!
//! Membership is decided by a caller-supplied identity predicate:
//!
//! 1. Old entries with no match in the fetch are removed
//! 2. Old entries with a match are left alone (no replace, no change record)
//! 3. Fetched values with no match are built by the factory and appended
//!
//! ## Index mode ([`update_by_index_with`])
//!
//! Position is authoritative. Slot `i` is updated in place from `fresh[i]`,
//! extra values are appended, surplus slots are truncated. An entity that
//! moves to another slot is simply seen as two in-place updates.
//!
//! Both strategies are total: any combination of empty and non-empty
//! inputs is valid, and an empty fetch always empties the collection.

use crate::observable::ObservableCollection;

/// An entry that can absorb a fresh raw value without being replaced.
pub trait Updatable<R> {
    fn update(&mut self, raw: &R);
}

/// Set-mode reconciliation.
///
/// `same(entry, raw)` must be an identity test (typically on an id), not
/// a full equality test; matching entries are never rebuilt.
pub fn update_with<T, R, F, P>(
    collection: &mut ObservableCollection<T>,
    fresh: &[R],
    mut factory: F,
    same: P,
) where
    F: FnMut(&R) -> T,
    P: Fn(&T, &R) -> bool,
{
    if fresh.is_empty() {
        if !collection.is_empty() {
            collection.clear();
        }
        return;
    }

    // Back to front so pending indices stay valid.
    let mut index = collection.len();
    while index > 0 {
        index -= 1;
        let keep = match collection.get(index) {
            Some(entry) => fresh.iter().any(|raw| same(entry, raw)),
            None => continue,
        };
        if !keep {
            let removed = collection.remove(index);
            debug_assert!(removed.is_ok());
        }
    }

    for raw in fresh {
        if !collection.iter().any(|entry| same(entry, raw)) {
            collection.push(factory(raw));
        }
    }
}

/// Index-mode reconciliation.
///
/// After the call `collection.len() == fresh.len()` and slot `i` reflects
/// `fresh[i]`.
pub fn update_by_index_with<T, R, F>(
    collection: &mut ObservableCollection<T>,
    fresh: &[R],
    mut factory: F,
) where
    T: Updatable<R>,
    F: FnMut(&R) -> T,
{
    let shared = collection.len().min(fresh.len());

    for (index, raw) in fresh.iter().enumerate().take(shared) {
        let updated = collection.update_at(index, |entry| entry.update(raw));
        debug_assert!(updated.is_ok());
    }

    if fresh.len() > shared {
        for raw in &fresh[shared..] {
            collection.push(factory(raw));
        }
    } else {
        collection.truncate(fresh.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observable::CollectionChange;
    use proptest::prelude::*;

    /// Test entry: `id` is the identity, `value` the payload, `serial`
    /// tells which factory call built it.
    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: u32,
        value: i64,
        serial: usize,
    }

    impl Updatable<(u32, i64)> for Entry {
        fn update(&mut self, raw: &(u32, i64)) {
            self.id = raw.0;
            self.value = raw.1;
        }
    }

    fn factory(counter: &mut usize) -> impl FnMut(&(u32, i64)) -> Entry + '_ {
        move |raw| {
            *counter += 1;
            Entry {
                id: raw.0,
                value: raw.1,
                serial: *counter,
            }
        }
    }

    fn same(entry: &Entry, raw: &(u32, i64)) -> bool {
        entry.id == raw.0
    }

    fn ids(c: &ObservableCollection<Entry>) -> Vec<u32> {
        c.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_set_mode_keeps_shared_instances() {
        let mut built = 0;
        let mut c = ObservableCollection::new();
        update_with(&mut c, &[(1, 10), (2, 20)], factory(&mut built), same);
        c.take_changes();

        // B moved (new payload) but must keep the original entry.
        update_with(&mut c, &[(2, 99), (3, 30)], factory(&mut built), same);

        assert_eq!(ids(&c), vec![2, 3]);
        let b = c.get(0).unwrap();
        assert_eq!(b.value, 20);
        assert_eq!(b.serial, 2);
        assert_eq!(c.get(1).unwrap().serial, 3);
        assert_eq!(
            c.take_changes(),
            vec![
                CollectionChange::Removed { index: 0 },
                CollectionChange::Added { index: 1 },
            ]
        );
    }

    #[test]
    fn test_set_mode_unchanged_fetch_is_silent() {
        let mut built = 0;
        let mut c = ObservableCollection::new();
        update_with(&mut c, &[(1, 1), (2, 2)], factory(&mut built), same);
        c.take_changes();

        update_with(&mut c, &[(2, 2), (1, 1)], factory(&mut built), same);
        assert!(!c.has_pending_changes());
        assert_eq!(built, 2);
    }

    #[test]
    fn test_set_mode_empty_fetch_empties() {
        let mut built = 0;
        let mut c = ObservableCollection::new();
        update_with(&mut c, &[(1, 1)], factory(&mut built), same);
        c.take_changes();

        update_with(&mut c, &[], factory(&mut built), same);
        assert!(c.is_empty());
        assert_eq!(c.take_changes(), vec![CollectionChange::Reset]);

        // Empty into empty records nothing.
        update_with(&mut c, &[], factory(&mut built), same);
        assert!(!c.has_pending_changes());
    }

    #[test]
    fn test_set_mode_duplicate_ids_in_fetch_collapse() {
        let mut built = 0;
        let mut c = ObservableCollection::new();
        update_with(&mut c, &[(5, 1), (5, 2)], factory(&mut built), same);
        assert_eq!(ids(&c), vec![5]);
        assert_eq!(c.get(0).unwrap().value, 1);
    }

    #[test]
    fn test_index_mode_grow_and_shrink() {
        let mut built = 0;
        let mut c = ObservableCollection::new();
        update_by_index_with(&mut c, &[(1, 1), (2, 2)], factory(&mut built));
        assert_eq!(
            c.take_changes(),
            vec![
                CollectionChange::Added { index: 0 },
                CollectionChange::Added { index: 1 },
            ]
        );

        update_by_index_with(&mut c, &[(2, 2), (1, 1), (3, 3)], factory(&mut built));
        assert_eq!(ids(&c), vec![2, 1, 3]);
        // Slots were updated in place, not rebuilt.
        assert_eq!(c.get(0).unwrap().serial, 1);
        assert_eq!(c.get(1).unwrap().serial, 2);
        assert_eq!(c.get(2).unwrap().serial, 3);
        c.take_changes();

        update_by_index_with(&mut c, &[(9, 9)], factory(&mut built));
        assert_eq!(ids(&c), vec![9]);
        assert_eq!(
            c.take_changes(),
            vec![
                CollectionChange::Updated { index: 0 },
                CollectionChange::Removed { index: 2 },
                CollectionChange::Removed { index: 1 },
            ]
        );
    }

    #[test]
    fn test_index_mode_empty_fetch_empties() {
        let mut built = 0;
        let mut c = ObservableCollection::new();
        update_by_index_with(&mut c, &[(1, 1), (2, 2)], factory(&mut built));
        update_by_index_with(&mut c, &[], factory(&mut built));
        assert!(c.is_empty());
    }

    fn raw_list() -> impl Strategy<Value = Vec<(u32, i64)>> {
        prop::collection::vec((0u32..20, any::<i64>()), 0..16)
    }

    proptest! {
        #[test]
        fn test_index_mode_mirrors_fetch(old in raw_list(), new in raw_list()) {
            let mut built = 0;
            let mut c = ObservableCollection::new();
            update_by_index_with(&mut c, &old, factory(&mut built));
            update_by_index_with(&mut c, &new, factory(&mut built));

            prop_assert_eq!(c.len(), new.len());
            for (entry, raw) in c.iter().zip(&new) {
                prop_assert_eq!((entry.id, entry.value), *raw);
            }
        }

        #[test]
        fn test_set_mode_membership(old in raw_list(), new in raw_list()) {
            let mut built = 0;
            let mut c = ObservableCollection::new();
            update_with(&mut c, &old, factory(&mut built), same);
            let before = c.snapshot();
            update_with(&mut c, &new, factory(&mut built), same);

            // Exactly the fetched ids, each once.
            let mut got = ids(&c);
            got.sort_unstable();
            let mut want: Vec<u32> = new.iter().map(|r| r.0).collect();
            want.sort_unstable();
            want.dedup();
            prop_assert_eq!(got, want);

            // Survivors are untouched.
            for entry in c.iter() {
                if let Some(prev) = before.iter().find(|p| p.id == entry.id) {
                    prop_assert_eq!(entry, prev);
                }
            }
        }
    }
}
