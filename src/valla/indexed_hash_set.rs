//! Indexed hash-identity map (spec §4.D), grounded on
//! `original_source/include/valla/root_slot.hpp`'s `RootIndexedHashSet`.
//!
//! Used directly as the bitset-ordering uniqueness index and as the stable
//! root table inside [`super::hash_id_map::TreeHashIdMap`]. Unlike §4.F's
//! Swiss table, this one only needs to answer "have I seen this key
//! before, and if so at which index" — it is not on the hot path of tree
//! rehashing, so a plain `std::collections::HashMap` plus an append-only
//! value vector is the idiomatic choice (no custom probing needed here).

use std::collections::HashMap;
use std::hash::Hash;

/// Maps a key to a dense, stable index, remembering insertion order so
/// `get_by_index` is O(1).
#[derive(Debug, Clone)]
pub struct IndexedHashSet<K> {
    index_of: HashMap<K, usize>,
    values: Vec<K>,
}

impl<K> Default for IndexedHashSet<K> {
    fn default() -> Self {
        IndexedHashSet {
            index_of: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> IndexedHashSet<K> {
    pub fn new() -> Self {
        IndexedHashSet {
            index_of: HashMap::new(),
            values: Vec::new(),
        }
    }

    /// Inserts `key`, returning its dense index and whether it was newly
    /// inserted (`false` means an equal key already existed).
    pub fn insert(&mut self, key: K) -> (usize, bool) {
        if let Some(&idx) = self.index_of.get(&key) {
            return (idx, false);
        }
        let idx = self.values.len();
        self.values.push(key.clone());
        self.index_of.insert(key, idx);
        (idx, true)
    }

    pub fn get_by_index(&self, index: usize) -> &K {
        &self.values[index]
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_insert_returns_same_index() {
        let mut set: IndexedHashSet<(u32, u32)> = IndexedHashSet::new();
        let (i1, new1) = set.insert((1, 2));
        let (i2, new2) = set.insert((1, 2));
        assert!(new1);
        assert!(!new2);
        assert_eq!(i1, i2);
    }

    #[test]
    fn distinct_keys_get_distinct_increasing_indices() {
        let mut set: IndexedHashSet<u32> = IndexedHashSet::new();
        let (i1, _) = set.insert(10);
        let (i2, _) = set.insert(20);
        assert_eq!(i1, 0);
        assert_eq!(i2, 1);
        assert_eq!(*set.get_by_index(1), 20);
    }
}
