//! Swiss-table style `HashIdMap` and its tree-aware variant (spec §4.F),
//! grounded on `original_source/include/valla/hash_id_map.hpp`.
//!
//! The control-byte scheme (empty / tag) and the 7/8 load-factor cap are
//! carried over faithfully; the 16-wide SIMD probing window
//! (`_mm_cmpeq_epi8`/`_mm_movemask_epi8`) is replaced by a portable
//! byte-at-a-time tag-compare loop, since stable Rust has no portable
//! equivalent without `std::simd`. Correctness is identical; only the
//! probing constant factor differs.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use super::tree::rehash_node;
use super::{VallaError, VallaResult};

const EMPTY: i8 = -128;
const MAX_LOAD_NUM: usize = 7;
const MAX_LOAD_DEN: usize = 8;

fn h1(hash: u64) -> usize {
    (hash >> 7) as usize
}

/// 7-bit tag derived from the hash's top bits; always in `0..128`, so it
/// never collides with the `EMPTY` sentinel (`-128` as `i8`).
fn h2(hash: u64) -> i8 {
    (hash >> 57) as i8 & 0x7f
}

fn hash_of<K: Hash>(key: &K) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Open-addressed map from key to dense, insertion-ordered index.
///
/// `controls[pos]` is `EMPTY` or a 7-bit hash tag; `slots[pos]` is the
/// dense index stored at that bucket once occupied. `keys` is the
/// append-only value vector (component D's "augmented" vector), so
/// `get_by_index` is O(1) regardless of how the table has been resized.
#[derive(Debug, Clone)]
pub struct HashIdMap<K> {
    controls: Vec<i8>,
    slots: Vec<u32>,
    keys: Vec<K>,
    capacity: usize,
}

impl<K: Eq + Hash + Clone> Default for HashIdMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> HashIdMap<K> {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two().max(16);
        HashIdMap {
            controls: vec![EMPTY; capacity],
            slots: vec![0; capacity],
            keys: Vec::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_by_index(&self, index: usize) -> &K {
        &self.keys[index]
    }

    fn mask(&self) -> usize {
        self.capacity - 1
    }

    fn max_load(&self) -> usize {
        self.capacity * MAX_LOAD_NUM / MAX_LOAD_DEN
    }

    /// Finds `key`'s bucket, or the first empty bucket it could occupy.
    fn probe(&self, key: &K, hash: u64) -> (usize, bool) {
        let tag = h2(hash);
        let mut pos = h1(hash) & self.mask();
        loop {
            let ctrl = self.controls[pos];
            if ctrl == tag && self.keys[self.slots[pos] as usize] == *key {
                return (pos, true);
            }
            if ctrl == EMPTY {
                return (pos, false);
            }
            pos = (pos + 1) & self.mask();
        }
    }

    /// Inserts `key`, returning its dense index and whether it was new.
    pub fn insert(&mut self, key: K) -> (usize, bool) {
        let hash = hash_of(&key);
        let (pos, found) = self.probe(&key, hash);
        if found {
            return (self.slots[pos] as usize, false);
        }
        let index = self.keys.len();
        self.keys.push(key);
        self.controls[pos] = h2(hash);
        self.slots[pos] = index as u32;
        if self.keys.len() > self.max_load() {
            self.grow();
        }
        (index, true)
    }

    /// Doubles capacity and reinserts every key into fresh buckets,
    /// preserving dense indices (only bucket positions move).
    fn grow(&mut self) {
        let new_capacity = (self.capacity * 2).max(16);
        self.rebuild(new_capacity);
    }

    fn rebuild(&mut self, new_capacity: usize) {
        let new_capacity = new_capacity.next_power_of_two();
        let mut controls = vec![EMPTY; new_capacity];
        let mut slots = vec![0u32; new_capacity];
        let mask = new_capacity - 1;
        for (index, key) in self.keys.iter().enumerate() {
            let hash = hash_of(key);
            let tag = h2(hash);
            let mut pos = h1(hash) & mask;
            while controls[pos] != EMPTY {
                pos = (pos + 1) & mask;
            }
            controls[pos] = tag;
            slots[pos] = index as u32;
        }
        self.controls = controls;
        self.slots = slots;
        self.capacity = new_capacity;
    }
}

/// Swiss-table node table plus a stable root table (spec §4.F's
/// `TreeHashIDMap`). Root ids never change; the node table's internal
/// indices may be fully remapped by [`Self::rehash`] as part of a
/// depth-first compaction pass that drops any node no longer reachable
/// from a live root.
#[derive(Debug, Default)]
pub struct TreeHashIdMap {
    pub nodes: HashIdMap<(u32, u32)>,
    roots: Vec<super::tree::RootSlot>,
    root_index_of: HashMap<super::tree::RootSlot, usize>,
}

impl TreeHashIdMap {
    pub fn new() -> Self {
        TreeHashIdMap {
            nodes: HashIdMap::new(),
            roots: Vec::new(),
            root_index_of: HashMap::new(),
        }
    }

    /// Inserts a root slot, returning its stable root id. Dedup is by
    /// value (`tree_index`, `size`, `ordering`), which stays internally
    /// consistent across rehashes because every stored root is remapped
    /// to the same post-rehash generation together.
    pub fn insert_root(&mut self, slot: super::tree::RootSlot) -> (usize, bool) {
        if let Some(&id) = self.root_index_of.get(&slot) {
            return (id, false);
        }
        let id = self.roots.len();
        self.roots.push(slot);
        self.root_index_of.insert(slot, id);
        (id, true)
    }

    pub fn root(&self, id: usize) -> super::tree::RootSlot {
        self.roots[id]
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Rewrites every root's tree depth-first into a freshly-sized node
    /// table, escalating `factor` on [`VallaError::CapacityUnderflow`]
    /// until migration fits or `max_attempts` is exhausted (spec §4.F,
    /// §9's rollback invariant). On failure, `self` is left completely
    /// unmodified — nothing is committed until the whole migration
    /// succeeds, so there is nothing to roll back in the success path.
    pub fn rehash(&mut self, mut factor: f64, max_attempts: usize) -> VallaResult<()> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.try_rehash(factor) {
                Ok(()) => {
                    tracing::debug!(
                        attempts,
                        new_capacity = self.nodes.capacity(),
                        "tree_hash_id_map_rehashed"
                    );
                    return Ok(());
                }
                Err(_) if attempts < max_attempts => {
                    tracing::warn!(attempts, factor, "tree_hash_id_map_rehash_retry");
                    factor *= 1.5;
                }
                Err(_) => return Err(VallaError::CapacityUnderflow { attempts }),
            }
        }
    }

    fn try_rehash(&mut self, factor: f64) -> VallaResult<()> {
        let new_capacity = ((self.nodes.capacity() as f64) * factor) as usize;
        let mut new_nodes = HashIdMap::with_capacity(new_capacity);
        let max_len = new_nodes.max_load();

        let mut pending = Vec::with_capacity(self.roots.len());
        for root in &self.roots {
            let new_index = rehash_node(&self.nodes, &mut new_nodes, max_len, root.tree_index, root.size as usize)?;
            pending.push(new_index);
        }

        for (root, new_index) in self.roots.iter_mut().zip(pending) {
            root.tree_index = new_index;
        }
        self.nodes = new_nodes;
        self.root_index_of.clear();
        for (id, root) in self.roots.iter().enumerate() {
            self.root_index_of.insert(*root, id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_reinsert_same_key_is_idempotent() {
        let mut map: HashIdMap<u32> = HashIdMap::with_capacity(16);
        let (i1, n1) = map.insert(5);
        let (i2, n2) = map.insert(5);
        assert!(n1);
        assert!(!n2);
        assert_eq!(i1, i2);
    }

    #[test]
    fn grows_past_load_factor() {
        let mut map: HashIdMap<u32> = HashIdMap::with_capacity(16);
        for i in 0..20 {
            map.insert(i);
        }
        assert!(map.capacity() > 16);
        for i in 0..20 {
            assert_eq!(*map.get_by_index(i as usize), i);
        }
    }

    #[test]
    fn tree_hash_id_map_rehash_preserves_root_identity() {
        let mut t = super::super::tree::CanonicalTree::new();
        let root = t.insert(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let mut thm = TreeHashIdMap::new();
        thm.nodes = t.nodes;
        let (id, _) = thm.insert_root(root);

        thm.rehash(4.0, 5).unwrap();
        let migrated = thm.root(id);
        assert_eq!(migrated.size, root.size);
        assert_eq!(migrated.ordering, root.ordering);
    }
}
