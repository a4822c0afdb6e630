//! Canonical tree encoder for ordered integer sets (spec §4.E), grounded on
//! `original_source/include/valla/canonical_tree_compression.hpp` and
//! `root_slot.hpp`.
//!
//! Two sorted slices with identical contents always produce the same root
//! slot, independent of how each was built up — `insert` always splits at
//! `bit_floor(n-1)` and canonicalizes child order by swapping into an
//! ordering bitset rather than by value, so structural sharing across
//! near-identical states (successor states differing by a handful of
//! atoms) falls out of ordinary hash-consing.

use super::bitset_pool::{BitsetPool, BitsetView};
use super::hash_id_map::HashIdMap;
use super::indexed_hash_set::IndexedHashSet;
use super::{VallaError, VallaResult};

/// A fully-decoded set root: which tree node holds its top split, how many
/// leaves it has, and which bitset records the left/right swap decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootSlot {
    pub tree_index: u32,
    pub size: u32,
    pub ordering: BitsetView,
}

/// Largest power of two `<= n`. `n = 0` is undefined in the original and
/// never called with it (callers only invoke this for `n >= 1`).
pub const fn bit_floor(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1usize << (usize::BITS - 1 - n.leading_zeros())
    }
}

/// BFS index of a node's children, given the node's own BFS index `b`:
/// left child is `2b + 1`, right child is `2b + 2`.
const fn left_child_bit(b: usize) -> usize {
    2 * b + 1
}
const fn right_child_bit(b: usize) -> usize {
    2 * b + 2
}

/// The canonical tree encoder: owns the internal node table (a
/// `HashIdMap<(u32,u32)>` of `(min_child, max_child)` slots) and the
/// uniqueness index over ordering bitsets.
#[derive(Debug, Default)]
pub struct CanonicalTree {
    pub nodes: HashIdMap<(u32, u32)>,
    pub orderings: IndexedHashSet<Vec<bool>>,
    pub bits: BitsetPool,
    /// Pool view for each interned ordering, parallel to `orderings`'
    /// dense index space, so a deduplicated `insert` can recover the
    /// already-committed view without re-allocating pool storage.
    ordering_views: Vec<BitsetView>,
}

impl CanonicalTree {
    pub fn new() -> Self {
        CanonicalTree {
            nodes: HashIdMap::new(),
            orderings: IndexedHashSet::new(),
            bits: BitsetPool::new(),
            ordering_views: Vec::new(),
        }
    }

    /// Encodes a sorted, deduplicated slice of indices into a canonical
    /// root slot (spec §4.E steps 1-6).
    pub fn insert(&mut self, sorted: &[u32]) -> RootSlot {
        let n = sorted.len();
        if n == 0 {
            return RootSlot {
                tree_index: 0,
                size: 0,
                ordering: BitsetView::EMPTY,
            };
        }

        // Enough bits to cover every BFS node position in the balanced
        // tree over `n` leaves; a generous power-of-two bound.
        let ordering_bits = n.next_power_of_two().max(1);
        let view = self.bits.allocate(ordering_bits);
        let tree_index = self.insert_recursively(sorted, 0, &view);

        let recorded = self.bits.to_bits(view);
        let (ordering_index, inserted) = self.orderings.insert(recorded);
        let ordering = if inserted {
            debug_assert_eq!(ordering_index, self.ordering_views.len());
            self.ordering_views.push(view);
            view
        } else {
            self.bits.pop_allocation(view);
            self.ordering_view(ordering_index)
        };

        RootSlot {
            tree_index,
            size: n as u32,
            ordering,
        }
    }

    fn ordering_view(&self, index: usize) -> BitsetView {
        // Orderings are stored by value in `self.orderings`; the first time
        // one is interned we keep its pool view in `self.ordering_views`.
        self.ordering_views[index]
    }

    fn insert_recursively(&mut self, items: &[u32], bit: usize, view: &BitsetView) -> u32 {
        let size = items.len();
        if size == 1 {
            return items[0];
        }
        if size == 2 {
            let (mut i1, mut i2) = (items[0], items[1]);
            if i2 < i1 {
                std::mem::swap(&mut i1, &mut i2);
                self.bits.set(*view, bit);
            }
            let (idx, _) = self.nodes.insert((i1, i2));
            return idx as u32;
        }
        let mid = bit_floor(size - 1);
        let mut i1 = self.insert_recursively(&items[..mid], left_child_bit(bit), view);
        let mut i2 = self.insert_recursively(&items[mid..], right_child_bit(bit), view);
        if i2 < i1 {
            std::mem::swap(&mut i1, &mut i2);
            self.bits.set(*view, bit);
        }
        let (idx, _) = self.nodes.insert((i1, i2));
        idx as u32
    }

    /// Decodes a root slot back into its original sorted sequence.
    pub fn read(&self, root: RootSlot) -> Vec<u32> {
        if root.size == 0 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(root.size as usize);
        self.read_recursively(root.tree_index, root.size as usize, 0, &root.ordering, &mut out);
        out
    }

    fn read_recursively(&self, index: u32, size: usize, bit: usize, ordering: &BitsetView, out: &mut Vec<u32>) {
        if size == 1 {
            out.push(index);
            return;
        }
        let (mut i1, mut i2) = *self.nodes.get_by_index(index as usize);
        if size == 2 {
            if self.bits.get(*ordering, bit) {
                std::mem::swap(&mut i1, &mut i2);
            }
            out.push(i1);
            out.push(i2);
            return;
        }
        let mid = bit_floor(size - 1);
        if self.bits.get(*ordering, bit) {
            std::mem::swap(&mut i1, &mut i2);
        }
        self.read_recursively(i1, mid, left_child_bit(bit), ordering, out);
        self.read_recursively(i2, size - mid, right_child_bit(bit), ordering, out);
    }
}

/// Re-walks an old tree under `old`, reinserting every still-reachable node
/// into `new` with remapped child indices, failing if `new` would exceed
/// `max_len` nodes. Used by [`super::hash_id_map::TreeHashIdMap::rehash`]
/// (spec §4.F) — leaves (`size <= 1`) need no table entry, since their
/// "index" is the raw value itself, not a node-table slot.
pub(crate) fn rehash_node(
    old: &HashIdMap<(u32, u32)>,
    new: &mut HashIdMap<(u32, u32)>,
    max_len: usize,
    index: u32,
    size: usize,
) -> VallaResult<u32> {
    if size <= 1 {
        return Ok(index);
    }
    let (i1, i2) = *old.get_by_index(index as usize);
    let mid = bit_floor(size - 1);
    let new_i1 = rehash_node(old, new, max_len, i1, mid)?;
    let new_i2 = rehash_node(old, new, max_len, i2, size - mid)?;
    if new.len() >= max_len {
        return Err(VallaError::CapacityUnderflow { attempts: 0 });
    }
    let (lo, hi) = if new_i1 <= new_i2 { (new_i1, new_i2) } else { (new_i2, new_i1) };
    let (idx, _) = new.insert((lo, hi));
    Ok(idx as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_zero_size_root() {
        let mut t = CanonicalTree::new();
        let root = t.insert(&[]);
        assert_eq!(root.size, 0);
        assert_eq!(t.read(root), Vec::<u32>::new());
    }

    #[test]
    fn singleton_root_index_is_the_value_itself() {
        let mut t = CanonicalTree::new();
        let root = t.insert(&[42]);
        assert_eq!(root.tree_index, 42);
        assert_eq!(t.read(root), vec![42]);
    }

    #[test]
    fn round_trips_arbitrary_sorted_sets() {
        let mut t = CanonicalTree::new();
        for input in [vec![1u32, 2, 3, 4, 5], vec![7, 9], vec![1, 2, 3, 4, 5, 6, 7]] {
            let root = t.insert(&input);
            assert_eq!(t.read(root), input);
        }
    }

    #[test]
    fn identical_sets_share_the_same_root() {
        let mut t = CanonicalTree::new();
        let r1 = t.insert(&[1, 2, 3, 4, 5]);
        let r2 = t.insert(&[1, 2, 3, 4, 5]);
        assert_eq!(r1, r2);
    }

    #[test]
    fn bit_floor_matches_largest_power_of_two_leq_n() {
        assert_eq!(bit_floor(1), 1);
        assert_eq!(bit_floor(2), 2);
        assert_eq!(bit_floor(3), 2);
        assert_eq!(bit_floor(7), 4);
        assert_eq!(bit_floor(8), 8);
    }
}
