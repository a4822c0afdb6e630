//! Property-based checks for the quantified invariants the encoding layer
//! promises: round-tripping, permutation-independence, and hash-consing
//! identity.

use mimir_planning::valla::{CanonicalTree, IndexedHashSet};
use proptest::collection::vec;
use proptest::prelude::*;

fn sorted_unique(input: Vec<u32>) -> Vec<u32> {
    let mut out = input;
    out.sort_unstable();
    out.dedup();
    out
}

proptest! {
    /// ∀ sorted input lists L: decode(encode(L)) = L.
    #[test]
    fn decode_of_encode_round_trips(raw in vec(0u32..500, 0..64)) {
        let sorted = sorted_unique(raw);
        let mut tree = CanonicalTree::new();
        let root = tree.insert(&sorted);
        prop_assert_eq!(tree.read(root), sorted);
    }

    /// ∀ inputs L, L' with sorted(L) = sorted(L'): encode(L).root =
    /// encode(L').root and the ordering bitsets are identity-equal.
    #[test]
    fn permutation_independent_inputs_share_a_root(raw in vec(0u32..200, 1..32), seed in 0u64..10_000) {
        let sorted = sorted_unique(raw);
        prop_assume!(!sorted.is_empty());

        // Derive a second ordering of the same multiset by rotating it;
        // whatever order the caller built the set up in, the encoder must
        // canonicalize to the same root.
        let mut rotated = sorted.clone();
        let split = (seed as usize) % rotated.len();
        rotated.rotate_left(split);

        let mut tree = CanonicalTree::new();
        let root_a = tree.insert(&sorted);

        let mut rebuilt = rotated;
        rebuilt.sort_unstable();
        let root_b = tree.insert(&rebuilt);

        prop_assert_eq!(root_a.tree_index, root_b.tree_index);
        prop_assert_eq!(root_a.size, root_b.size);
        prop_assert_eq!(root_a.ordering, root_b.ordering);
    }

    /// ∀ interned entities e, f in the same repository:
    /// structurally_equal(e, f) ⇔ index(e) = index(f).
    #[test]
    fn indexed_hash_set_identity_matches_structural_equality(
        items in vec(any::<String>(), 0..40),
        i in 0usize..40,
        j in 0usize..40,
    ) {
        let mut set: IndexedHashSet<String> = IndexedHashSet::new();
        let indices: Vec<usize> = items.iter().map(|item| set.insert(item.clone()).0).collect();
        prop_assume!(i < items.len() && j < items.len());

        let structurally_equal = items[i] == items[j];
        let same_index = indices[i] == indices[j];
        prop_assert_eq!(structurally_equal, same_index);
    }
}
