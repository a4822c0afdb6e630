//! State repository (spec §6), grounded on spec §6 directly: a state is a
//! canonical tree root (§4.E) over its sorted true ground-atom indices, so
//! two states with the same fact set always share one dense id regardless
//! of which path reached them — the encoder backing `search`'s duplicate
//! pruning for free.

pub mod match_tree;

pub use match_tree::{Element, MatchTree};

use std::collections::HashMap;

use crate::formalism::GroundAtomIndex;
use crate::search::StateId;
use crate::valla::tree::{CanonicalTree, RootSlot};

#[derive(Debug, Default)]
pub struct StateRepository {
    tree: CanonicalTree,
    roots: Vec<RootSlot>,
    id_of: HashMap<RootSlot, StateId>,
    /// Accumulated metric (e.g. total-cost) per state, parallel to `roots`.
    metrics: Vec<u64>,
}

impl StateRepository {
    pub fn new() -> Self {
        StateRepository { tree: CanonicalTree::new(), roots: Vec::new(), id_of: HashMap::new(), metrics: Vec::new() }
    }

    fn intern(&mut self, root: RootSlot, metric: u64) -> StateId {
        if let Some(&id) = self.id_of.get(&root) {
            return id;
        }
        let id = self.roots.len();
        self.roots.push(root);
        self.metrics.push(metric);
        self.id_of.insert(root, id);
        id
    }

    fn sorted_atoms(atoms: &[GroundAtomIndex]) -> Vec<u32> {
        let mut raw: Vec<u32> = atoms.iter().map(|a| a.0).collect();
        raw.sort_unstable();
        raw.dedup();
        raw
    }

    pub fn get_or_create_initial_state(&mut self, initial_atoms: &[GroundAtomIndex]) -> StateId {
        let sorted = Self::sorted_atoms(initial_atoms);
        let root = self.tree.insert(&sorted);
        self.intern(root, 0)
    }

    /// Applies a strips effect's add/delete lists to `state`'s fact set and
    /// interns the result, returning the successor's id and its updated
    /// metric (`state`'s metric plus `cost_delta`).
    pub fn get_or_create_successor(
        &mut self,
        state: StateId,
        add: &[GroundAtomIndex],
        delete: &[GroundAtomIndex],
        cost_delta: u64,
    ) -> (StateId, u64) {
        let root = self.roots[state];
        let mut atoms = self.tree.read(root);
        let delete_raw: Vec<u32> = delete.iter().map(|a| a.0).collect();
        atoms.retain(|a| !delete_raw.contains(a));
        atoms.extend(add.iter().map(|a| a.0));
        atoms.sort_unstable();
        atoms.dedup();

        let new_root = self.tree.insert(&atoms);
        let new_metric = self.metrics[state] + cost_delta;
        let id = self.intern(new_root, new_metric);
        // Two different paths into the same fact set keep whichever metric
        // interned the state first; A*/BrFS track the authoritative
        // per-path cost themselves via the search node's `g`, so this
        // repository's metric is informational (e.g. for logging), not the
        // search loop's source of truth.
        (id, self.metrics[id].min(new_metric))
    }

    pub fn atoms_of(&self, state: StateId) -> Vec<u32> {
        self.tree.read(self.roots[state])
    }

    pub fn is_present(&self, state: StateId, atom: GroundAtomIndex) -> bool {
        self.atoms_of(state).binary_search(&atom.0).is_ok()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(id: u32) -> GroundAtomIndex {
        GroundAtomIndex(id)
    }

    #[test]
    fn identical_initial_states_share_one_id() {
        let mut repo = StateRepository::new();
        let s1 = repo.get_or_create_initial_state(&[atom(1), atom(3), atom(7)]);
        let s2 = repo.get_or_create_initial_state(&[atom(7), atom(1), atom(3)]);
        assert_eq!(s1, s2);
    }

    #[test]
    fn successor_reflects_add_and_delete() {
        let mut repo = StateRepository::new();
        let s0 = repo.get_or_create_initial_state(&[atom(1), atom(2)]);
        let (s1, metric) = repo.get_or_create_successor(s0, &[atom(3)], &[atom(1)], 1);
        assert_eq!(repo.atoms_of(s1), vec![2, 3]);
        assert_eq!(metric, 1);
    }

    #[test]
    fn converging_successors_intern_to_the_same_state() {
        let mut repo = StateRepository::new();
        let s0 = repo.get_or_create_initial_state(&[atom(1)]);
        let (a, _) = repo.get_or_create_successor(s0, &[atom(2)], &[], 1);
        let (b, _) = repo.get_or_create_successor(s0, &[atom(2)], &[], 5);
        assert_eq!(a, b);
    }
}
