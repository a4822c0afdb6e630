//! Match tree wire format (spec §6): a decision structure over fluent
//! ground atoms for O(depth) applicable-action enumeration. No teacher or
//! `original_source` file covers this format; it is built directly from
//! the spec's wire description.
//!
//! Each non-terminal node splits on one atom into up to three branches:
//! present (atom true in state), absent (atom false), and don't-care
//! (elements whose applicability doesn't depend on this atom at all).
//! Splits that would leave two of the three branches empty are useless —
//! they're skipped during construction rather than materialized as a node,
//! which is how identical subtrees end up coalesced for free (two element
//! sets that agree on every atom that actually discriminates between them
//! build the same tree).

use crate::formalism::GroundAtomIndex;

#[derive(Debug, Clone)]
pub enum MatchTree<T> {
    Split {
        atom: GroundAtomIndex,
        present: Box<MatchTree<T>>,
        absent: Box<MatchTree<T>>,
        dont_care: Box<MatchTree<T>>,
    },
    Terminal(Vec<T>),
}

/// One candidate element: the ground atoms its precondition requires to be
/// present, the ones it requires absent, and the payload (e.g. an action
/// index) to return when a state satisfies both.
pub struct Element<T> {
    pub requires_present: Vec<GroundAtomIndex>,
    pub requires_absent: Vec<GroundAtomIndex>,
    pub payload: T,
}

impl<T: Clone> MatchTree<T> {
    pub fn build(elements: Vec<Element<T>>, atom_order: &[GroundAtomIndex]) -> Self {
        Self::build_recursive(elements, atom_order)
    }

    fn build_recursive(elements: Vec<Element<T>>, remaining_atoms: &[GroundAtomIndex]) -> Self {
        let Some((&atom, rest)) = remaining_atoms.split_first() else {
            return MatchTree::Terminal(elements.into_iter().map(|e| e.payload).collect());
        };

        let mut present = Vec::new();
        let mut absent = Vec::new();
        let mut dont_care = Vec::new();
        for element in elements {
            if element.requires_present.contains(&atom) {
                present.push(element);
            } else if element.requires_absent.contains(&atom) {
                absent.push(element);
            } else {
                dont_care.push(element);
            }
        }

        // Useless split: everything landed in one branch, so splitting on
        // this atom didn't discriminate anything. Skip straight to the
        // next atom instead of emitting a node.
        let non_empty = [!present.is_empty(), !absent.is_empty(), !dont_care.is_empty()]
            .into_iter()
            .filter(|&b| b)
            .count();
        if non_empty <= 1 {
            let all = present.into_iter().chain(absent).chain(dont_care).collect();
            return Self::build_recursive(all, rest);
        }

        MatchTree::Split {
            atom,
            present: Box::new(Self::build_recursive(present, rest)),
            absent: Box::new(Self::build_recursive(absent, rest)),
            dont_care: Box::new(Self::build_recursive(dont_care, rest)),
        }
    }

    /// Collects every element whose precondition is satisfied by a state
    /// where `is_present(atom)` holds, walking present/absent by the
    /// state's value for that atom and always also descending into
    /// don't-care.
    pub fn applicable(&self, is_present: &impl Fn(GroundAtomIndex) -> bool, out: &mut Vec<T>) {
        match self {
            MatchTree::Terminal(elements) => out.extend(elements.iter().cloned()),
            MatchTree::Split { atom, present, absent, dont_care } => {
                if is_present(*atom) {
                    present.applicable(is_present, out);
                } else {
                    absent.applicable(is_present, out);
                }
                dont_care.applicable(is_present, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(id: u32) -> GroundAtomIndex {
        GroundAtomIndex(id)
    }

    #[test]
    fn terminal_collects_every_don_t_care_element() {
        let elements = vec![
            Element { requires_present: vec![], requires_absent: vec![], payload: "always" },
        ];
        let tree = MatchTree::build(elements, &[]);
        let mut out = Vec::new();
        tree.applicable(&|_| false, &mut out);
        assert_eq!(out, vec!["always"]);
    }

    #[test]
    fn splits_on_discriminating_atom() {
        let a = atom(0);
        let elements = vec![
            Element { requires_present: vec![a], requires_absent: vec![], payload: "needs_a" },
            Element { requires_present: vec![], requires_absent: vec![a], payload: "needs_not_a" },
            Element { requires_present: vec![], requires_absent: vec![], payload: "indifferent" },
        ];
        let tree = MatchTree::build(elements, &[a]);

        let mut when_present = Vec::new();
        tree.applicable(&|x| x == a, &mut when_present);
        assert_eq!(when_present, vec!["needs_a", "indifferent"]);

        let mut when_absent = Vec::new();
        tree.applicable(&|_| false, &mut when_absent);
        assert_eq!(when_absent, vec!["needs_not_a", "indifferent"]);
    }

    #[test]
    fn useless_split_is_skipped() {
        let a = atom(0);
        let b = atom(1);
        // Every element agrees on `a` (all require it present), so the
        // split on `a` is useless and should be skipped in favor of `b`.
        let elements = vec![
            Element { requires_present: vec![a], requires_absent: vec![], payload: 1 },
            Element { requires_present: vec![a, b], requires_absent: vec![], payload: 2 },
        ];
        let tree = MatchTree::build(elements, &[a, b]);
        match tree {
            MatchTree::Split { atom, .. } => assert_eq!(atom, b),
            MatchTree::Terminal(_) => panic!("expected a split on b"),
        }
    }
}
