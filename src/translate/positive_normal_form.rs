//! Positive-normal-form translator (spec §4.I.5): for every predicate that
//! appears negated anywhere, introduces a dual predicate `not_p`, rewrites
//! negative literals as positive literals over the dual, augments every
//! effect touching `p` to keep `not_p` in lockstep, and initializes `not_p`
//! by closed-world completion — every grounding of `p` absent from the
//! initial state gets `not_p` asserted there.
//!
//! (Open question resolved per spec §9's stated alternative: closed-world
//! completion, rather than the source's partial initial-state dualization.)

use std::collections::{HashMap, HashSet};

use crate::formalism::{
    Atom, Condition, ConditionIndex, GroundAtom, GroundAtomIndex, GroundLiteral, Literal, LiteralIndex,
    PDDLRepository, PredicateIndex, PredicateSchema, Problem,
};

#[derive(Debug, Default)]
pub struct PositiveNormalFormTranslator {
    duals: HashMap<PredicateIndex, PredicateIndex>,
}

impl PositiveNormalFormTranslator {
    /// Predicate `p`'s dual `not_p`, creating and recording it the first
    /// time `p` is seen negated.
    fn dual_of(&mut self, repo: &mut PDDLRepository, predicate: PredicateIndex) -> PredicateIndex {
        if let Some(&dual) = self.duals.get(&predicate) {
            return dual;
        }
        let schema = repo.get_predicate(predicate).clone();
        let dual = repo.insert_predicate(PredicateSchema {
            name: format!("not_{}", schema.name),
            arity: schema.arity,
        });
        self.duals.insert(predicate, dual);
        dual
    }

    /// Rewrites every negative literal in `index` to a positive literal
    /// over its predicate's dual, recording which predicates got dualized.
    pub fn rewrite_condition(&mut self, repo: &mut PDDLRepository, index: ConditionIndex) -> ConditionIndex {
        let node = repo.get_condition(index).clone();
        match node {
            Condition::Literal(l) => {
                let literal = *repo.get_literal(l);
                if literal.polarity {
                    return index;
                }
                let atom = repo.get_atom(literal.atom).clone();
                let dual = self.dual_of(repo, atom.predicate);
                let dual_atom = repo.insert_atom(Atom { predicate: dual, terms: atom.terms });
                let dual_literal = repo.insert_literal(Literal { atom: dual_atom, polarity: true });
                repo.insert_condition(Condition::Literal(dual_literal))
            }
            Condition::And(children) => {
                let nc: Vec<_> = children.iter().map(|&c| self.rewrite_condition(repo, c)).collect();
                repo.insert_and(nc)
            }
            Condition::Or(children) => {
                let nc: Vec<_> = children.iter().map(|&c| self.rewrite_condition(repo, c)).collect();
                repo.insert_or(nc)
            }
            Condition::Not(inner) => {
                let ni = self.rewrite_condition(repo, inner);
                repo.insert_condition(Condition::Not(ni))
            }
            Condition::Exists(vars, inner) => {
                let ni = self.rewrite_condition(repo, inner);
                repo.insert_condition(Condition::Exists(vars, ni))
            }
            Condition::Forall(vars, inner) => {
                let ni = self.rewrite_condition(repo, inner);
                repo.insert_condition(Condition::Forall(vars, ni))
            }
            Condition::Imply(a, b) => {
                let na = self.rewrite_condition(repo, a);
                let nb = self.rewrite_condition(repo, b);
                repo.insert_condition(Condition::Imply(na, nb))
            }
        }
    }

    /// Augments an effect literal list: every literal touching an already
    /// dualized predicate gets a matching literal over its dual with
    /// flipped polarity appended, so `not_p` always mirrors `p`.
    pub fn augment_effect(&self, repo: &mut PDDLRepository, literals: &[LiteralIndex]) -> Vec<LiteralIndex> {
        let mut augmented = literals.to_vec();
        for &l in literals {
            let literal = *repo.get_literal(l);
            let atom = repo.get_atom(literal.atom).clone();
            if let Some(&dual) = self.duals.get(&atom.predicate) {
                let dual_atom = repo.insert_atom(Atom { predicate: dual, terms: atom.terms });
                let dual_literal = repo.insert_literal(Literal { atom: dual_atom, polarity: !literal.polarity });
                augmented.push(dual_literal);
            }
        }
        augmented
    }

    /// Closed-world completion: for every grounding of `predicate` in
    /// `universe` that is not already true in `problem`'s initial state,
    /// asserts `not_p` there. `universe` is the full set of groundings of
    /// `predicate` over the problem's object set — full grounding is the
    /// state/search layer's job, not this translator's, so it is supplied
    /// by the caller rather than recomputed here.
    pub fn initialize_dual(&mut self, repo: &mut PDDLRepository, problem: &mut Problem, predicate: PredicateIndex, universe: &[GroundAtomIndex]) {
        let Some(&dual) = self.duals.get(&predicate) else {
            return;
        };
        let present: HashSet<GroundAtomIndex> = problem
            .initial_literals
            .iter()
            .filter_map(|&gl| {
                let literal = repo.get_ground_literal(gl);
                literal.polarity.then_some(literal.atom)
            })
            .collect();

        for &ground_atom_index in universe {
            let ground_atom = repo.get_ground_atom(ground_atom_index);
            if ground_atom.predicate != predicate || present.contains(&ground_atom_index) {
                continue;
            }
            let dual_atom = GroundAtom {
                predicate: dual,
                objects: ground_atom.objects.clone(),
            };
            let dual_ground = repo.insert_ground_atom(dual_atom);
            let dual_literal = repo.insert_ground_literal(GroundLiteral { atom: dual_ground, polarity: true });
            problem.initial_literals.push(dual_literal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formalism::{Object, PredicateSchema};

    #[test]
    fn negative_literal_becomes_positive_over_dual() {
        let mut repo = PDDLRepository::new();
        let p = repo.insert_predicate(PredicateSchema { name: "clear".into(), arity: 0 });
        let atom = repo.insert_atom(Atom { predicate: p, terms: vec![] });
        let lit = repo.insert_literal(Literal { atom, polarity: false });
        let cond = repo.insert_condition(Condition::Literal(lit));

        let mut translator = PositiveNormalFormTranslator::default();
        let result = translator.rewrite_condition(&mut repo, cond);
        match repo.get_condition(result) {
            Condition::Literal(l) => {
                let literal = repo.get_literal(*l);
                assert!(literal.polarity);
                let atom = repo.get_atom(literal.atom);
                assert_eq!(repo.get_predicate(atom.predicate).name, "not_clear");
            }
            other => panic!("expected Literal, got {:?}", other),
        }
    }

    #[test]
    fn closed_world_completion_asserts_dual_for_absent_groundings() {
        let mut repo = PDDLRepository::new();
        let mut problem = Problem::default();
        let p = repo.insert_predicate(PredicateSchema { name: "clear".into(), arity: 1 });
        let a = repo.insert_object(Object { name: "a".into(), types: vec![] });
        let b = repo.insert_object(Object { name: "b".into(), types: vec![] });
        let atom_a = repo.insert_atom(Atom { predicate: p, terms: vec![] });
        let lit_neg = repo.insert_literal(Literal { atom: atom_a, polarity: false });
        let cond = repo.insert_condition(Condition::Literal(lit_neg));

        let mut translator = PositiveNormalFormTranslator::default();
        translator.rewrite_condition(&mut repo, cond);

        let ground_a = repo.insert_ground_atom(GroundAtom { predicate: p, objects: vec![a] });
        let ground_b = repo.insert_ground_atom(GroundAtom { predicate: p, objects: vec![b] });
        let ground_lit_a = repo.insert_ground_literal(GroundLiteral { atom: ground_a, polarity: true });
        problem.initial_literals.push(ground_lit_a);

        translator.initialize_dual(&mut repo, &mut problem, p, &[ground_a, ground_b]);

        // `clear(a)` is true initially, so `not_clear(a)` must not be
        // asserted, but `clear(b)` is absent, so `not_clear(b)` must be.
        let asserted: Vec<_> = problem
            .initial_literals
            .iter()
            .filter_map(|&gl| {
                let literal = repo.get_ground_literal(gl);
                let ga = repo.get_ground_atom(literal.atom);
                (repo.get_predicate(ga.predicate).name == "not_clear").then(|| ga.objects.clone())
            })
            .collect();
        assert_eq!(asserted, vec![vec![b]]);
    }
}
