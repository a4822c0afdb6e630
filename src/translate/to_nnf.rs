//! To-NNF translator (spec §4.I.2), grounded on
//! `original_source/src/formalism/translators/negation_normal_form.cpp`:
//! push negations inward via De Morgan's laws until every `Not` wraps a
//! literal, flattening nested conjunctions/disjunctions and merging nested
//! same-kind quantifiers along the way. Applied until a fixed point, since
//! a single push can expose a new double-negation or a newly-adjacent pair
//! of same-kind quantifiers for the next pass to merge.

use crate::formalism::{Condition, ConditionIndex, PDDLRepository};

use super::framework::ConditionTranslator;

#[derive(Debug, Default)]
pub struct NnfTranslator;

impl NnfTranslator {
    /// Rewrites `Not(condition)`, pushing the negation inward per De
    /// Morgan's laws and recursively continuing on the rewritten result so
    /// the output is fully in NNF, not just one level negation-free.
    fn push_negation(&mut self, repo: &mut PDDLRepository, condition: ConditionIndex) -> ConditionIndex {
        let node = repo.get_condition(condition).clone();
        match node {
            Condition::Literal(lit) => {
                let literal = *repo.get_literal(lit);
                let negated = crate::formalism::Literal {
                    atom: literal.atom,
                    polarity: !literal.polarity,
                };
                let negated_index = repo.insert_literal(negated);
                repo.insert_condition(Condition::Literal(negated_index))
            }
            // ¬¬A ≡ A
            Condition::Not(inner) => self.transform(repo, inner),
            // ¬(A∧B) ≡ ¬A∨¬B
            Condition::And(children) => {
                let negated: Vec<_> = children.iter().map(|&c| self.push_negation(repo, c)).collect();
                repo.insert_or(negated)
            }
            // ¬(A∨B) ≡ ¬A∧¬B
            Condition::Or(children) => {
                let negated: Vec<_> = children.iter().map(|&c| self.push_negation(repo, c)).collect();
                repo.insert_and(negated)
            }
            // ¬∃x.A ≡ ∀x.¬A
            Condition::Exists(vars, inner) => {
                let negated = self.push_negation(repo, inner);
                repo.insert_condition(Condition::Forall(vars, negated))
            }
            // ¬∀x.A ≡ ∃x.¬A
            Condition::Forall(vars, inner) => {
                let negated = self.push_negation(repo, inner);
                repo.insert_condition(Condition::Exists(vars, negated))
            }
            // ¬(A→B) ≡ A∧¬B
            Condition::Imply(a, b) => {
                let a2 = self.transform(repo, a);
                let not_b = self.push_negation(repo, b);
                repo.insert_and(vec![a2, not_b])
            }
        }
    }

    /// Flattens `children` one level if any of them is itself the same
    /// `And`/`Or` kind, per "flatten nested conjunctions/disjunctions".
    fn flatten_and(repo: &PDDLRepository, children: &[ConditionIndex]) -> Vec<ConditionIndex> {
        let mut flat = Vec::with_capacity(children.len());
        for &c in children {
            if let Condition::And(grandchildren) = repo.get_condition(c) {
                flat.extend(grandchildren.iter().copied());
            } else {
                flat.push(c);
            }
        }
        flat
    }

    fn flatten_or(repo: &PDDLRepository, children: &[ConditionIndex]) -> Vec<ConditionIndex> {
        let mut flat = Vec::with_capacity(children.len());
        for &c in children {
            if let Condition::Or(grandchildren) = repo.get_condition(c) {
                flat.extend(grandchildren.iter().copied());
            } else {
                flat.push(c);
            }
        }
        flat
    }
}

impl ConditionTranslator for NnfTranslator {
    fn transform(&mut self, repo: &mut PDDLRepository, index: ConditionIndex) -> ConditionIndex {
        let node = repo.get_condition(index).clone();
        match node {
            Condition::Literal(_) => index,
            Condition::Not(inner) => self.push_negation(repo, inner),
            Condition::And(children) => {
                let transformed: Vec<_> = children.iter().map(|&c| self.transform(repo, c)).collect();
                let flat = Self::flatten_and(repo, &transformed);
                repo.insert_and(flat)
            }
            Condition::Or(children) => {
                let transformed: Vec<_> = children.iter().map(|&c| self.transform(repo, c)).collect();
                let flat = Self::flatten_or(repo, &transformed);
                repo.insert_or(flat)
            }
            // A→B ≡ ¬A∨B
            Condition::Imply(a, b) => {
                let not_a = self.push_negation(repo, a);
                let b2 = self.transform(repo, b);
                repo.insert_or(vec![not_a, b2])
            }
            Condition::Exists(mut vars, inner) => {
                let new_inner = self.transform(repo, inner);
                // Merge nested Exists that share quantifier kind.
                if let Condition::Exists(inner_vars, doubly_inner) = repo.get_condition(new_inner).clone() {
                    vars.extend(inner_vars);
                    repo.insert_condition(Condition::Exists(vars, doubly_inner))
                } else {
                    repo.insert_condition(Condition::Exists(vars, new_inner))
                }
            }
            Condition::Forall(mut vars, inner) => {
                let new_inner = self.transform(repo, inner);
                if let Condition::Forall(inner_vars, doubly_inner) = repo.get_condition(new_inner).clone() {
                    vars.extend(inner_vars);
                    repo.insert_condition(Condition::Forall(vars, doubly_inner))
                } else {
                    repo.insert_condition(Condition::Forall(vars, new_inner))
                }
            }
        }
    }

    fn run(&mut self, repo: &mut PDDLRepository, root: ConditionIndex) -> ConditionIndex {
        let mut current = root;
        loop {
            let translated = self.transform(repo, current);
            if translated == current {
                return translated;
            }
            current = translated;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formalism::{Atom, Literal, PredicateSchema};

    fn lit(repo: &mut PDDLRepository, name: &str, polarity: bool) -> ConditionIndex {
        let p = repo.insert_predicate(PredicateSchema { name: name.into(), arity: 0 });
        let atom = repo.insert_atom(Atom { predicate: p, terms: vec![] });
        let literal = repo.insert_literal(Literal { atom, polarity });
        repo.insert_condition(Condition::Literal(literal))
    }

    #[test]
    fn double_negation_cancels() {
        let mut repo = PDDLRepository::new();
        let p = lit(&mut repo, "p", true);
        let not_p = repo.insert_condition(Condition::Not(p));
        let not_not_p = repo.insert_condition(Condition::Not(not_p));

        let result = NnfTranslator.run(&mut repo, not_not_p);
        assert_eq!(result, p);
    }

    #[test]
    fn demorgan_and_under_negation_becomes_or_of_negations() {
        let mut repo = PDDLRepository::new();
        let p = lit(&mut repo, "p", true);
        let q = lit(&mut repo, "q", true);
        let and_pq = repo.insert_and(vec![p, q]);
        let not_and = repo.insert_condition(Condition::Not(and_pq));

        let result = NnfTranslator.run(&mut repo, not_and);
        match repo.get_condition(result) {
            Condition::Or(children) => assert_eq!(children.len(), 2),
            other => panic!("expected Or, got {:?}", other),
        }
    }

    #[test]
    fn nested_conjunctions_flatten() {
        let mut repo = PDDLRepository::new();
        let p = lit(&mut repo, "p", true);
        let q = lit(&mut repo, "q", true);
        let r = lit(&mut repo, "r", true);
        let inner = repo.insert_and(vec![p, q]);
        let outer = repo.insert_and(vec![inner, r]);

        let result = NnfTranslator.run(&mut repo, outer);
        match repo.get_condition(result) {
            Condition::And(children) => assert_eq!(children.len(), 3),
            other => panic!("expected flattened And, got {:?}", other),
        }
    }

    #[test]
    fn translator_is_idempotent_after_first_pass() {
        let mut repo = PDDLRepository::new();
        let p = lit(&mut repo, "p", true);
        let q = lit(&mut repo, "q", true);
        let and_pq = repo.insert_and(vec![p, q]);
        let not_and = repo.insert_condition(Condition::Not(and_pq));

        let mut cached = super::super::framework::CachedRecursiveTranslator::new(NnfTranslator);
        cached.assert_idempotent(&mut repo, not_and);
    }
}
