//! Remove-universal-quantifiers translator (spec §4.I.3): replaces
//! `∀x.φ` in preconditions and goals with a fresh derived predicate whose
//! axiom body encodes `¬∃x.¬φ` after NNF, adding the axiom to the domain.
//!
//! This pass needs a `Domain` to append generated axioms to, which
//! `ConditionTranslator::transform`'s signature doesn't carry, so it is
//! written as a plain recursive function in the translator's style rather
//! than forced through that trait.

use crate::formalism::{
    Atom, Axiom, Condition, ConditionIndex, Domain, Literal, PDDLRepository, PredicateKind, PredicateSchema, VariableIndex,
};

use super::framework::ConditionTranslator;
use super::to_nnf::NnfTranslator;

#[derive(Default)]
pub struct RemoveUniversalQuantifiersTranslator {
    next_derived_id: usize,
}

impl RemoveUniversalQuantifiersTranslator {
    pub fn run(&mut self, repo: &mut PDDLRepository, domain: &mut Domain, index: ConditionIndex) -> ConditionIndex {
        let node = repo.get_condition(index).clone();
        match node {
            Condition::Literal(_) => index,
            Condition::And(children) => {
                let new_children: Vec<_> = children.iter().map(|&c| self.run(repo, domain, c)).collect();
                repo.insert_and(new_children)
            }
            Condition::Or(children) => {
                let new_children: Vec<_> = children.iter().map(|&c| self.run(repo, domain, c)).collect();
                repo.insert_or(new_children)
            }
            Condition::Not(inner) => {
                let new_inner = self.run(repo, domain, inner);
                repo.insert_condition(Condition::Not(new_inner))
            }
            Condition::Exists(vars, inner) => {
                let new_inner = self.run(repo, domain, inner);
                repo.insert_condition(Condition::Exists(vars, new_inner))
            }
            Condition::Imply(a, b) => {
                let new_a = self.run(repo, domain, a);
                let new_b = self.run(repo, domain, b);
                repo.insert_condition(Condition::Imply(new_a, new_b))
            }
            Condition::Forall(vars, inner) => {
                let new_inner = self.run(repo, domain, inner);
                self.make_axiom(repo, domain, vars, new_inner)
            }
        }
    }

    /// `∀x.φ ≡ ¬∃x.¬φ`: builds the axiom whose body is `∃x.¬φ` (after
    /// NNF) and whose head is a negated derived literal, then returns a
    /// positive literal condition over that derived predicate standing in
    /// for the original `Forall`.
    fn make_axiom(
        &mut self,
        repo: &mut PDDLRepository,
        domain: &mut Domain,
        vars: Vec<VariableIndex>,
        body: ConditionIndex,
    ) -> ConditionIndex {
        let negated_body = {
            let wrapped = repo.insert_condition(Condition::Not(body));
            NnfTranslator.run(repo, wrapped)
        };
        let exists_not_body = repo.insert_condition(Condition::Exists(vars, negated_body));

        self.next_derived_id += 1;
        let predicate = repo.insert_domain_predicate(
            domain,
            PredicateSchema { name: format!("derived_forall_{}", self.next_derived_id), arity: 0 },
            PredicateKind::Derived,
        );
        let head_atom = repo.insert_atom(Atom { predicate, terms: vec![] });
        let head_literal = repo.insert_literal(Literal { atom: head_atom, polarity: false });

        let axiom = Axiom {
            parameters: vec![],
            literal: head_literal,
            condition: exists_not_body,
        };
        let axiom_index = repo.insert_axiom(axiom);
        domain.axioms.push(axiom_index);

        let positive_literal = repo.insert_literal(Literal { atom: head_atom, polarity: true });
        repo.insert_condition(Condition::Literal(positive_literal))
    }
}
