//! End-to-end scenarios exercising the translator pipeline through the
//! public crate API, one test per concrete scenario that isn't already
//! covered by a module's own unit tests.

use mimir_planning::formalism::{
    Atom, Condition, Domain, GroundLiteral, Literal, Object, PDDLRepository, PredicateSchema, Problem, Variable,
};
use mimir_planning::translate::{ConditionTranslator, NnfTranslator, RemoveTypesTranslator};

/// Scenario 3: a typed domain where object `b` has types `{ball, portable}`;
/// after remove-types the initial state must contain `ball(b)` and
/// `portable(b)` as static ground literals, and the object's own type list
/// must be empty.
#[test]
fn remove_types_asserts_ancestor_type_facts_in_initial_state() {
    let mut repo = PDDLRepository::new();
    let mut domain = Domain::default();
    let b = repo.insert_object(Object { name: "b".into(), types: vec!["ball".into(), "portable".into()] });
    let mut problem = Problem { name: "p".into(), objects: vec![b], ..Problem::default() };

    let type_facts = RemoveTypesTranslator.run(&mut repo, &mut domain, &mut problem);
    for atom in type_facts {
        let literal_index = repo.insert_ground_literal(GroundLiteral { atom, polarity: true });
        problem.initial_literals.push(literal_index);
    }

    let asserted: Vec<String> = problem
        .initial_literals
        .iter()
        .map(|&l| {
            let ground_literal = repo.get_ground_literal(l);
            let ground_atom = repo.get_ground_atom(ground_literal.atom);
            repo.get_predicate(ground_atom.predicate).name.clone()
        })
        .collect();

    assert!(asserted.contains(&"type_ball".to_string()));
    assert!(asserted.contains(&"type_portable".to_string()));

    // `problem.objects[0]` was rewritten in place by `run`; the original
    // fully-typed `b` is no longer what the problem points at.
    assert_eq!(repo.get_object(problem.objects[0]).types.len(), 0);
    assert!(domain.static_predicates.len() >= 2);
}

fn predicate_literal(repo: &mut PDDLRepository, name: &str, var: mimir_planning::formalism::VariableIndex, polarity: bool) -> mimir_planning::formalism::ConditionIndex {
    let predicate = repo.insert_predicate(PredicateSchema { name: name.into(), arity: 1 });
    let atom = repo.insert_atom(Atom { predicate, terms: vec![mimir_planning::formalism::Term::Variable(var)] });
    let literal = repo.insert_literal(Literal { atom, polarity });
    repo.insert_condition(Condition::Literal(literal))
}

/// Scenario 4: translate `¬(∀x. on(x,a) ∨ clear(x))` through NNF; the
/// result must be `∃x. ¬on(x,a) ∧ ¬clear(x)` (modulo flattening).
#[test]
fn nnf_pushes_negation_through_forall_and_or() {
    let mut repo = PDDLRepository::new();
    let x = repo.insert_variable(Variable { name: "x".into(), types: vec![] });

    let on_x = predicate_literal(&mut repo, "on", x, true);
    let clear_x = predicate_literal(&mut repo, "clear", x, true);
    let disjunction = repo.insert_or(vec![on_x, clear_x]);
    let quantified = repo.insert_condition(Condition::Forall(vec![x], disjunction));
    let negated = repo.insert_condition(Condition::Not(quantified));

    let result = NnfTranslator.run(&mut repo, negated);

    match repo.get_condition(result).clone() {
        Condition::Exists(vars, inner) => {
            assert_eq!(vars, vec![x]);
            match repo.get_condition(inner).clone() {
                Condition::And(children) => {
                    assert_eq!(children.len(), 2);
                    for child in children {
                        match repo.get_condition(child) {
                            Condition::Literal(lit_index) => {
                                let literal = repo.get_literal(*lit_index);
                                assert!(!literal.polarity, "expected a negated literal");
                            }
                            other => panic!("expected a literal child, got {other:?}"),
                        }
                    }
                }
                other => panic!("expected And under the Exists, got {other:?}"),
            }
        }
        other => panic!("expected Exists at the root, got {other:?}"),
    }
}
