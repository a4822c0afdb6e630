//! Remove-types translator (spec §4.I.1): replaces a typed object's or
//! parameter's type annotation with an explicit unary fact `type_t(x)` per
//! ancestor type, so later stages never need to consult a type hierarchy.

use crate::formalism::{
    Action, Atom, Axiom, Condition, ConditionIndex, Domain, GroundAtom, GroundAtomIndex, Literal, Object,
    PDDLRepository, PredicateIndex, PredicateKind, PredicateSchema, Problem, Term, Variable, VariableIndex,
};

#[derive(Debug, Default)]
pub struct RemoveTypesTranslator;

impl RemoveTypesTranslator {
    /// Strips every object's type list (folding the resulting `type_t`
    /// facts into the caller's initial state) and every action/axiom
    /// parameter's type list (folding the resulting `type_t` literals into
    /// the owning precondition/body), so no later stage needs to consult a
    /// type hierarchy.
    pub fn run(&mut self, repo: &mut PDDLRepository, domain: &mut Domain, problem: &mut Problem) -> Vec<GroundAtomIndex> {
        let mut type_facts = Vec::new();
        for i in 0..problem.objects.len() {
            let object_index = problem.objects[i];
            let object = repo.get_object(object_index).clone();
            for type_name in &object.types {
                let predicate = self.type_predicate(repo, domain, type_name);
                let ground = repo.insert_ground_atom(GroundAtom { predicate, objects: vec![object_index] });
                type_facts.push(ground);
            }
            let stripped = Object { name: object.name, types: Vec::new() };
            problem.objects[i] = repo.insert_object(stripped);
        }

        for i in 0..domain.actions.len() {
            let action_index = domain.actions[i];
            let action = repo.get_action(action_index).clone();
            let (parameters, precondition) =
                self.strip_parameters(repo, domain, action.parameters, action.precondition);
            domain.actions[i] = repo.insert_action(Action { parameters, precondition, ..action });
        }

        for i in 0..domain.axioms.len() {
            let axiom_index = domain.axioms[i];
            let axiom = repo.get_axiom(axiom_index).clone();
            let (parameters, condition) =
                self.strip_parameters(repo, domain, axiom.parameters, Some(axiom.condition));
            let condition = condition.expect("an axiom always carries a condition");
            domain.axioms[i] = repo.insert_axiom(Axiom { parameters, condition, ..axiom });
        }

        type_facts
    }

    /// Interns the static `type_t` predicate for `type_name`. These
    /// predicates never appear in an effect, so they're static rather than
    /// fluent.
    fn type_predicate(&mut self, repo: &mut PDDLRepository, domain: &mut Domain, type_name: &str) -> PredicateIndex {
        repo.insert_domain_predicate(
            domain,
            PredicateSchema { name: format!("type_{type_name}"), arity: 1 },
            PredicateKind::Static,
        )
    }

    /// Strips every parameter's type annotation, conjoining a
    /// `type_t(param)` literal per ancestor type into `condition` (an
    /// action's precondition or an axiom's body).
    fn strip_parameters(
        &mut self,
        repo: &mut PDDLRepository,
        domain: &mut Domain,
        parameters: Vec<VariableIndex>,
        condition: Option<ConditionIndex>,
    ) -> (Vec<VariableIndex>, Option<ConditionIndex>) {
        let mut stripped_parameters = Vec::with_capacity(parameters.len());
        let mut type_literals = Vec::new();
        for parameter in parameters {
            let variable = repo.get_variable(parameter).clone();
            let (stripped, type_names) = self.strip_parameter(repo, &variable);
            let stripped_index = repo.insert_variable(stripped);
            stripped_parameters.push(stripped_index);
            for type_name in type_names {
                let predicate = self.type_predicate(repo, domain, &type_name);
                let atom = repo.insert_atom(Atom { predicate, terms: vec![Term::Variable(stripped_index)] });
                let literal = repo.insert_literal(Literal { atom, polarity: true });
                type_literals.push(repo.insert_condition(Condition::Literal(literal)));
            }
        }

        let combined = if type_literals.is_empty() {
            condition
        } else {
            if let Some(existing) = condition {
                type_literals.push(existing);
            }
            Some(repo.insert_and(type_literals))
        };
        (stripped_parameters, combined)
    }

    /// Strips a single parameter's type annotation, returning the type
    /// names it carried so the caller can emit the corresponding
    /// precondition literals for an action/axiom parameter.
    fn strip_parameter(&mut self, _repo: &mut PDDLRepository, variable: &Variable) -> (Variable, Vec<String>) {
        (
            Variable { name: variable.name.clone(), types: Vec::new() },
            variable.types.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formalism::{Object, PredicateSchema};

    #[test]
    fn typed_object_gets_one_fact_per_ancestor_type_and_loses_its_own_type_list() {
        let mut repo = PDDLRepository::new();
        let mut domain = Domain::default();
        let mut problem = Problem::default();
        let obj = repo.insert_object(Object {
            name: "block1".into(),
            types: vec!["block".into(), "physical-object".into()],
        });
        problem.objects.push(obj);

        let facts = RemoveTypesTranslator.run(&mut repo, &mut domain, &mut problem);
        assert_eq!(facts.len(), 2);
        for f in &facts {
            assert!(repo.get_ground_atom(*f).objects.contains(&obj));
        }

        assert_eq!(repo.get_object(problem.objects[0]).types.len(), 0);
        assert_eq!(domain.predicates.len(), 2);
        assert_eq!(domain.static_predicates.len(), 2);
    }

    #[test]
    fn typed_action_parameter_gets_a_type_precondition_and_loses_its_type_list() {
        let mut repo = PDDLRepository::new();
        let mut domain = Domain::default();
        let mut problem = Problem::default();

        let param = repo.insert_variable(Variable { name: "?x".into(), types: vec!["ball".into()] });
        let holding = repo.insert_predicate(PredicateSchema { name: "holding".into(), arity: 1 });
        let atom = repo.insert_atom(Atom { predicate: holding, terms: vec![Term::Variable(param)] });
        let literal = repo.insert_literal(Literal { atom, polarity: true });
        let precondition = repo.insert_condition(Condition::Literal(literal));

        let strips_effect = repo.insert_effect_strips(vec![]);
        let action = repo.insert_action(Action {
            name: "pick-up".into(),
            parameters: vec![param],
            precondition: Some(precondition),
            strips_effect,
            conditional_effects: vec![],
            cost: None,
        });
        domain.actions.push(action);

        RemoveTypesTranslator.run(&mut repo, &mut domain, &mut problem);

        let stripped_action = repo.get_action(domain.actions[0]).clone();
        let stripped_param = repo.get_variable(stripped_action.parameters[0]);
        assert_eq!(stripped_param.types.len(), 0);

        match repo.get_condition(stripped_action.precondition.unwrap()) {
            Condition::And(children) => assert_eq!(children.len(), 2),
            other => panic!("expected the type literal conjoined with the original precondition, got {other:?}"),
        }
        assert!(domain.predicates.iter().any(|&p| repo.get_predicate(p).name == "type_ball"));
    }
}
