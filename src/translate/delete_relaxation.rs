//! Delete-relaxation translator (spec §4.I.6): drops every negative effect
//! literal from an action's strips effect and from each conditional effect,
//! producing the relaxed action set a blind/delete-relaxation heuristic
//! consumes (spec §11's delete-relaxation consumer; the heuristic itself
//! stays a non-goal).

use crate::formalism::{Action, Domain, EffectConditional, EffectStrips, PDDLRepository};

#[derive(Debug, Default)]
pub struct DeleteRelaxationTranslator;

impl DeleteRelaxationTranslator {
    /// Builds a relaxed copy of `domain` where every action's effects keep
    /// only their positive literals. Preconditions and axioms are left
    /// untouched: delete relaxation only ever drops effects.
    pub fn relax(&mut self, repo: &mut PDDLRepository, domain: &Domain) -> Domain {
        let actions = domain
            .actions
            .iter()
            .map(|&action_index| {
                let action = repo.get_action(action_index).clone();
                let relaxed = self.relax_action(repo, &action);
                repo.insert_action(relaxed)
            })
            .collect();

        Domain {
            name: domain.name.clone(),
            requirements: domain.requirements,
            predicates: domain.predicates.clone(),
            static_predicates: domain.static_predicates.clone(),
            derived_predicates: domain.derived_predicates.clone(),
            function_skeletons: domain.function_skeletons.clone(),
            actions,
            axioms: domain.axioms.clone(),
        }
    }

    fn relax_action(&mut self, repo: &mut PDDLRepository, action: &Action) -> Action {
        let strips = repo.get_effect_strips(action.strips_effect).clone();
        let relaxed_strips = self.relax_literals(repo, &strips);
        let relaxed_strips_index = repo.insert_effect_strips(relaxed_strips.literals);

        let conditional_effects = action
            .conditional_effects
            .iter()
            .map(|&ce_index| {
                let ce = repo.get_effect_conditional(ce_index).clone();
                let effect = repo.get_effect_strips(ce.effect).clone();
                let relaxed = self.relax_literals(repo, &effect);
                let relaxed_effect = repo.insert_effect_strips(relaxed.literals);
                repo.insert_effect_conditional(EffectConditional {
                    parameters: ce.parameters,
                    condition: ce.condition,
                    effect: relaxed_effect,
                })
            })
            .collect();

        Action {
            name: action.name.clone(),
            parameters: action.parameters.clone(),
            precondition: action.precondition,
            strips_effect: relaxed_strips_index,
            conditional_effects,
            cost: action.cost,
        }
    }

    fn relax_literals(&self, repo: &PDDLRepository, strips: &EffectStrips) -> EffectStrips {
        let literals = strips
            .literals
            .iter()
            .copied()
            .filter(|&lit| repo.get_literal(lit).polarity)
            .collect();
        EffectStrips { literals }
    }
}
