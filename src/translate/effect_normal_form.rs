//! Effect-normal-form translator (spec §4.I.4): rewrites an action's effect
//! into a homogeneous split of an unconditional [`EffectStrips`] plus a list
//! of [`EffectConditional`]s, each `forall params. condition -> literal`.

use crate::formalism::{Action, EffectConditional, LiteralIndex, PDDLRepository, VariableIndex};

/// A still-unnormalized effect tree, as it comes out of parsing: either a
/// plain literal, a conjunction of sub-effects, a quantified sub-effect, or
/// a conditionally-guarded sub-effect.
#[derive(Debug, Clone)]
pub enum RawEffect {
    Literal(LiteralIndex),
    And(Vec<RawEffect>),
    Forall(Vec<VariableIndex>, Box<RawEffect>),
    When(Vec<LiteralIndex>, Box<RawEffect>),
}

#[derive(Debug, Default)]
pub struct EffectNormalFormTranslator;

impl EffectNormalFormTranslator {
    /// Flattens `effect` into the strips/conditional split and writes the
    /// result onto `action`.
    pub fn run(&mut self, repo: &mut PDDLRepository, action: &mut Action, effect: &RawEffect) {
        let mut unconditional = Vec::new();
        let mut conditionals = Vec::new();
        self.collect(repo, effect, &[], &[], &mut unconditional, &mut conditionals);

        action.strips_effect = repo.insert_effect_strips(unconditional);
        action.conditional_effects = conditionals
            .into_iter()
            .map(|(parameters, condition, literals)| {
                let strips = repo.insert_effect_strips(literals);
                repo.insert_effect_conditional(EffectConditional {
                    parameters,
                    condition,
                    effect: strips,
                })
            })
            .collect();
    }

    fn collect(
        &mut self,
        repo: &mut PDDLRepository,
        effect: &RawEffect,
        parameters: &[VariableIndex],
        condition: &[LiteralIndex],
        unconditional: &mut Vec<LiteralIndex>,
        conditionals: &mut Vec<(Vec<VariableIndex>, Vec<LiteralIndex>, Vec<LiteralIndex>)>,
    ) {
        match effect {
            RawEffect::Literal(lit) => {
                if parameters.is_empty() && condition.is_empty() {
                    unconditional.push(*lit);
                } else {
                    conditionals.push((parameters.to_vec(), condition.to_vec(), vec![*lit]));
                }
            }
            RawEffect::And(parts) => {
                for part in parts {
                    self.collect(repo, part, parameters, condition, unconditional, conditionals);
                }
            }
            RawEffect::Forall(vars, inner) => {
                let mut combined_params = parameters.to_vec();
                combined_params.extend(vars.iter().copied());
                self.collect(repo, inner, &combined_params, condition, unconditional, conditionals);
            }
            RawEffect::When(cond_literals, inner) => {
                let mut combined_condition = condition.to_vec();
                combined_condition.extend(cond_literals.iter().copied());
                self.collect(repo, inner, parameters, &combined_condition, unconditional, conditionals);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formalism::{Atom, EffectStripsIndex, Literal, PredicateSchema};

    fn lit(repo: &mut PDDLRepository, name: &str) -> LiteralIndex {
        let p = repo.insert_predicate(PredicateSchema { name: name.into(), arity: 0 });
        let atom = repo.insert_atom(Atom { predicate: p, terms: vec![] });
        repo.insert_literal(Literal { atom, polarity: true })
    }

    fn blank_action() -> Action {
        Action {
            name: "a".into(),
            parameters: vec![],
            precondition: None,
            strips_effect: EffectStripsIndex::new(0),
            conditional_effects: vec![],
            cost: None,
        }
    }

    #[test]
    fn plain_conjunction_becomes_one_strips_effect() {
        let mut repo = PDDLRepository::new();
        let l1 = lit(&mut repo, "p");
        let l2 = lit(&mut repo, "q");
        let raw = RawEffect::And(vec![RawEffect::Literal(l1), RawEffect::Literal(l2)]);
        let mut action = blank_action();

        EffectNormalFormTranslator.run(&mut repo, &mut action, &raw);
        assert!(action.conditional_effects.is_empty());
        assert_eq!(repo.get_effect_strips(action.strips_effect).literals.len(), 2);
    }

    #[test]
    fn when_guarded_literal_becomes_a_conditional_effect() {
        let mut repo = PDDLRepository::new();
        let guard = lit(&mut repo, "guard");
        let consequence = lit(&mut repo, "consequence");
        let raw = RawEffect::When(vec![guard], Box::new(RawEffect::Literal(consequence)));
        let mut action = blank_action();

        EffectNormalFormTranslator.run(&mut repo, &mut action, &raw);
        assert_eq!(action.conditional_effects.len(), 1);
        let cond = repo.get_effect_conditional(action.conditional_effects[0]);
        assert_eq!(cond.condition, vec![guard]);
    }

    #[test]
    fn forall_guarded_literal_carries_its_parameters() {
        let mut repo = PDDLRepository::new();
        let v = repo.insert_variable(crate::formalism::Variable { name: "?x".into(), types: vec![] });
        let consequence = lit(&mut repo, "consequence");
        let raw = RawEffect::Forall(vec![v], Box::new(RawEffect::Literal(consequence)));
        let mut action = blank_action();

        EffectNormalFormTranslator.run(&mut repo, &mut action, &raw);
        assert_eq!(action.conditional_effects.len(), 1);
        let cond = repo.get_effect_conditional(action.conditional_effects[0]);
        assert_eq!(cond.parameters, vec![v]);
    }
}
