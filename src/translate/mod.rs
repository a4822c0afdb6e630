//! Condition/effect translators (spec §4.H/§4.I): a small rewrite pipeline
//! over the interned [`crate::formalism`] tree, run in the fixed pipeline
//! order a PDDL front end needs them in: strip types, push to NNF, eliminate
//! universal quantifiers into axioms, normalize effects, dualize negative
//! literals, then optionally relax for a delete-relaxation consumer.

pub mod delete_relaxation;
pub mod effect_normal_form;
pub mod framework;
pub mod positive_normal_form;
pub mod remove_types;
pub mod remove_universal_quantifiers;
pub mod to_nnf;

pub use delete_relaxation::DeleteRelaxationTranslator;
pub use effect_normal_form::{EffectNormalFormTranslator, RawEffect};
pub use framework::{recurse, CachedRecursiveTranslator, ConditionTranslator};
pub use positive_normal_form::PositiveNormalFormTranslator;
pub use remove_types::RemoveTypesTranslator;
pub use remove_universal_quantifiers::RemoveUniversalQuantifiersTranslator;
pub use to_nnf::NnfTranslator;
