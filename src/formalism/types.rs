//! Symbolic entity types of the PDDL data model (spec §3), interned by
//! [`super::repository::PDDLRepository`] and its per-kind factories.
//!
//! Every entity owns only interned handles to its children (`Index`
//! newtypes below) — deep structural comparison is never needed again
//! once a value has passed through a factory's `insert`, matching the
//! "Entities own only interned handles to their children" rule of §4.G.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! index_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            pub fn as_usize(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

index_type!(VariableIndex);
index_type!(ObjectIndex);
index_type!(TermIndex);
index_type!(PredicateIndex);
index_type!(AtomIndex);
index_type!(GroundAtomIndex);
index_type!(LiteralIndex);
index_type!(GroundLiteralIndex);
index_type!(FunctionSkeletonIndex);
index_type!(FunctionIndex);
index_type!(GroundFunctionIndex);
index_type!(FunctionExpressionIndex);
index_type!(GroundFunctionExpressionIndex);
index_type!(NumericFluentIndex);
index_type!(ConditionIndex);
index_type!(EffectStripsIndex);
index_type!(EffectConditionalIndex);
index_type!(ActionIndex);
index_type!(AxiomIndex);

bitflags::bitflags! {
    /// PDDL requirement flags (spec §3), recorded once per domain/problem.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Requirements: u32 {
        const STRIPS               = 1 << 0;
        const TYPING               = 1 << 1;
        const NEGATIVE_PRECONDITIONS = 1 << 2;
        const DISJUNCTIVE_PRECONDITIONS = 1 << 3;
        const EQUALITY              = 1 << 4;
        const EXISTENTIAL_PRECONDITIONS = 1 << 5;
        const UNIVERSAL_PRECONDITIONS = 1 << 6;
        const CONDITIONAL_EFFECTS   = 1 << 7;
        const NUMERIC_FLUENTS       = 1 << 8;
        const DERIVED_PREDICATES    = 1 << 9;
        const ACTION_COSTS          = 1 << 10;
    }
}

/// A parameter variable, e.g. `?x` in an action signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    pub name: String,
    /// Ancestor type names, emptied by the remove-types translator (§4.I.1).
    pub types: Vec<String>,
}

/// A domain/problem constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Object {
    pub name: String,
    pub types: Vec<String>,
}

/// Either a bound variable or a constant object, as it appears in an atom's
/// argument list before grounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(VariableIndex),
    Object(ObjectIndex),
}

/// A predicate schema: name plus arity (parameter list length).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateSchema {
    pub name: String,
    pub arity: usize,
}

/// A lifted atom `p(t1, ..., tn)` over possibly-variable terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    pub predicate: PredicateIndex,
    pub terms: Vec<Term>,
}

/// A ground atom `p(o1, ..., on)` over objects only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroundAtom {
    pub predicate: PredicateIndex,
    pub objects: Vec<ObjectIndex>,
}

/// A (possibly negated) lifted literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub atom: AtomIndex,
    pub polarity: bool,
}

/// A (possibly negated) ground literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroundLiteral {
    pub atom: GroundAtomIndex,
    pub polarity: bool,
}

/// A numeric function schema, e.g. `(total-cost)` or `(distance ?a ?b)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSkeleton {
    pub name: String,
    pub arity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub skeleton: FunctionSkeletonIndex,
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroundFunction {
    pub skeleton: FunctionSkeletonIndex,
    pub objects: Vec<ObjectIndex>,
}

/// A numeric expression over lifted functions, canonicalized by §4.G's
/// rule that commutative operators sort operands `(min, max)` by child
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionExpression {
    Number(OrderedFloat<f64>),
    Function(FunctionIndex),
    Add(FunctionExpressionIndex, FunctionExpressionIndex),
    Multiply(FunctionExpressionIndex, FunctionExpressionIndex),
    Subtract(FunctionExpressionIndex, FunctionExpressionIndex),
    Divide(FunctionExpressionIndex, FunctionExpressionIndex),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroundFunctionExpression {
    Number(OrderedFloat<f64>),
    Function(GroundFunctionIndex),
    Add(GroundFunctionExpressionIndex, GroundFunctionExpressionIndex),
    Multiply(GroundFunctionExpressionIndex, GroundFunctionExpressionIndex),
    Subtract(GroundFunctionExpressionIndex, GroundFunctionExpressionIndex),
    Divide(GroundFunctionExpressionIndex, GroundFunctionExpressionIndex),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericFluent {
    pub function: GroundFunctionIndex,
    pub value: OrderedFloat<f64>,
}

/// A lifted precondition/goal condition, already assumed to be in negation
/// normal form by the time search or later translators consume it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    Literal(LiteralIndex),
    And(Vec<ConditionIndex>),
    Or(Vec<ConditionIndex>),
    Not(ConditionIndex),
    Exists(Vec<VariableIndex>, ConditionIndex),
    Forall(Vec<VariableIndex>, ConditionIndex),
    Imply(ConditionIndex, ConditionIndex),
}

/// A single unconditional effect literal, the atomic unit produced by the
/// effect-normal-form translator (§4.I.4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectStrips {
    pub literals: Vec<LiteralIndex>,
}

/// A conditional effect: `forall params. condition -> effect` (§4.I.4).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectConditional {
    pub parameters: Vec<VariableIndex>,
    pub condition: Vec<LiteralIndex>,
    pub effect: EffectStripsIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub name: String,
    pub parameters: Vec<VariableIndex>,
    pub precondition: Option<ConditionIndex>,
    pub strips_effect: EffectStripsIndex,
    pub conditional_effects: Vec<EffectConditionalIndex>,
    pub cost: Option<FunctionExpressionIndex>,
}

/// A derived predicate's defining rule: `head :- body`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Axiom {
    pub parameters: Vec<VariableIndex>,
    pub literal: LiteralIndex,
    pub condition: ConditionIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptimizationMetric {
    Minimize(FunctionExpressionIndex),
    Maximize(FunctionExpressionIndex),
}

#[derive(Debug, Clone, Default)]
pub struct Domain {
    pub name: String,
    pub requirements: Option<Requirements>,
    pub predicates: Vec<PredicateIndex>,
    pub static_predicates: Vec<PredicateIndex>,
    pub derived_predicates: Vec<PredicateIndex>,
    pub function_skeletons: Vec<FunctionSkeletonIndex>,
    pub actions: Vec<ActionIndex>,
    pub axioms: Vec<AxiomIndex>,
}

#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub name: String,
    pub objects: Vec<ObjectIndex>,
    pub initial_literals: Vec<GroundLiteralIndex>,
    pub initial_fluents: Vec<NumericFluentIndex>,
    pub goal: Vec<LiteralIndex>,
    pub metric: Option<OptimizationMetric>,
}
