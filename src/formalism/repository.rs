//! The PDDL repository (spec §4.G): one interning factory per entity kind,
//! grounded on the teacher's `catalog.rs` (one map per relation, generalized
//! here to one hash-consing factory per symbolic entity kind instead of one
//! schema per relation name).
//!
//! Insertion always canonicalizes before hashing: conjunctions/disjunctions
//! and effect/literal lists are sorted by child index, and commutative
//! binary function expressions swap operands to `(min, max)` by child
//! index, so two syntactically different but semantically identical
//! entities always intern to the same handle.

use crate::valla::IndexedHashSet;

use super::types::*;

macro_rules! factory {
    ($field:ident, $index:ty, $key:ty, $insert_fn:ident, $get_fn:ident) => {
        pub fn $insert_fn(&mut self, value: $key) -> $index {
            let (idx, _) = self.$field.insert(value);
            <$index>::new(idx as u32)
        }

        pub fn $get_fn(&self, index: $index) -> &$key {
            self.$field.get_by_index(index.as_usize())
        }
    };
}

// `index_type!` in `types.rs` doesn't derive a `new` constructor (it keeps
// the field public for pattern-matching convenience elsewhere), so give
// every index kind one here rather than repeating `VariableIndex(idx)` et
// al. inside the macro above.
macro_rules! index_new {
    ($name:ident) => {
        impl $name {
            pub fn new(raw: u32) -> Self {
                $name(raw)
            }
        }
    };
}

index_new!(VariableIndex);
index_new!(ObjectIndex);
index_new!(PredicateIndex);
index_new!(AtomIndex);
index_new!(GroundAtomIndex);
index_new!(LiteralIndex);
index_new!(GroundLiteralIndex);
index_new!(FunctionSkeletonIndex);
index_new!(FunctionIndex);
index_new!(GroundFunctionIndex);
index_new!(FunctionExpressionIndex);
index_new!(GroundFunctionExpressionIndex);
index_new!(NumericFluentIndex);
index_new!(ConditionIndex);
index_new!(EffectStripsIndex);
index_new!(EffectConditionalIndex);
index_new!(ActionIndex);
index_new!(AxiomIndex);

/// A predicate's behavior under action effects (spec §3's `Predicate<P>`
/// with `P∈{Static,Fluent,Derived}`): static predicates never appear as an
/// effect literal, fluent predicates are toggled by effects, derived
/// predicates are defined by an axiom body instead of by any effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKind {
    Static,
    Fluent,
    Derived,
}

/// One hash-consing factory per symbolic entity kind. Every factory is the
/// §4.D indexed hash-identity map specialized to that kind's structural
/// equality.
#[derive(Debug, Default)]
pub struct PDDLRepository {
    variables: IndexedHashSet<Variable>,
    objects: IndexedHashSet<Object>,
    predicates: IndexedHashSet<PredicateSchema>,
    atoms: IndexedHashSet<Atom>,
    ground_atoms: IndexedHashSet<GroundAtom>,
    literals: IndexedHashSet<Literal>,
    ground_literals: IndexedHashSet<GroundLiteral>,
    function_skeletons: IndexedHashSet<FunctionSkeleton>,
    functions: IndexedHashSet<Function>,
    ground_functions: IndexedHashSet<GroundFunction>,
    function_expressions: IndexedHashSet<FunctionExpression>,
    ground_function_expressions: IndexedHashSet<GroundFunctionExpression>,
    numeric_fluents: IndexedHashSet<NumericFluent>,
    conditions: IndexedHashSet<Condition>,
    effects_strips: IndexedHashSet<EffectStrips>,
    effects_conditional: IndexedHashSet<EffectConditional>,
    actions: IndexedHashSet<Action>,
    axioms: IndexedHashSet<Axiom>,
}

impl PDDLRepository {
    pub fn new() -> Self {
        Self::default()
    }

    factory!(variables, VariableIndex, Variable, insert_variable, get_variable);
    factory!(objects, ObjectIndex, Object, insert_object, get_object);
    factory!(predicates, PredicateIndex, PredicateSchema, insert_predicate, get_predicate);
    factory!(ground_atoms, GroundAtomIndex, GroundAtom, insert_ground_atom_raw, get_ground_atom);
    factory!(literals, LiteralIndex, Literal, insert_literal, get_literal);
    factory!(ground_literals, GroundLiteralIndex, GroundLiteral, insert_ground_literal, get_ground_literal);
    factory!(function_skeletons, FunctionSkeletonIndex, FunctionSkeleton, insert_function_skeleton, get_function_skeleton);
    factory!(functions, FunctionIndex, Function, insert_function, get_function);
    factory!(ground_functions, GroundFunctionIndex, GroundFunction, insert_ground_function, get_ground_function);
    factory!(ground_function_expressions, GroundFunctionExpressionIndex, GroundFunctionExpression, insert_ground_function_expression_raw, get_ground_function_expression);
    factory!(numeric_fluents, NumericFluentIndex, NumericFluent, insert_numeric_fluent, get_numeric_fluent);
    factory!(effects_strips, EffectStripsIndex, EffectStrips, insert_effect_strips_raw, get_effect_strips);
    factory!(effects_conditional, EffectConditionalIndex, EffectConditional, insert_effect_conditional, get_effect_conditional);
    factory!(actions, ActionIndex, Action, insert_action, get_action);
    factory!(axioms, AxiomIndex, Axiom, insert_axiom, get_axiom);

    /// Interns `schema` and classifies it into `domain.predicates` plus the
    /// matching `domain.{static,derived}_predicates` list (spec §3's
    /// `Predicate<P>` with `P∈{Static,Fluent,Derived}`; a fluent predicate
    /// is tracked in `domain.predicates` only, since it belongs to neither
    /// of the other two lists).
    pub fn insert_domain_predicate(&mut self, domain: &mut Domain, schema: PredicateSchema, kind: PredicateKind) -> PredicateIndex {
        let predicate = self.insert_predicate(schema);
        if !domain.predicates.contains(&predicate) {
            domain.predicates.push(predicate);
        }
        let classified = match kind {
            PredicateKind::Static => &mut domain.static_predicates,
            PredicateKind::Derived => &mut domain.derived_predicates,
            PredicateKind::Fluent => return predicate,
        };
        if !classified.contains(&predicate) {
            classified.push(predicate);
        }
        predicate
    }

    /// Atoms are interned as given; argument order is part of their
    /// identity (not sorted — argument position is semantically
    /// significant, unlike a conjunction's child order).
    pub fn insert_atom(&mut self, atom: Atom) -> AtomIndex {
        let (idx, _) = self.atoms.insert(atom);
        AtomIndex::new(idx as u32)
    }

    pub fn get_atom(&self, index: AtomIndex) -> &Atom {
        self.atoms.get_by_index(index.as_usize())
    }

    /// Ground atoms over a sorted object list would lose argument-position
    /// meaning, so — like `insert_atom` — this does not reorder arguments.
    /// It is still subject to value-based hash-consing: two calls with
    /// identical `(predicate, objects)` intern to the same index.
    pub fn insert_ground_atom(&mut self, ground_atom: GroundAtom) -> GroundAtomIndex {
        self.insert_ground_atom_raw(ground_atom)
    }

    /// Interns a conjunction, sorting children by index first (§4.G:
    /// "conjunctions ... are sorted by child index") so that `A∧B` and
    /// `B∧A` intern to the same `Condition::And`.
    pub fn insert_and(&mut self, mut children: Vec<ConditionIndex>) -> ConditionIndex {
        children.sort_unstable();
        children.dedup();
        let (idx, _) = self.conditions.insert(Condition::And(children));
        ConditionIndex::new(idx as u32)
    }

    pub fn insert_or(&mut self, mut children: Vec<ConditionIndex>) -> ConditionIndex {
        children.sort_unstable();
        children.dedup();
        let (idx, _) = self.conditions.insert(Condition::Or(children));
        ConditionIndex::new(idx as u32)
    }

    pub fn insert_condition(&mut self, condition: Condition) -> ConditionIndex {
        let (idx, _) = self.conditions.insert(condition);
        ConditionIndex::new(idx as u32)
    }

    pub fn get_condition(&self, index: ConditionIndex) -> &Condition {
        self.conditions.get_by_index(index.as_usize())
    }

    /// Interns a function expression, canonicalizing commutative binary
    /// operators to `(min, max)` by child index (§4.G).
    pub fn insert_function_expression(&mut self, expr: FunctionExpression) -> FunctionExpressionIndex {
        let canonical = match expr {
            FunctionExpression::Add(a, b) => FunctionExpression::Add(a.min(b), a.max(b)),
            FunctionExpression::Multiply(a, b) => FunctionExpression::Multiply(a.min(b), a.max(b)),
            other => other,
        };
        let (idx, _) = self.function_expressions.insert(canonical);
        FunctionExpressionIndex::new(idx as u32)
    }

    pub fn get_function_expression(&self, index: FunctionExpressionIndex) -> &FunctionExpression {
        self.function_expressions.get_by_index(index.as_usize())
    }

    pub fn insert_ground_function_expression(&mut self, expr: GroundFunctionExpression) -> GroundFunctionExpressionIndex {
        let canonical = match expr {
            GroundFunctionExpression::Add(a, b) => GroundFunctionExpression::Add(a.min(b), a.max(b)),
            GroundFunctionExpression::Multiply(a, b) => GroundFunctionExpression::Multiply(a.min(b), a.max(b)),
            other => other,
        };
        self.insert_ground_function_expression_raw(canonical)
    }

    /// Interns an effect-literal bundle, sorted by literal index (§4.G:
    /// "effect bundles ... are sorted by child index").
    pub fn insert_effect_strips(&mut self, mut literals: Vec<LiteralIndex>) -> EffectStripsIndex {
        literals.sort_unstable();
        literals.dedup();
        self.insert_effect_strips_raw(EffectStrips { literals })
    }

    /// Diagnostic introspection (§11): a summary of how many entities of
    /// each kind have been interned, for logging and tests — not
    /// persistence.
    pub fn len_summary(&self) -> RepositorySizes {
        RepositorySizes {
            variables: self.variables.len(),
            objects: self.objects.len(),
            predicates: self.predicates.len(),
            atoms: self.atoms.len(),
            ground_atoms: self.ground_atoms.len(),
            literals: self.literals.len(),
            ground_literals: self.ground_literals.len(),
            conditions: self.conditions.len(),
            actions: self.actions.len(),
            axioms: self.axioms.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositorySizes {
    pub variables: usize,
    pub objects: usize,
    pub predicates: usize,
    pub atoms: usize,
    pub ground_atoms: usize,
    pub literals: usize,
    pub ground_literals: usize,
    pub conditions: usize,
    pub actions: usize,
    pub axioms: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_ground_atom_interns_to_the_same_index() {
        let mut repo = PDDLRepository::new();
        let p = repo.insert_predicate(PredicateSchema { name: "on".into(), arity: 2 });
        let a = repo.insert_object(Object { name: "a".into(), types: vec![] });
        let b = repo.insert_object(Object { name: "b".into(), types: vec![] });
        let g1 = repo.insert_ground_atom(GroundAtom { predicate: p, objects: vec![a, b] });
        let g2 = repo.insert_ground_atom(GroundAtom { predicate: p, objects: vec![a, b] });
        assert_eq!(g1, g2);
    }

    #[test]
    fn conjunction_is_order_independent() {
        let mut repo = PDDLRepository::new();
        let p = repo.insert_predicate(PredicateSchema { name: "p".into(), arity: 0 });
        let q = repo.insert_predicate(PredicateSchema { name: "q".into(), arity: 0 });
        let atom_p = repo.insert_atom(Atom { predicate: p, terms: vec![] });
        let atom_q = repo.insert_atom(Atom { predicate: q, terms: vec![] });
        let lit_p = repo.insert_literal(Literal { atom: atom_p, polarity: true });
        let lit_q = repo.insert_literal(Literal { atom: atom_q, polarity: true });
        let c_p = repo.insert_condition(Condition::Literal(lit_p));
        let c_q = repo.insert_condition(Condition::Literal(lit_q));

        let and1 = repo.insert_and(vec![c_p, c_q]);
        let and2 = repo.insert_and(vec![c_q, c_p]);
        assert_eq!(and1, and2);
    }

    #[test]
    fn commutative_function_expression_swaps_to_min_max() {
        let mut repo = PDDLRepository::new();
        let fs = repo.insert_function_skeleton(FunctionSkeleton { name: "total-cost".into(), arity: 0 });
        let f = repo.insert_function(Function { skeleton: fs, terms: vec![] });
        let e1 = repo.insert_function_expression(FunctionExpression::Function(f));
        let e2 = repo.insert_function_expression(FunctionExpression::Number(ordered_float::OrderedFloat(1.0)));

        let add1 = repo.insert_function_expression(FunctionExpression::Add(e1, e2));
        let add2 = repo.insert_function_expression(FunctionExpression::Add(e2, e1));
        assert_eq!(add1, add2);
    }

    #[test]
    fn domain_predicate_insertion_tracks_static_fluent_and_derived_classification() {
        let mut repo = PDDLRepository::new();
        let mut domain = Domain::default();

        let on = repo.insert_domain_predicate(&mut domain, PredicateSchema { name: "on".into(), arity: 2 }, PredicateKind::Fluent);
        let handempty =
            repo.insert_domain_predicate(&mut domain, PredicateSchema { name: "handempty".into(), arity: 0 }, PredicateKind::Static);
        let clear_all =
            repo.insert_domain_predicate(&mut domain, PredicateSchema { name: "clear-all".into(), arity: 0 }, PredicateKind::Derived);

        assert_eq!(domain.predicates, vec![on, handempty, clear_all]);
        assert_eq!(domain.static_predicates, vec![handempty]);
        assert_eq!(domain.derived_predicates, vec![clear_all]);
        // A fluent predicate belongs to neither specialized list.
        assert!(!domain.static_predicates.contains(&on));
        assert!(!domain.derived_predicates.contains(&on));
    }
}
