//! PDDL data model and interning repository (spec §3, §4.G).

pub mod repository;
pub mod types;

pub use repository::{PDDLRepository, PredicateKind, RepositorySizes};
pub use types::*;

impl std::fmt::Display for Requirements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Recursive pretty-printers for entities that need a repository to resolve
/// their children (spec §11, grounded on
/// `original_source/src/formalism/formatter.cpp`'s recursive structure, not
/// the PDDL text grammar itself — round-tripping to parseable PDDL text
/// remains out of scope).
pub struct Formatter<'a> {
    pub repository: &'a PDDLRepository,
}

impl<'a> Formatter<'a> {
    pub fn new(repository: &'a PDDLRepository) -> Self {
        Formatter { repository }
    }

    pub fn format_atom(&self, index: AtomIndex) -> String {
        let atom = self.repository.get_atom(index);
        let predicate = self.repository.get_predicate(atom.predicate);
        format!("({} ...{} terms)", predicate.name, atom.terms.len())
    }

    pub fn format_ground_atom(&self, index: GroundAtomIndex) -> String {
        let ground = self.repository.get_ground_atom(index);
        let predicate = self.repository.get_predicate(ground.predicate);
        let objects: Vec<String> = ground
            .objects
            .iter()
            .map(|&o| self.repository.get_object(o).name.clone())
            .collect();
        format!("({} {})", predicate.name, objects.join(" "))
    }

    pub fn format_literal(&self, index: LiteralIndex) -> String {
        let literal = self.repository.get_literal(index);
        let atom = self.format_atom(literal.atom);
        if literal.polarity {
            atom
        } else {
            format!("(not {})", atom)
        }
    }

    pub fn format_ground_literal(&self, index: GroundLiteralIndex) -> String {
        let literal = self.repository.get_ground_literal(index);
        let atom = self.format_ground_atom(literal.atom);
        if literal.polarity {
            atom
        } else {
            format!("(not {})", atom)
        }
    }

    pub fn format_condition(&self, index: ConditionIndex) -> String {
        match self.repository.get_condition(index) {
            Condition::Literal(l) => self.format_literal(*l),
            Condition::And(cs) => {
                let parts: Vec<String> = cs.iter().map(|&c| self.format_condition(c)).collect();
                format!("(and {})", parts.join(" "))
            }
            Condition::Or(cs) => {
                let parts: Vec<String> = cs.iter().map(|&c| self.format_condition(c)).collect();
                format!("(or {})", parts.join(" "))
            }
            Condition::Not(c) => format!("(not {})", self.format_condition(*c)),
            Condition::Exists(vars, c) => format!("(exists ({}) {})", vars.len(), self.format_condition(*c)),
            Condition::Forall(vars, c) => format!("(forall ({}) {})", vars.len(), self.format_condition(*c)),
            Condition::Imply(a, b) => format!("(imply {} {})", self.format_condition(*a), self.format_condition(*b)),
        }
    }
}
