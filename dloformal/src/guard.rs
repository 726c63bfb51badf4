//! Branch guards: conjunctions of possibly negated predicates.
use smallvec::SmallVec;

use crate::term::Predicate;
use crate::variable::{Index, VariableUniverse};

/// A predicate that must hold (`positive`) or must not hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuardLiteral {
    pub predicate: Predicate,
    pub positive: bool,
}

impl GuardLiteral {
    pub fn holds(predicate: Predicate) -> Self {
        Self {
            predicate,
            positive: true,
        }
    }

    pub fn fails(predicate: Predicate) -> Self {
        Self {
            predicate,
            positive: false,
        }
    }

    pub fn reindex(&mut self, universe: &VariableUniverse, index: Index) {
        self.predicate.reindex(universe, index);
    }
}

/// Conjunction of guard literals, outermost branch first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guard {
    literals: SmallVec<[GuardLiteral; 2]>,
}

impl Guard {
    pub fn single(literal: GuardLiteral) -> Self {
        let mut literals = SmallVec::new();
        literals.push(literal);
        Self { literals }
    }

    /// Conjoin the guard of an enclosing branch.
    ///
    /// The existing literals are kept; the new one is placed first since it
    /// belongs to a branch that encloses every literal already present.
    pub fn conjoin_outer(&mut self, literal: GuardLiteral) {
        self.literals.insert(0, literal);
    }

    pub fn literals(&self) -> &[GuardLiteral] {
        &self.literals
    }

    pub fn reindex(&mut self, universe: &VariableUniverse, index: Index) {
        for literal in self.literals.iter_mut() {
            literal.reindex(universe, index);
        }
    }
}
