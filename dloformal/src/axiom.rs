//! Axioms and the records produced by a translation.
//!
//! Role
//! - [`Axiom`] is one (possibly guarded) equation `variable = value`.
//! - [`AxiomSet`] describes a single assignment step: one axiom per universe variable.
//! - [`BoundarySet`] ties a loop's induction family to the values before and after the loop.
//! - [`Smallest`] is the loop-exit witness.
//! - [`AxiomRecord`] is the closed family of everything a translation emits.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIs, EnumTryAs};
use thiserror::Error;

use crate::guard::{Guard, GuardLiteral};
use crate::term::{Comparison, Term};
use crate::variable::{BOUND_VAR, INDEX_VAR, Index, IndexedVar, VarName, VariableUniverse};

/// Violation of the one-axiom-per-variable invariant.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum FrameError {
    /// A universe variable has no axiom in the set.
    #[error("No axiom describes variable `{name}`; every variable of the universe needs exactly one.")]
    Missing { name: VarName },

    /// A variable is described by more than one axiom.
    #[error("Variable `{name}` is described by {count} axioms within a single set.")]
    Duplicate { name: VarName, count: usize },

    /// An axiom describes a variable outside of the universe.
    #[error("Axiom describes variable `{name}` which is not part of the variable universe.")]
    Unknown { name: VarName },
}

/// Guarded equation `condition -> variable = value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Axiom {
    variable: IndexedVar,
    value: Term,
    condition: Option<Guard>,
}

impl Axiom {
    pub fn new(variable: IndexedVar, value: Term) -> Self {
        Self {
            variable,
            value,
            condition: None,
        }
    }

    /// Identity axiom `v = v` for a variable left unchanged by a step.
    pub fn frame(name: &VarName) -> Self {
        Self::new(IndexedVar::plain(name.clone()), Term::var(name.clone()))
    }

    pub fn variable(&self) -> &IndexedVar {
        &self.variable
    }

    pub fn value(&self) -> &Term {
        &self.value
    }

    pub fn condition(&self) -> Option<&Guard> {
        self.condition.as_ref()
    }

    /// Conjoin the guard of an enclosing branch.
    pub fn guard(&mut self, literal: GuardLiteral) {
        match &mut self.condition {
            Some(guard) => guard.conjoin_outer(literal),
            None => self.condition = Some(Guard::single(literal)),
        }
    }

    /// Rewrite into one induction step: the described variable moves to
    /// `n+1` while every read (value and guard) happens at `n`.
    pub fn reindex_step(&mut self, universe: &VariableUniverse) {
        self.variable.indices.push(Index::Next);
        self.value.reindex(universe, Index::Current);
        if let Some(guard) = &mut self.condition {
            guard.reindex(universe, Index::Current);
        }
    }
}

fn check_frame<'a>(
    axioms: impl IntoIterator<Item = &'a Axiom>,
    universe: &VariableUniverse,
) -> Result<(), FrameError> {
    let mut counts: BTreeMap<&VarName, usize> = BTreeMap::new();
    for axiom in axioms {
        let name = &axiom.variable.name;
        if !universe.contains(name) {
            return Err(FrameError::Unknown { name: name.clone() });
        }
        *counts.entry(name).or_default() += 1;
    }

    for name in universe {
        match counts.get(name).copied().unwrap_or(0) {
            0 => return Err(FrameError::Missing { name: name.clone() }),
            1 => {}
            count => {
                return Err(FrameError::Duplicate {
                    name: name.clone(),
                    count,
                });
            }
        }
    }
    Ok(())
}

/// Axioms describing one assignment step, one per universe variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AxiomSet {
    axioms: Vec<Axiom>,
}

impl AxiomSet {
    /// Build the set for `target = value`: the target gets `value`, every
    /// other variable of the universe keeps its value.
    pub fn assignment(universe: &VariableUniverse, target: &VarName, value: &Term) -> Self {
        let axioms = universe
            .iter()
            .map(|name| {
                if name == target {
                    Axiom::new(IndexedVar::plain(name.clone()), value.clone())
                } else {
                    Axiom::frame(name)
                }
            })
            .collect();
        Self { axioms }
    }

    pub fn from_axioms(axioms: Vec<Axiom>) -> Self {
        Self { axioms }
    }

    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    /// Axiom describing `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Axiom> {
        self.axioms
            .iter()
            .find(|axiom| axiom.variable.name.as_str() == name)
    }

    pub fn check_frame(&self, universe: &VariableUniverse) -> Result<(), FrameError> {
        check_frame(&self.axioms, universe)
    }
}

/// Boundary axioms of one loop: `v(0) = v` on entry and `v = v(N)` on exit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundarySet {
    entry: Vec<Axiom>,
    exit: Vec<Axiom>,
}

impl BoundarySet {
    pub fn for_loop(universe: &VariableUniverse) -> Self {
        let entry = universe
            .iter()
            .map(|name| {
                Axiom::new(
                    IndexedVar::at(name.clone(), Index::Initial),
                    Term::var(name.clone()),
                )
            })
            .collect();
        let exit = universe
            .iter()
            .map(|name| {
                Axiom::new(
                    IndexedVar::plain(name.clone()),
                    Term::Var(IndexedVar::at(name.clone(), Index::Exit)),
                )
            })
            .collect();
        Self { entry, exit }
    }

    pub fn entry(&self) -> &[Axiom] {
        &self.entry
    }

    pub fn exit(&self) -> &[Axiom] {
        &self.exit
    }

    pub fn check_frame(&self, universe: &VariableUniverse) -> Result<(), FrameError> {
        check_frame(&self.entry, universe)?;
        check_frame(&self.exit, universe)
    }
}

/// Loop-exit witness: `N` is the least `n` at which the loop condition fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Smallest {
    negated_condition: GuardLiteral,
}

impl Smallest {
    /// Witness for a loop guarded by `cond`, reading its variables at `n`.
    pub fn for_loop(cond: &Comparison, universe: &VariableUniverse) -> Self {
        let mut predicate = cond.to_predicate();
        predicate.reindex(universe, Index::Current);
        Self {
            negated_condition: GuardLiteral::fails(predicate),
        }
    }

    pub fn bound_var(&self) -> &'static str {
        BOUND_VAR
    }

    pub fn index_var(&self) -> &'static str {
        INDEX_VAR
    }

    pub fn negated_condition(&self) -> &GuardLiteral {
        &self.negated_condition
    }
}

/// One element of a translation output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
pub enum AxiomRecord {
    Set(AxiomSet),
    Boundary(BoundarySet),
    Smallest(Smallest),
}

impl AxiomRecord {
    /// Iterate over the axioms of this record. Witnesses have none.
    pub fn axioms(&self) -> Box<dyn Iterator<Item = &Axiom> + '_> {
        match self {
            AxiomRecord::Set(set) => Box::new(set.axioms.iter()),
            AxiomRecord::Boundary(boundary) => {
                Box::new(boundary.entry.iter().chain(boundary.exit.iter()))
            }
            AxiomRecord::Smallest(_) => Box::new(std::iter::empty()),
        }
    }

    fn axioms_mut(&mut self) -> Box<dyn Iterator<Item = &mut Axiom> + '_> {
        match self {
            AxiomRecord::Set(set) => Box::new(set.axioms.iter_mut()),
            AxiomRecord::Boundary(boundary) => {
                Box::new(boundary.entry.iter_mut().chain(boundary.exit.iter_mut()))
            }
            AxiomRecord::Smallest(_) => Box::new(std::iter::empty()),
        }
    }

    /// Guard every axiom with `literal`. Witnesses are never guarded.
    pub fn guard(&mut self, literal: &GuardLiteral) {
        for axiom in self.axioms_mut() {
            axiom.guard(literal.clone());
        }
    }

    /// Apply the induction step rewrite to every axiom: the described variable
    /// gains `n+1`, and both the value and the guard are read at `n`. Witnesses
    /// keep their own loop's index.
    pub fn reindex_step(&mut self, universe: &VariableUniverse) {
        for axiom in self.axioms_mut() {
            axiom.reindex_step(universe);
        }
    }

    pub fn check_frame(&self, universe: &VariableUniverse) -> Result<(), FrameError> {
        match self {
            AxiomRecord::Set(set) => set.check_frame(universe),
            AxiomRecord::Boundary(boundary) => boundary.check_frame(universe),
            AxiomRecord::Smallest(_) => Ok(()),
        }
    }

    /// Flatten into string records, one per axiom or witness.
    pub fn to_plain(&self) -> Vec<PlainRecord> {
        match self {
            AxiomRecord::Smallest(smallest) => vec![PlainRecord::Smallest {
                bound_var: smallest.bound_var().to_string(),
                index_var: smallest.index_var().to_string(),
                negated_condition: smallest.negated_condition.to_string(),
            }],
            _ => self
                .axioms()
                .map(|axiom| PlainRecord::Axiom {
                    variable: axiom.variable.to_string(),
                    value_expr: axiom.value.to_string(),
                    condition: axiom.condition.as_ref().map(ToString::to_string),
                })
                .collect(),
        }
    }
}

/// String form of a record, for consumers that do not link against this crate's types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum PlainRecord {
    Axiom {
        variable: String,
        value_expr: String,
        condition: Option<String>,
    },
    Smallest {
        bound_var: String,
        index_var: String,
        negated_condition: String,
    },
}
