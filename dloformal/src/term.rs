//! Structured terms and comparisons.
//!
//! Source-level atoms ([`Operand`], [`Comparison`]) are what the program tree
//! stores. Logic-level atoms ([`Term`], [`Predicate`]) are what axioms store;
//! only the latter carry time indices.
use num_bigint::BigInt;
use strum::{EnumIs, EnumIter, EnumTryAs};

use crate::variable::{Index, IndexedVar, VarName, VariableUniverse};

/// Binary arithmetic operator of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ArithOp {
    Add,
    Sub,
}

impl ArithOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
        }
    }
}

/// Relation of an atomic comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Relation {
    Le,
    Lt,
    Eq,
    Ge,
    Gt,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Le => "<=",
            Relation::Lt => "<",
            Relation::Eq => "==",
            Relation::Ge => ">=",
            Relation::Gt => ">",
        }
    }
}

/// Source-level operand: a variable or a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
pub enum Operand {
    Var(VarName),
    Lit(BigInt),
}

impl Operand {
    pub fn var(name: impl Into<VarName>) -> Self {
        Operand::Var(name.into())
    }

    pub fn lit(value: impl Into<BigInt>) -> Self {
        Operand::Lit(value.into())
    }

    /// Lift into an un-indexed term.
    pub fn to_term(&self) -> Term {
        match self {
            Operand::Var(name) => Term::Var(IndexedVar::plain(name.clone())),
            Operand::Lit(value) => Term::Lit(value.clone()),
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Var(name) => write!(f, "{name}"),
            Operand::Lit(value) => write!(f, "{value}"),
        }
    }
}

/// Atomic comparison `left relation right` as written in the source program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comparison {
    pub left: Operand,
    pub relation: Relation,
    pub right: Operand,
}

impl Comparison {
    pub fn new(left: Operand, relation: Relation, right: Operand) -> Self {
        Self {
            left,
            relation,
            right,
        }
    }

    /// Variables read by this comparison.
    pub fn variables(&self) -> impl Iterator<Item = &VarName> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(|op| op.try_as_var_ref())
    }

    /// Lift into an un-indexed predicate.
    pub fn to_predicate(&self) -> Predicate {
        Predicate {
            left: self.left.to_term(),
            relation: self.relation,
            right: self.right.to_term(),
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.left, self.relation.symbol(), self.right)
    }
}

/// Logic-level term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs)]
pub enum Term {
    Var(IndexedVar),
    Lit(BigInt),
    BinOp {
        op: ArithOp,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
}

impl Term {
    pub fn var(name: impl Into<VarName>) -> Self {
        Term::Var(IndexedVar::plain(name.into()))
    }

    pub fn binop(op: ArithOp, lhs: Term, rhs: Term) -> Self {
        Term::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Append `index` to every variable occurrence of the universe.
    ///
    /// Variables outside of `universe` are left untouched.
    pub fn reindex(&mut self, universe: &VariableUniverse, index: Index) {
        match self {
            Term::Var(var) => {
                if universe.contains(&var.name) {
                    var.indices.push(index);
                }
            }
            Term::Lit(_) => {}
            Term::BinOp { lhs, rhs, .. } => {
                lhs.reindex(universe, index);
                rhs.reindex(universe, index);
            }
        }
    }

    /// Visit every variable occurrence, left to right.
    pub fn for_each_var<'a>(&'a self, f: &mut impl FnMut(&'a IndexedVar)) {
        match self {
            Term::Var(var) => f(var),
            Term::Lit(_) => {}
            Term::BinOp { lhs, rhs, .. } => {
                lhs.for_each_var(f);
                rhs.for_each_var(f);
            }
        }
    }
}

/// Comparison over terms, used in guards and loop witnesses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    pub left: Term,
    pub relation: Relation,
    pub right: Term,
}

impl Predicate {
    pub fn reindex(&mut self, universe: &VariableUniverse, index: Index) {
        self.left.reindex(universe, index);
        self.right.reindex(universe, index);
    }
}
