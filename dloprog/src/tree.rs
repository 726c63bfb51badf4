//! Program tree of the while-language.
//!
//! Grammar (double-sided generating rules):
//!
//! ```text
//! P <-> E                            unary
//! P <-> P ; P                        sequential
//! P <-> if B then { P } else { P }   conditional
//! P <-> while B do { P }             loop
//! ```
//!
//! The tree is immutable once built. Ownership is strictly top-down; no node
//! knows its parent.
use std::collections::BTreeSet;

use dloformal::term::{ArithOp, Comparison, Operand, Term};
use dloformal::variable::{VarName, VariableUniverse};
use strum::{EnumIs, EnumTryAs};

/// Atomic assignment `target = lhs` or `target = lhs op rhs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub target: VarName,
    pub lhs: Operand,
    pub tail: Option<(ArithOp, Operand)>,
}

impl Assignment {
    /// `target = value`.
    pub fn copy(target: impl Into<VarName>, value: Operand) -> Self {
        Self {
            target: target.into(),
            lhs: value,
            tail: None,
        }
    }

    /// `target = lhs op rhs`.
    pub fn binary(target: impl Into<VarName>, lhs: Operand, op: ArithOp, rhs: Operand) -> Self {
        Self {
            target: target.into(),
            lhs,
            tail: Some((op, rhs)),
        }
    }

    pub fn op(&self) -> Option<ArithOp> {
        self.tail.as_ref().map(|(op, _)| *op)
    }

    pub fn rhs(&self) -> Option<&Operand> {
        self.tail.as_ref().map(|(_, rhs)| rhs)
    }

    /// Right-hand side as an un-indexed term, binary form preserved.
    pub fn value_term(&self) -> Term {
        match &self.tail {
            Some((op, rhs)) => Term::binop(*op, self.lhs.to_term(), rhs.to_term()),
            None => self.lhs.to_term(),
        }
    }

    /// Variables read or written by this assignment, target first.
    pub fn variables(&self) -> impl Iterator<Item = &VarName> {
        std::iter::once(&self.target).chain(
            [Some(&self.lhs), self.rhs()]
                .into_iter()
                .flatten()
                .filter_map(|op| op.try_as_var_ref()),
        )
    }
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.target, self.lhs)?;
        if let Some((op, rhs)) = &self.tail {
            write!(f, " {} {}", op.symbol(), rhs)?;
        }
        Ok(())
    }
}

/// Node of the program tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIs, EnumTryAs)]
pub enum ProgramNode {
    /// Straight-line run of one or more assignments, in source order.
    Unary(Vec<Assignment>),
    /// `left` followed by `right`.
    Sequential(Box<ProgramNode>, Box<ProgramNode>),
    /// `if cond then { then_branch } else { else_branch }`.
    Conditional {
        cond: Comparison,
        then_branch: Box<ProgramNode>,
        else_branch: Box<ProgramNode>,
    },
    /// `while cond do { body }`.
    Loop {
        cond: Comparison,
        body: Box<ProgramNode>,
    },
}

impl ProgramNode {
    pub fn unary(assignments: impl IntoIterator<Item = Assignment>) -> Self {
        ProgramNode::Unary(assignments.into_iter().collect())
    }

    pub fn sequential(left: ProgramNode, right: ProgramNode) -> Self {
        ProgramNode::Sequential(Box::new(left), Box::new(right))
    }

    pub fn conditional(cond: Comparison, then_branch: ProgramNode, else_branch: ProgramNode) -> Self {
        ProgramNode::Conditional {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn while_loop(cond: Comparison, body: ProgramNode) -> Self {
        ProgramNode::Loop {
            cond,
            body: Box::new(body),
        }
    }

    /// Every variable name mentioned anywhere below this node.
    pub fn collect_variables(&self) -> VariableUniverse {
        let mut names = BTreeSet::new();
        self.visit_variables(&mut |name| {
            names.insert(name.clone());
        });
        names.into_iter().collect()
    }

    fn visit_variables<'a>(&'a self, f: &mut impl FnMut(&'a VarName)) {
        match self {
            ProgramNode::Unary(assignments) => {
                assignments.iter().flat_map(|a| a.variables()).for_each(f)
            }
            ProgramNode::Sequential(left, right) => {
                left.visit_variables(f);
                right.visit_variables(f);
            }
            ProgramNode::Conditional {
                cond,
                then_branch,
                else_branch,
            } => {
                cond.variables().for_each(&mut *f);
                then_branch.visit_variables(f);
                else_branch.visit_variables(f);
            }
            ProgramNode::Loop { cond, body } => {
                cond.variables().for_each(&mut *f);
                body.visit_variables(f);
            }
        }
    }
}

impl std::fmt::Display for ProgramNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgramNode::Unary(assignments) => {
                for (i, assignment) in assignments.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{assignment};")?;
                }
                Ok(())
            }
            ProgramNode::Sequential(left, right) => write!(f, "{left} {right}"),
            ProgramNode::Conditional {
                cond,
                then_branch,
                else_branch,
            } => write!(
                f,
                "if {cond} then {{ {then_branch} }} else {{ {else_branch} }}"
            ),
            ProgramNode::Loop { cond, body } => write!(f, "while {cond} do {{ {body} }}"),
        }
    }
}

/// A parsed program: its tree and the variables it mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub root: ProgramNode,
    pub universe: VariableUniverse,
}

impl Program {
    pub fn new(root: ProgramNode, universe: VariableUniverse) -> Self {
        Self { root, universe }
    }

    /// Build a program whose universe is exactly the variables of `root`.
    pub fn from_root(root: ProgramNode) -> Self {
        let universe = root.collect_variables();
        Self { root, universe }
    }
}
