//! Control-flow normalization of program trees.
//!
//! A [`FlowNode`] chain lists the straight-line blocks, branches and loops of a
//! program in execution order. Nested constructs own their sub-chains; what follows
//! a node is reached through its `next` link. Nodes borrow their assignments and
//! conditions from the program tree.
use std::fmt;

use dloformal::term::Comparison;
use dloprog::tree::{Assignment, ProgramNode};
use strum::EnumIs;

#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum FlowKind<'a> {
    /// Assignments executed one after the other, in source order.
    Straight(Vec<&'a Assignment>),
    Branch {
        cond: &'a Comparison,
        then_chain: Box<FlowNode<'a>>,
        else_chain: Box<FlowNode<'a>>,
    },
    Loop {
        cond: &'a Comparison,
        body: Box<FlowNode<'a>>,
    },
}

/// One node of a flow chain together with its continuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowNode<'a> {
    pub kind: FlowKind<'a>,
    pub next: Option<Box<FlowNode<'a>>>,
}

impl<'a> FlowNode<'a> {
    pub fn new(kind: FlowKind<'a>) -> Self {
        Self { kind, next: None }
    }

    /// Attach `tail` after the last node of this chain.
    pub fn append(&mut self, tail: FlowNode<'a>) {
        let mut cursor = &mut self.next;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(tail));
    }

    /// Iterate over this node and its continuations, without entering sub-chains.
    pub fn iter(&self) -> impl Iterator<Item = &FlowNode<'a>> {
        std::iter::successors(Some(self), |node| node.next.as_deref())
    }

    /// Number of nodes on this chain, sub-chains excluded.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    fn fmt_chain(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for node in self.iter() {
            let pad = "  ".repeat(depth);
            match &node.kind {
                FlowKind::Straight(assignments) => {
                    write!(f, "{pad}straight [")?;
                    for (i, assignment) in assignments.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{assignment}")?;
                    }
                    writeln!(f, "]")?;
                }
                FlowKind::Branch {
                    cond,
                    then_chain,
                    else_chain,
                } => {
                    writeln!(f, "{pad}branch {cond}")?;
                    writeln!(f, "{pad}  then:")?;
                    then_chain.fmt_chain(f, depth + 2)?;
                    writeln!(f, "{pad}  else:")?;
                    else_chain.fmt_chain(f, depth + 2)?;
                }
                FlowKind::Loop { cond, body } => {
                    writeln!(f, "{pad}loop {cond}")?;
                    writeln!(f, "{pad}  body:")?;
                    body.fmt_chain(f, depth + 2)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for FlowNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_chain(f, 0)
    }
}

/// Normalize a program tree into a flow chain.
///
/// `Sequential` nodes never appear in the output: the right operand is linked
/// after the last node of the left one.
pub fn normalize(root: &ProgramNode) -> FlowNode<'_> {
    match root {
        ProgramNode::Unary(assignments) => {
            FlowNode::new(FlowKind::Straight(assignments.iter().collect()))
        }
        ProgramNode::Sequential(left, right) => {
            let mut chain = normalize(left);
            chain.append(normalize(right));
            chain
        }
        ProgramNode::Conditional {
            cond,
            then_branch,
            else_branch,
        } => FlowNode::new(FlowKind::Branch {
            cond,
            then_chain: Box::new(normalize(then_branch)),
            else_chain: Box::new(normalize(else_branch)),
        }),
        ProgramNode::Loop { cond, body } => FlowNode::new(FlowKind::Loop {
            cond,
            body: Box::new(normalize(body)),
        }),
    }
}
