//! Axiom construction over a flow chain.
//!
//! Records are emitted left to right:
//! - a straight block yields one frame-consistent [`AxiomSet`] per assignment;
//! - a branch yields its then-records guarded by the condition, then its
//!   else-records guarded by the negated condition;
//! - a loop yields its body records rewritten into induction steps, one
//!   [`BoundarySet`], then one [`Smallest`] witness.
//!
//! Witnesses belong to their own loop: enclosing branches never guard them and
//! enclosing loops never reindex them.
use dloformal::axiom::{AxiomRecord, AxiomSet, BoundarySet, Smallest};
use dloformal::guard::GuardLiteral;
use dloformal::term::Comparison;
use dloformal::variable::{BOUND_VAR, INDEX_VAR, VarName, VariableUniverse};
use dloprog::tree::Assignment;
use log::{debug, trace};

use crate::flow::{FlowKind, FlowNode};
use crate::utils::error::{DloError, DloResult};

pub struct AxiomBuilder<'u> {
    universe: &'u VariableUniverse,
}

impl<'u> AxiomBuilder<'u> {
    pub fn new(universe: &'u VariableUniverse) -> Self {
        Self { universe }
    }

    pub fn universe(&self) -> &VariableUniverse {
        self.universe
    }

    /// Build the records of `chain`. An absent chain yields no records.
    ///
    /// Fails with [`DloError::UnknownVariable`] as soon as an assignment or a
    /// condition mentions a variable outside of the universe; no partial output
    /// is returned in that case. A universe holding one of the index symbols
    /// `n` or `N` is rejected with [`DloError::ReservedVariable`].
    pub fn build(&self, chain: Option<&FlowNode<'_>>) -> DloResult<Vec<AxiomRecord>> {
        if let Some(name) = self
            .universe
            .iter()
            .find(|name| name.as_str() == INDEX_VAR || name.as_str() == BOUND_VAR)
        {
            return Err(DloError::ReservedVariable { name: name.clone() });
        }
        self.build_chain(chain)
    }

    fn build_chain(&self, chain: Option<&FlowNode<'_>>) -> DloResult<Vec<AxiomRecord>> {
        let mut records = Vec::new();
        self.build_into(chain, &mut records)?;
        Ok(records)
    }

    fn build_into(
        &self,
        chain: Option<&FlowNode<'_>>,
        out: &mut Vec<AxiomRecord>,
    ) -> DloResult<()> {
        let mut cursor = chain;
        while let Some(node) = cursor {
            match &node.kind {
                FlowKind::Straight(assignments) => {
                    debug!("Straight block of {} assignment(s)", assignments.len());
                    for assignment in assignments {
                        out.push(AxiomRecord::Set(self.assignment_set(assignment)?));
                    }
                }
                FlowKind::Branch {
                    cond,
                    then_chain,
                    else_chain,
                } => {
                    self.check_comparison(cond, "branch condition")?;
                    debug!("Branch on `{cond}`");

                    let predicate = cond.to_predicate();
                    let mut then_records = self.build_chain(Some(then_chain.as_ref()))?;
                    let holds = GuardLiteral::holds(predicate.clone());
                    then_records
                        .iter_mut()
                        .for_each(|record| record.guard(&holds));

                    let mut else_records = self.build_chain(Some(else_chain.as_ref()))?;
                    let fails = GuardLiteral::fails(predicate);
                    else_records
                        .iter_mut()
                        .for_each(|record| record.guard(&fails));

                    out.extend(then_records);
                    out.extend(else_records);
                }
                FlowKind::Loop { cond, body } => {
                    self.check_comparison(cond, "loop condition")?;
                    debug!("Loop on `{cond}`");

                    let mut body_records = self.build_chain(Some(body.as_ref()))?;
                    body_records
                        .iter_mut()
                        .for_each(|record| record.reindex_step(self.universe));
                    out.extend(body_records);

                    let boundary = BoundarySet::for_loop(self.universe);
                    trace!("Loop boundary {boundary}");
                    out.push(AxiomRecord::Boundary(boundary));

                    let witness = Smallest::for_loop(cond, self.universe);
                    trace!("Loop witness {witness}");
                    out.push(AxiomRecord::Smallest(witness));
                }
            }
            cursor = node.next.as_deref();
        }
        Ok(())
    }

    fn assignment_set(&self, assignment: &Assignment) -> DloResult<AxiomSet> {
        for name in assignment.variables() {
            self.check_known(name, || format!("assignment `{assignment}`"))?;
        }

        let set = AxiomSet::assignment(
            self.universe,
            &assignment.target,
            &assignment.value_term(),
        );
        trace!("Assignment `{assignment}` yields {set}");
        Ok(set)
    }

    fn check_comparison(&self, cond: &Comparison, role: &str) -> DloResult<()> {
        for name in cond.variables() {
            self.check_known(name, || format!("{role} `{cond}`"))?;
        }
        Ok(())
    }

    fn check_known(&self, name: &VarName, context: impl FnOnce() -> String) -> DloResult<()> {
        if self.universe.contains(name) {
            Ok(())
        } else {
            Err(DloError::UnknownVariable {
                name: name.clone(),
                context: context(),
            })
        }
    }
}
