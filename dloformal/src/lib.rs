//! Dloformal: the logic side of program formalization over a discrete linear order.
//!
//! Program states are indexed by natural numbers. A variable occurrence may carry
//! time indices (`x(0)`, `x(n)`, `x(n+1)`, `x(N)`), and axioms relate the value of
//! every variable at one index to values at the previous one.
//!
//! Example
//! ```
//! use dloformal::prelude::*;
//!
//! let universe: VariableUniverse = ["x", "y"].into_iter().collect();
//! let value = Term::binop(ArithOp::Add, Term::var("x"), Term::Lit(1.into()));
//! let set = AxiomSet::assignment(&universe, &VarName::new("x"), &value);
//! assert_eq!(set.to_string(), "{x = x + 1, y = y}");
//! assert!(set.check_frame(&universe).is_ok());
//! ```

/// Axioms, axiom sets, loop boundaries and loop-exit witnesses.
pub mod axiom;
/// Conjunctions of (negated) predicates guarding axioms.
pub mod guard;
/// Width-aware, optionally colored rendering.
pub mod pretty;
/// Operands, comparisons, terms and predicates.
pub mod term;
/// Variable names, time indices and the variable universe.
pub mod variable;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::axiom::{
        Axiom, AxiomRecord, AxiomSet, BoundarySet, FrameError, PlainRecord, Smallest,
    };
    pub use crate::guard::{Guard, GuardLiteral};
    pub use crate::pretty::{PrettyAxiom, Style, ToDoc};
    pub use crate::term::{ArithOp, Comparison, Operand, Predicate, Relation, Term};
    pub use crate::variable::{
        BOUND_VAR, INDEX_VAR, Index, IndexedVar, VarName, VariableUniverse,
    };
}
