//! Dloprog: program trees of a small while-language and their front end.
//!
//! The language has assignments (`x = y + 1`), conditionals
//! (`if x == y then { ... } else { ... }`) and loops (`while x < 4 do { ... }`).
//! Programs are parsed into a [`tree::Program`], which carries the tree and the
//! universe of variables it mentions.

#[cfg(feature = "chumsky")]
pub mod parser;
pub mod tree;
pub mod utils;

pub mod prelude {
    #[cfg(feature = "chumsky")]
    pub use crate::parser::{ParseOutcome, parse};
    pub use crate::tree::{Assignment, Program, ProgramNode};
    pub use crate::utils::{Diagnostic, DiagnosticKind, Error};
}
