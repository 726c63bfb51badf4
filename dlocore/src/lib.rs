//! Translation of while-programs into first-order axioms over a discrete linear order.
//!
//! The pipeline is `Program` → flow chain ([`flow::normalize`]) → axiom records
//! ([`builder::AxiomBuilder`]). [`translate::Translator`] runs all of it, from
//! source text if needed, under a [`utils::conf::TranslateConfig`].
//!
//! Example
//! ```
//! use dlocore::translate::Translator;
//!
//! let translation = Translator::default()
//!     .translate_source("while x < 4 do x = x + 1")
//!     .unwrap();
//! let lines: Vec<String> = translation.records.iter().map(ToString::to_string).collect();
//! assert_eq!(
//!     lines,
//!     vec![
//!         "{x(n+1) = x(n) + 1}",
//!         "boundary {x(0) = x} {x = x(N)}",
//!         "smallest(N, n, not (x(n) < 4))",
//!     ]
//! );
//! ```

pub mod builder;
pub mod flow;
pub mod magic;
pub mod translate;
pub mod utils;

pub mod prelude {
    pub use crate::builder::AxiomBuilder;
    pub use crate::flow::{FlowKind, FlowNode, normalize};
    pub use crate::translate::{Translation, Translator, translate};
    pub use crate::utils::conf::{ColorMode, TranslateConfig};
    pub use crate::utils::error::{DloError, DloResult};
}

pub extern crate dloformal;
pub extern crate dloprog;
