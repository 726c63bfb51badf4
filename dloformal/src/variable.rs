//! Program variables, time indices and the variable universe.
//!
//! Role
//! - [`VarName`] identifies a program variable. Clones share the same allocation.
//! - [`Index`] is one time-index suffix (`0`, `n`, `n+1`, `N`) attached to a variable occurrence.
//! - [`IndexedVar`] is a variable read or written at a given (possibly nested) time index.
//! - [`VariableUniverse`] is the read-only set of every variable of a program.
use std::collections::BTreeSet;
use std::sync::Arc;

use smallvec::SmallVec;
use strum::{EnumIs, EnumIter};

/// Name of the iteration index bound by loop induction axioms.
pub const INDEX_VAR: &str = "n";

/// Name of the iteration count at which a loop exits.
pub const BOUND_VAR: &str = "N";

/// Identifier of a program variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarName(Arc<str>);

impl VarName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VarName {
    fn from(s: &str) -> Self {
        VarName::new(s)
    }
}

impl From<String> for VarName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl AsRef<str> for VarName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VarName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A time-index suffix of a variable occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumIter)]
pub enum Index {
    /// Value when entering a loop, `v(0)`.
    Initial,
    /// Value at iteration `n`, `v(n)`.
    Current,
    /// Value at iteration `n + 1`, `v(n+1)`.
    Next,
    /// Value at the exit iteration, `v(N)`.
    Exit,
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Index::Initial => write!(f, "0"),
            Index::Current => write!(f, "{INDEX_VAR}"),
            Index::Next => write!(f, "{INDEX_VAR}+1"),
            Index::Exit => write!(f, "{BOUND_VAR}"),
        }
    }
}

/// A variable occurrence carrying zero or more time indices.
///
/// Indices are stored innermost first: reindexing a loop body appends one
/// index, so a variable of a nested loop body reads `x(n+1)(n)` once both
/// loops have been processed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexedVar {
    pub name: VarName,
    pub indices: SmallVec<[Index; 2]>,
}

impl IndexedVar {
    /// Plain occurrence without any index.
    pub fn plain(name: VarName) -> Self {
        Self {
            name,
            indices: SmallVec::new(),
        }
    }

    /// Occurrence of `name` at a single index.
    pub fn at(name: VarName, index: Index) -> Self {
        let mut indices = SmallVec::new();
        indices.push(index);
        Self { name, indices }
    }

    /// Append one more (outer) index.
    pub fn with_index(mut self, index: Index) -> Self {
        self.indices.push(index);
        self
    }

    pub fn is_plain(&self) -> bool {
        self.indices.is_empty()
    }
}

impl std::fmt::Display for IndexedVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for index in &self.indices {
            write!(f, "({index})")?;
        }
        Ok(())
    }
}

/// Every variable name appearing in a program.
///
/// Iteration order is lexicographic, which fixes the order of the axioms
/// inside every set produced for the program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableUniverse {
    names: BTreeSet<VarName>,
}

impl VariableUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a variable. Returns `false` if it was already known.
    pub fn insert(&mut self, name: VarName) -> bool {
        self.names.insert(name)
    }

    pub fn contains(&self, name: &VarName) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VarName> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<N: Into<VarName>> FromIterator<N> for VariableUniverse {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VariableUniverse {
    type Item = &'a VarName;
    type IntoIter = std::collections::btree_set::Iter<'a, VarName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}
