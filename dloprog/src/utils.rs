use strum::EnumIs;
use thiserror::Error;

/// Stage of the front end that reported a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum DiagnosticKind {
    /// Unrecognized character; it was skipped and scanning continued.
    Lexical,
    /// Grammar mismatch; parsing was aborted.
    Syntax,
}

/// A front-end message attached to a byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub start: usize,
    pub end: usize,
}

impl Diagnostic {
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self.kind {
            DiagnosticKind::Lexical => "lexical error",
            DiagnosticKind::Syntax => "syntax error",
        };
        write!(f, "{stage} at {}..{}: {}", self.start, self.end, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum Error {
    /// The source does not match the grammar. Every diagnostic gathered so far is kept.
    #[error(
        "Syntax error in input, parsing aborted with {} diagnostic(s): {}",
        .diagnostics.len(),
        .diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Syntax { diagnostics: Vec<Diagnostic> },
}
