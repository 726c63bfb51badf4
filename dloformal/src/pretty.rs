//! RcDoc-based pretty-printer with termcolor annotations for terms, guards and axioms.
//!
//! Role
//! - Convert formal objects into annotated documents suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! Rendering
//! - Axioms: `x == y -> x = y`, guards conjoined with `and`, negation as `not (..)`.
//! - Indices: `x(n+1) = x(n) + 1`, nested loops stack suffixes `x(n+1)(n)`.
//! - Witness: `smallest(N, n, not (x(n) < 4))`.

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::axiom::{Axiom, AxiomRecord, AxiomSet, BoundarySet, Smallest};
use crate::guard::{Guard, GuardLiteral};
use crate::term::{Predicate, Term};
use crate::variable::IndexedVar;

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, braces
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // not, and, smallest
    Operator, // +, -, =, ->, relations
    Ident,    // variables
    Index,    // time indices
    Literal,  // numbers
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 4 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::Yellow,
                    3 => Color::Magenta,
                    _ => unreachable!(),
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Index => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Literal => {
                s.set_fg(Some(Color::Red));
            }
        }
        s
    }
}

fn styled(style: Style, s: impl std::fmt::Display) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(style)
}

fn punct(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Punct, s)
}

fn kw(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Keyword, s)
}

fn op(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Operator, s)
}

fn parenthesized(inner: RcDoc<'static, Style>, depth: u8) -> RcDoc<'static, Style> {
    styled(Style::Paren(depth), "(")
        .append(inner)
        .append(styled(Style::Paren(depth), ")"))
}

fn indexed_var_doc(var: &IndexedVar) -> RcDoc<'static, Style> {
    var.indices.iter().fold(
        styled(Style::Ident, var.name.as_str()),
        |doc, index| doc.append(parenthesized(styled(Style::Index, index), 0)),
    )
}

fn term_doc(term: &Term, depth: u8) -> RcDoc<'static, Style> {
    match term {
        Term::Var(var) => indexed_var_doc(var),
        Term::Lit(value) => styled(Style::Literal, value),
        Term::BinOp { op: o, lhs, rhs } => {
            // Operators are left-associative, only a compound right operand needs parentheses.
            let rhs_doc = if rhs.is_bin_op() {
                parenthesized(term_doc(rhs, depth + 1), depth)
            } else {
                term_doc(rhs, depth)
            };
            term_doc(lhs, depth)
                .append(RcDoc::space())
                .append(op(o.symbol()))
                .append(RcDoc::space())
                .append(rhs_doc)
                .group()
        }
    }
}

fn predicate_doc(predicate: &Predicate, depth: u8) -> RcDoc<'static, Style> {
    term_doc(&predicate.left, depth)
        .append(RcDoc::space())
        .append(op(predicate.relation.symbol()))
        .append(RcDoc::space())
        .append(term_doc(&predicate.right, depth))
        .group()
}

fn literal_doc(literal: &GuardLiteral, depth: u8) -> RcDoc<'static, Style> {
    if literal.positive {
        predicate_doc(&literal.predicate, depth)
    } else {
        kw("not")
            .append(RcDoc::space())
            .append(parenthesized(
                predicate_doc(&literal.predicate, depth + 1),
                depth,
            ))
            .group()
    }
}

fn guard_doc(guard: &Guard) -> RcDoc<'static, Style> {
    RcDoc::intersperse(
        guard.literals().iter().map(|literal| literal_doc(literal, 0)),
        RcDoc::space().append(kw("and")).append(RcDoc::space()),
    )
    .group()
}

fn axiom_doc(axiom: &Axiom) -> RcDoc<'static, Style> {
    let equation = indexed_var_doc(axiom.variable())
        .append(RcDoc::space())
        .append(op("="))
        .append(RcDoc::space())
        .append(term_doc(axiom.value(), 0))
        .group();

    match axiom.condition() {
        Some(guard) => guard_doc(guard)
            .append(RcDoc::space())
            .append(op("->"))
            .append(RcDoc::line())
            .append(equation)
            .group()
            .nest(2),
        None => equation,
    }
}

fn axiom_list_doc(axioms: &[Axiom]) -> RcDoc<'static, Style> {
    punct("{")
        .append(
            RcDoc::intersperse(
                axioms.iter().map(axiom_doc),
                punct(",").append(RcDoc::line()),
            )
            .nest(1),
        )
        .append(punct("}"))
        .group()
}

fn smallest_doc(smallest: &Smallest) -> RcDoc<'static, Style> {
    kw("smallest")
        .append(styled(Style::Paren(0), "("))
        .append(styled(Style::Index, smallest.bound_var()))
        .append(punct(", "))
        .append(styled(Style::Index, smallest.index_var()))
        .append(punct(", "))
        .append(literal_doc(smallest.negated_condition(), 1))
        .append(styled(Style::Paren(0), ")"))
        .group()
}

/// Objects that can be laid out as an annotated document.
pub trait ToDoc {
    fn to_doc(&self) -> RcDoc<'static, Style>;
}

impl ToDoc for IndexedVar {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        indexed_var_doc(self)
    }
}

impl ToDoc for Term {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        term_doc(self, 0)
    }
}

impl ToDoc for Predicate {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        predicate_doc(self, 0)
    }
}

impl ToDoc for GuardLiteral {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        literal_doc(self, 0)
    }
}

impl ToDoc for Guard {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        guard_doc(self)
    }
}

impl ToDoc for Axiom {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        axiom_doc(self)
    }
}

impl ToDoc for AxiomSet {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        axiom_list_doc(self.axioms())
    }
}

impl ToDoc for BoundarySet {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        kw("boundary")
            .append(RcDoc::space())
            .append(axiom_list_doc(self.entry()))
            .append(RcDoc::line())
            .append(axiom_list_doc(self.exit()))
            .group()
            .nest(2)
    }
}

impl ToDoc for Smallest {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        smallest_doc(self)
    }
}

impl ToDoc for AxiomRecord {
    fn to_doc(&self) -> RcDoc<'static, Style> {
        match self {
            AxiomRecord::Set(set) => set.to_doc(),
            AxiomRecord::Boundary(boundary) => boundary.to_doc(),
            AxiomRecord::Smallest(smallest) => smallest.to_doc(),
        }
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

fn render_to<W: WriteColor + Write>(
    doc: &RcDoc<'_, Style>,
    width: usize,
    out: &mut W,
) -> io::Result<()> {
    let mut cw = ColorWriter { out };
    doc.render_raw(width, &mut cw)
}

/// Width of the terminal, or 80 if it cannot be determined.
pub fn terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Pretty-printing conveniences for anything implementing [`ToDoc`].
pub trait PrettyAxiom {
    /// Annotated document, for composing or rendering manually.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()>;

    /// Print to stdout with colors (TTY-aware) at the terminal width.
    fn pretty_print(&self) -> io::Result<()>;

    /// Plain string without colors, laid out at the given width.
    fn pretty_string_width(&self, width: usize) -> String;

    /// Plain string without colors.
    fn pretty_string(&self) -> String {
        self.pretty_string_width(80)
    }
}

impl<T: ToDoc> PrettyAxiom for T {
    #[inline]
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        self.to_doc()
    }

    #[inline]
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        render_to(&self.to_doc(), width, out)
    }

    fn pretty_print(&self) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        render_to(&self.to_doc(), terminal_width(), &mut stdout)
    }

    fn pretty_string_width(&self, width: usize) -> String {
        let mut buf = String::new();
        let _ = self.to_doc().render_fmt(width, &mut buf);
        buf
    }
}

/// Layout width used by `Display`, wide enough to keep any axiom on one line.
const DISPLAY_WIDTH: usize = 1 << 20;

macro_rules! impl_display_via_doc {
    ($($t:ty),* $(,)?) => {
        $(
            impl std::fmt::Display for $t {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    let mut w = FmtWrite::new(f);
                    self.to_doc().render_raw(DISPLAY_WIDTH, &mut w)
                }
            }
        )*
    };
}

impl_display_via_doc!(
    Term,
    Predicate,
    GuardLiteral,
    Guard,
    Axiom,
    AxiomSet,
    BoundarySet,
    Smallest,
    AxiomRecord,
);
