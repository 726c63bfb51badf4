//! Front end for the while-language using chumsky.
//!
//! Two stages:
//! 1) Tokenisation from input string to a `Token` stream. Unrecognized characters are
//!    reported, skipped, and scanning continues.
//! 2) Parsing tokens into a [`ProgramNode`]. Any grammar mismatch aborts the parse.
//!
//! Accepted syntax:
//! - Assignments: `x = y`, `x = y + 1`, `x = 4 - y`, optionally terminated by `;`.
//! - Conditionals: `if x == y then { ... } else { ... }`.
//! - Loops: `while x < 4 do { ... }`.
//! - A brace-less body holds exactly one assignment: `if x == y then x = y else y = x`.
//! - Relations: `<=`, `<`, `==`, `>=`, `>`; operators: `+`, `-`.
//!
//! Consecutive assignments form a single [`ProgramNode::Unary`] run, and items are
//! composed left to right with [`ProgramNode::Sequential`].
use chumsky::{input::ValueInput, prelude::*};
use dloformal::term::{ArithOp, Comparison, Operand, Relation};
use dloformal::variable::{BOUND_VAR, INDEX_VAR, VarName};
use log::{debug, warn};
use num_bigint::BigInt;

use crate::tree::{Assignment, Program, ProgramNode};
use crate::utils::{Diagnostic, DiagnosticKind, Error};

pub type Spanned<T> = (T, SimpleSpan);
type Span = SimpleSpan;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // Keywords
    If,
    Then,
    Else,
    While,
    Do,

    // Operators
    Assign, // =
    Plus,
    Minus,
    Le,   // <=
    Lt,   // <
    EqEq, // ==
    Ge,   // >=
    Gt,   // >

    // Delimiters
    LBrace,
    RBrace,
    Semicolon,

    // Atoms
    Ident(String),
    Number(BigInt),

    /// Placeholder for a skipped, unrecognized character.
    Error,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::If => write!(f, "if"),
            Token::Then => write!(f, "then"),
            Token::Else => write!(f, "else"),
            Token::While => write!(f, "while"),
            Token::Do => write!(f, "do"),
            Token::Assign => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Le => write!(f, "<="),
            Token::Lt => write!(f, "<"),
            Token::EqEq => write!(f, "=="),
            Token::Ge => write!(f, ">="),
            Token::Gt => write!(f, ">"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Semicolon => write!(f, ";"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Number(value) => write!(f, "{value}"),
            Token::Error => write!(f, "<error>"),
        }
    }
}

// ---------------- Lexer ----------------

fn lexer<'src>() -> impl Parser<'src, &'src str, Vec<Spanned<Token>>, extra::Err<Rich<'src, char>>>
{
    // Multi-char operators first to avoid prefix capture
    let operator = choice((
        just("<=").to(Token::Le),
        just(">=").to(Token::Ge),
        just("==").to(Token::EqEq),
        just('<').to(Token::Lt),
        just('>').to(Token::Gt),
        just('=').to(Token::Assign),
        just('+').to(Token::Plus),
        just('-').to(Token::Minus),
        just('{').to(Token::LBrace),
        just('}').to(Token::RBrace),
        just(';').to(Token::Semicolon),
    ));

    let number = text::digits(10)
        .to_slice()
        .try_map(|digits: &str, span| {
            digits
                .parse::<BigInt>()
                .map(Token::Number)
                .map_err(|e| Rich::custom(span, format!("invalid number '{digits}': {e}")))
        })
        .labelled("number");

    let word = any()
        .filter(|c: &char| c.is_ascii_alphabetic())
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .map(|s: &str| match s {
            "if" => Token::If,
            "then" => Token::Then,
            "else" => Token::Else,
            "while" => Token::While,
            "do" => Token::Do,
            _ => Token::Ident(s.to_string()),
        })
        .labelled("identifier");

    // Anything else is reported and replaced by an error token that the parser never sees.
    let illegal = any().validate(|c: char, extra, emit| {
        emit.emit(Rich::custom(
            extra.span(),
            format!("illegal character '{c}'"),
        ));
        Token::Error
    });

    let token = choice((operator, number, word, illegal));

    token
        .map_with(|tok, e| (tok, e.span()))
        .padded()
        .repeated()
        .collect()
        .padded()
        .then_ignore(end())
}

// ---------------- chumsky parser over tokens ----------------

fn is_reserved(name: &str) -> bool {
    name == INDEX_VAR || name == BOUND_VAR
}

#[derive(Debug, Clone)]
enum Item {
    Assign(Assignment),
    Node(ProgramNode),
}

impl Item {
    fn into_node(self) -> ProgramNode {
        match self {
            Item::Assign(assignment) => ProgramNode::Unary(vec![assignment]),
            Item::Node(node) => node,
        }
    }
}

/// Append one item to the program built so far, extending a trailing run of
/// assignments instead of opening a new one.
fn push_item(acc: ProgramNode, item: Item) -> ProgramNode {
    match (acc, item) {
        (ProgramNode::Unary(mut run), Item::Assign(assignment)) => {
            run.push(assignment);
            ProgramNode::Unary(run)
        }
        (ProgramNode::Sequential(left, mut right), Item::Assign(assignment))
            if right.is_unary() =>
        {
            if let ProgramNode::Unary(run) = right.as_mut() {
                run.push(assignment);
            }
            ProgramNode::Sequential(left, right)
        }
        (acc, item) => ProgramNode::sequential(acc, item.into_node()),
    }
}

fn program_parser<'tokens, I>()
-> impl Parser<'tokens, I, ProgramNode, extra::Err<Rich<'tokens, Token, Span>>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = Span>,
{
    // Index symbols of the axioms cannot name program variables.
    let variable = select! { Token::Ident(name) => name }
        .validate(|name: String, extra, emit| {
            if is_reserved(&name) {
                emit.emit(Rich::custom(
                    extra.span(),
                    format!("`{name}` is reserved for loop indices and cannot name a variable"),
                ));
            }
            VarName::from(name)
        })
        .labelled("variable");

    let operand = variable
        .clone()
        .map(Operand::Var)
        .or(select! { Token::Number(value) => Operand::Lit(value) })
        .labelled("operand");

    let relation = select! {
        Token::Le => Relation::Le,
        Token::Lt => Relation::Lt,
        Token::EqEq => Relation::Eq,
        Token::Ge => Relation::Ge,
        Token::Gt => Relation::Gt,
    }
    .labelled("relation");

    let comparison = operand
        .clone()
        .then(relation)
        .then(operand.clone())
        .map(|((left, relation), right)| Comparison::new(left, relation, right))
        .labelled("comparison");

    let arith = select! {
        Token::Plus => ArithOp::Add,
        Token::Minus => ArithOp::Sub,
    };

    let assignment = variable
        .then_ignore(just(Token::Assign))
        .then(operand.clone())
        .then(arith.then(operand).or_not())
        .then_ignore(just(Token::Semicolon).or_not())
        .map(|((target, lhs), tail)| Assignment { target, lhs, tail })
        .labelled("assignment");

    recursive(|program| {
        let body = program
            .delimited_by(just(Token::LBrace), just(Token::RBrace))
            .or(assignment.clone().map(|a| ProgramNode::Unary(vec![a])))
            .labelled("body");

        let conditional = just(Token::If)
            .ignore_then(comparison.clone())
            .then_ignore(just(Token::Then))
            .then(body.clone())
            .then_ignore(just(Token::Else))
            .then(body.clone())
            .map(|((cond, then_branch), else_branch)| {
                ProgramNode::conditional(cond, then_branch, else_branch)
            })
            .labelled("conditional");

        let while_loop = just(Token::While)
            .ignore_then(comparison.clone())
            .then_ignore(just(Token::Do))
            .then(body)
            .map(|(cond, body)| ProgramNode::while_loop(cond, body))
            .labelled("loop");

        let item = choice((
            assignment.clone().map(Item::Assign),
            conditional.map(Item::Node),
            while_loop.map(Item::Node),
        ));

        item.clone()
            .map(Item::into_node)
            .foldl(item.repeated(), push_item)
            .labelled("program")
    })
}

// ---------------- Public API ----------------

/// A successfully parsed program along with the lexical errors that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub program: Program,
    pub skipped: Vec<Diagnostic>,
}

fn to_source_span(tokens: &[Spanned<Token>], span: &Span, src_len: usize) -> (usize, usize) {
    let start = tokens
        .get(span.start)
        .map(|(_, s)| s.start)
        .unwrap_or(src_len);
    let end = if span.end > span.start {
        tokens
            .get(span.end - 1)
            .map(|(_, s)| s.end)
            .unwrap_or(src_len)
    } else {
        start
    };
    (start, end.max(start))
}

/// Parse a program and collect its variable universe.
///
/// Returns the program on success. Unrecognized characters do not abort the parse;
/// they are logged and returned in [`ParseOutcome::skipped`]. A grammar mismatch
/// returns [`Error::Syntax`] holding every diagnostic gathered.
///
/// Example
/// ```
/// use dloprog::parser::parse;
/// let outcome = parse("x = x + 1; y = x").unwrap();
/// assert_eq!(outcome.program.universe.len(), 2);
/// assert!(outcome.skipped.is_empty());
/// ```
pub fn parse(src: &str) -> Result<ParseOutcome, Error> {
    // 1) Lexing
    let (tokens, lex_errs) = lexer().parse(src).into_output_errors();
    let mut diagnostics: Vec<Diagnostic> = lex_errs
        .into_iter()
        .map(|e| Diagnostic {
            kind: DiagnosticKind::Lexical,
            message: e.to_string(),
            start: e.span().start,
            end: e.span().end,
        })
        .collect();
    for diagnostic in &diagnostics {
        warn!("{diagnostic}");
    }

    let tokens: Vec<Spanned<Token>> = match tokens {
        Some(toks) => toks
            .into_iter()
            .filter(|(tok, _)| *tok != Token::Error)
            .collect(),
        None => return Err(Error::Syntax { diagnostics }),
    };

    // 2) Parsing over the plain token stream; spans are mapped back through `tokens`.
    let plain: Vec<Token> = tokens.iter().map(|(t, _s)| t.clone()).collect();
    let (root, parse_errs) = program_parser()
        .then_ignore(end())
        .parse(plain.as_slice())
        .into_output_errors();

    let skipped = diagnostics.clone();
    diagnostics.extend(parse_errs.into_iter().map(|e| {
        let (start, end) = to_source_span(&tokens, e.span(), src.len());
        Diagnostic {
            kind: DiagnosticKind::Syntax,
            message: e.to_string(),
            start,
            end,
        }
    }));

    match root {
        Some(root) if diagnostics.len() == skipped.len() => {
            let program = Program::from_root(root);
            debug!(
                "Parsed program with {} token(s) and {} variable(s): {}",
                tokens.len(),
                program.universe.len(),
                program.root
            );
            Ok(ParseOutcome { program, skipped })
        }
        _ => Err(Error::Syntax { diagnostics }),
    }
}
