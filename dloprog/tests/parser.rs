use dloformal::term::{ArithOp, Comparison, Operand, Relation};
use dloformal::variable::VarName;
use dloprog::parser::parse;
use dloprog::tree::{Assignment, ProgramNode};
use dloprog::utils::{DiagnosticKind, Error};

fn names(src: &str) -> Vec<String> {
    parse(src)
        .unwrap()
        .program
        .universe
        .iter()
        .map(|n| n.as_str().to_string())
        .collect()
}

#[test]
fn single_assignment() {
    let outcome = parse("x = x + 1").unwrap();
    assert_eq!(
        outcome.program.root,
        ProgramNode::Unary(vec![Assignment::binary(
            "x",
            Operand::var("x"),
            ArithOp::Add,
            Operand::lit(1)
        )])
    );
    assert_eq!(names("x = x + 1"), vec!["x"]);
}

#[test]
fn consecutive_assignments_form_one_block() {
    let outcome = parse("x = x + 1; y = x").unwrap();
    let ProgramNode::Unary(run) = &outcome.program.root else {
        panic!("expected a unary block, got {:?}", outcome.program.root);
    };
    assert_eq!(run.len(), 2);
    assert_eq!(run[0].to_string(), "x = x + 1");
    assert_eq!(run[1], Assignment::copy("y", Operand::var("x")));
}

#[test]
fn semicolons_are_optional() {
    assert_eq!(
        parse("x = 1 y = 2").unwrap().program,
        parse("x = 1; y = 2;").unwrap().program
    );
}

#[test]
fn braceless_conditional() {
    let outcome = parse("if x == y then x = y else y = x").unwrap();
    match &outcome.program.root {
        ProgramNode::Conditional {
            cond,
            then_branch,
            else_branch,
        } => {
            assert_eq!(
                *cond,
                Comparison::new(Operand::var("x"), Relation::Eq, Operand::var("y"))
            );
            assert_eq!(
                **then_branch,
                ProgramNode::Unary(vec![Assignment::copy("x", Operand::var("y"))])
            );
            assert_eq!(
                **else_branch,
                ProgramNode::Unary(vec![Assignment::copy("y", Operand::var("x"))])
            );
        }
        other => panic!("expected conditional, got {other:?}"),
    }
}

#[test]
fn braceless_body_takes_one_assignment() {
    let outcome = parse("while x < 4 do x = x + 1 y = x").unwrap();
    let ProgramNode::Sequential(left, right) = &outcome.program.root else {
        panic!("expected a sequence");
    };
    assert!(left.is_loop());
    assert_eq!(
        **right,
        ProgramNode::Unary(vec![Assignment::copy("y", Operand::var("x"))])
    );
}

#[test]
fn items_fold_left() {
    let src = "x = 0 y = 0 while x < 4 do { if x == 2 then { y = 1 x = x + 1 } else { y = 0 } y = y + 1 } x = y";
    let root = parse(src).unwrap().program.root;

    // ((x = 0; y = 0) ; loop) ; x = y
    let ProgramNode::Sequential(head, tail) = &root else {
        panic!("expected a sequence");
    };
    assert_eq!(
        **tail,
        ProgramNode::Unary(vec![Assignment::copy("x", Operand::var("y"))])
    );
    let ProgramNode::Sequential(init, lp) = head.as_ref() else {
        panic!("expected a nested sequence");
    };
    assert_eq!(init.try_as_unary_ref().map(Vec::len), Some(2));

    let ProgramNode::Loop { cond, body } = lp.as_ref() else {
        panic!("expected a loop");
    };
    assert_eq!(cond.to_string(), "x < 4");
    let ProgramNode::Sequential(branch, bump) = body.as_ref() else {
        panic!("expected loop body to be a sequence");
    };
    assert!(branch.is_conditional());
    assert_eq!(bump.to_string(), "y = y + 1;");
}

#[test]
fn universe_is_every_identifier() {
    assert_eq!(
        names("i = 0 j = 9 while i < 10 do { i = i + 1 j = j - 1 }"),
        vec!["i", "j"]
    );
    assert_eq!(names("while a < b do { c = 1 }"), vec!["a", "b", "c"]);
    assert_eq!(names("xx = x"), vec!["x", "xx"]);
}

#[test]
fn nested_loops() {
    let root = parse("while x < 4 do { while x > 1 do { x = x + 1 } }")
        .unwrap()
        .program
        .root;
    let ProgramNode::Loop { body, .. } = root else {
        panic!("expected a loop");
    };
    assert!(body.is_loop());
}

#[test]
fn all_relations() {
    for (src, relation) in [
        ("<=", Relation::Le),
        ("<", Relation::Lt),
        ("==", Relation::Eq),
        (">=", Relation::Ge),
        (">", Relation::Gt),
    ] {
        let root = parse(&format!("while x {src} 3 do x = x - 1"))
            .unwrap()
            .program
            .root;
        let ProgramNode::Loop { cond, .. } = root else {
            panic!("expected a loop");
        };
        assert_eq!(cond.relation, relation);
        assert_eq!(cond.right, Operand::lit(3));
    }
}

#[test]
fn lexical_errors_are_skipped() {
    let outcome = parse("x = x + 1 $ y = x").unwrap();
    assert_eq!(outcome.skipped.len(), 1);
    let diagnostic = &outcome.skipped[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::Lexical);
    assert_eq!(diagnostic.span(), 10..11);
    assert!(diagnostic.message.contains('$'));
    assert_eq!(outcome.program, parse("x = x + 1 y = x").unwrap().program);
}

#[test]
fn syntax_error_aborts() {
    let err = parse("if x == y then x = y").unwrap_err();
    let Error::Syntax { diagnostics } = &err;
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().any(|d| d.kind.is_syntax()));
    assert!(err.to_string().starts_with("Syntax error in input"));
}

#[test]
fn syntax_error_span_points_into_source() {
    let src = "x = = 1";
    let Error::Syntax { diagnostics } = parse(src).unwrap_err();
    let syntax = diagnostics
        .iter()
        .find(|d| d.kind.is_syntax())
        .expect("a syntax diagnostic");
    assert_eq!(syntax.span(), 4..5);
}

#[test]
fn empty_input_is_rejected() {
    assert!(parse("").is_err());
    assert!(parse("   \n ").is_err());
}

#[test]
fn keywords_cannot_be_assigned() {
    assert!(parse("while = 1").is_err());
}

#[test]
fn display_reparses_to_equal_tree() {
    for src in [
        "x = x + 1",
        "x = x + 1; y = x",
        "if x == y then x = y else y = x",
        "while x < 4 do x = x + 1",
        "x = 0 y = 0 while x < 4 do { if x == 2 then { y = 1 x = x + 1 } else { y = 0 } y = y + 1 } x = y",
        "while x < 4 do { while x > 1 do { x = x + 1 } }",
        "i = 0 j = 9 while i < 10 do { i = i + 1 j = j - 1 }",
    ] {
        let program = parse(src).unwrap().program;
        let printed = program.root.to_string();
        let reparsed = parse(&printed).unwrap().program;
        assert_eq!(program, reparsed, "round trip of `{src}` through `{printed}`");
    }
}

#[test]
fn large_literals_are_exact() {
    let root = parse("x = 123456789012345678901234567890")
        .unwrap()
        .program
        .root;
    assert_eq!(root.to_string(), "x = 123456789012345678901234567890;");
    assert_eq!(
        root.collect_variables().iter().collect::<Vec<_>>(),
        vec![&VarName::new("x")]
    );
}

#[test]
fn index_symbols_cannot_name_variables() {
    for src in ["while n < N do n = n + 1", "x = n", "N = 1", "if x == N then x = 1 else x = 2"] {
        let Error::Syntax { diagnostics } = parse(src).unwrap_err();
        assert!(
            diagnostics
                .iter()
                .any(|d| d.kind.is_syntax() && d.message.contains("reserved")),
            "`{src}` gave {diagnostics:?}"
        );
    }
    // Longer names starting with an index symbol stay ordinary identifiers.
    assert_eq!(names("n1 = N2 + nn"), vec!["N2", "n1", "nn"]);
}

#[test]
fn reserved_name_span_points_at_the_identifier() {
    let Error::Syntax { diagnostics } = parse("x = n").unwrap_err();
    let reserved = diagnostics
        .iter()
        .find(|d| d.message.contains("reserved"))
        .expect("a reserved-name diagnostic");
    assert_eq!(reserved.span(), 4..5);
}
