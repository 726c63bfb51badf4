use dloformal::axiom::{AxiomRecord, PlainRecord};
use dloformal::term::{ArithOp, Comparison, Operand, Relation};
use dloformal::variable::VariableUniverse;
use dlocore::prelude::*;
use dloprog::tree::{Assignment, Program, ProgramNode};

fn render(src: &str) -> Vec<String> {
    Translator::default()
        .translate_source(src)
        .unwrap()
        .records
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn single_assignment() {
    assert_eq!(render("x = x + 1"), vec!["{x = x + 1}"]);
}

#[test]
fn straight_block_keeps_source_order() {
    assert_eq!(
        render("x = x + 1; y = x"),
        vec!["{x = x + 1, y = y}", "{x = x, y = x}"]
    );
}

#[test]
fn branch_guards_then_before_else() {
    assert_eq!(
        render("if x == y then x = y else y = x"),
        vec![
            "{x == y -> x = y, x == y -> y = y}",
            "{not (x == y) -> x = x, not (x == y) -> y = x}",
        ]
    );
}

#[test]
fn loop_reindexes_body() {
    let translation = Translator::default()
        .translate_source("while x < 4 do x = x + 1")
        .unwrap();
    let records = &translation.records;
    assert_eq!(records.len(), 3);

    let step = records[0].try_as_set_ref().unwrap();
    assert_eq!(step.axioms().len(), 1);
    assert_eq!(step.axioms()[0].to_string(), "x(n+1) = x(n) + 1");

    let boundary = records[1].try_as_boundary_ref().unwrap();
    assert_eq!(boundary.entry()[0].to_string(), "x(0) = x");
    assert_eq!(boundary.exit()[0].to_string(), "x = x(N)");

    let witness = records[2].try_as_smallest_ref().unwrap();
    assert_eq!(witness.bound_var(), "N");
    assert_eq!(witness.index_var(), "n");
    assert_eq!(witness.negated_condition().to_string(), "not (x(n) < 4)");
    assert!(!witness.negated_condition().positive);
}

#[test]
fn plain_records() {
    let translation = Translator::default()
        .translate_source("while x < 4 do x = x + 1")
        .unwrap();
    assert_eq!(
        translation.to_plain(),
        vec![
            PlainRecord::Axiom {
                variable: "x(n+1)".into(),
                value_expr: "x(n) + 1".into(),
                condition: None,
            },
            PlainRecord::Axiom {
                variable: "x(0)".into(),
                value_expr: "x".into(),
                condition: None,
            },
            PlainRecord::Axiom {
                variable: "x".into(),
                value_expr: "x(N)".into(),
                condition: None,
            },
            PlainRecord::Smallest {
                bound_var: "N".into(),
                index_var: "n".into(),
                negated_condition: "not (x(n) < 4)".into(),
            },
        ]
    );
}

#[test]
fn plain_records_keep_guards() {
    let translation = Translator::default()
        .translate_source("if x == y then x = y else y = x")
        .unwrap();
    let plain = translation.to_plain();
    assert_eq!(plain.len(), 4);
    assert_eq!(
        plain[3],
        PlainRecord::Axiom {
            variable: "y".into(),
            value_expr: "x".into(),
            condition: Some("not (x == y)".into()),
        }
    );
}

#[test]
fn nested_guards_put_outer_branch_first() {
    let translation = Translator::default()
        .translate_source("if a < b then { if x == y then x = 1 else y = 1 } else x = 0")
        .unwrap();
    let records = &translation.records;
    assert_eq!(records.len(), 3);

    let inner_then = records[0].try_as_set_ref().unwrap();
    assert_eq!(
        inner_then.get("x").unwrap().to_string(),
        "a < b and x == y -> x = 1"
    );
    let inner_else = records[1].try_as_set_ref().unwrap();
    assert_eq!(
        inner_else.get("y").unwrap().to_string(),
        "a < b and not (x == y) -> y = 1"
    );
    assert_eq!(
        inner_else.get("a").unwrap().condition().unwrap().literals().len(),
        2
    );
    let outer_else = records[2].try_as_set_ref().unwrap();
    assert_eq!(
        outer_else.get("x").unwrap().to_string(),
        "not (a < b) -> x = 0"
    );
}

#[test]
fn branch_inside_loop_is_reindexed() {
    let records = render("while i < 10 do { if i == 2 then j = 1 else j = 0 }");
    assert_eq!(
        records,
        vec![
            "{i(n) == 2 -> i(n+1) = i(n), i(n) == 2 -> j(n+1) = 1}",
            "{not (i(n) == 2) -> i(n+1) = i(n), not (i(n) == 2) -> j(n+1) = 0}",
            "boundary {i(0) = i, j(0) = j} {i = i(N), j = j(N)}",
            "smallest(N, n, not (i(n) < 10))",
        ]
    );
}

#[test]
fn loop_inside_branch_keeps_witness_unguarded() {
    let records = render("if x == 0 then { while x < 4 do x = x + 1 } else x = 1");
    assert_eq!(
        records,
        vec![
            "{x == 0 -> x(n+1) = x(n) + 1}",
            "boundary {x == 0 -> x(0) = x} {x == 0 -> x = x(N)}",
            "smallest(N, n, not (x(n) < 4))",
            "{not (x == 0) -> x = 1}",
        ]
    );
}

#[test]
fn nested_loops_stack_indices() {
    let records = render("while x < 4 do { while x > 1 do { x = x + 1 } }");
    assert_eq!(
        records,
        vec![
            "{x(n+1)(n+1) = x(n)(n) + 1}",
            "boundary {x(0)(n+1) = x(n)} {x(n+1) = x(N)(n)}",
            "smallest(N, n, not (x(n) > 1))",
            "boundary {x(0) = x} {x = x(N)}",
            "smallest(N, n, not (x(n) < 4))",
        ]
    );
}

#[test]
fn continuation_follows_loop() {
    let records = render("i = 0 j = 9 while i < 10 do { i = i + 1 j = j - 1 } k = i");
    assert_eq!(records.len(), 7);
    assert_eq!(records[0], "{i = 0, j = j, k = k}");
    assert_eq!(records[1], "{i = i, j = 9, k = k}");
    assert_eq!(records[2], "{i(n+1) = i(n) + 1, j(n+1) = j(n), k(n+1) = k(n)}");
    assert_eq!(records[3], "{i(n+1) = i(n), j(n+1) = j(n) - 1, k(n+1) = k(n)}");
    assert_eq!(records[5], "smallest(N, n, not (i(n) < 10))");
    assert_eq!(records[6], "{i = i, j = j, k = i}");
}

#[test]
fn similar_names_are_reindexed_independently() {
    assert_eq!(
        render("while x < xx do x = xx"),
        vec![
            "{x(n+1) = xx(n), xx(n+1) = xx(n)}",
            "boundary {x(0) = x, xx(0) = xx} {x = x(N), xx = xx(N)}",
            "smallest(N, n, not (x(n) < xx(n)))",
        ]
    );
}

#[test]
fn every_set_is_frame_complete() {
    let src = "x = 0 y = 0 while x < 4 do { if x == 2 then { y = 1 x = x + 1 } else { y = 0 } y = y + 1 } x = y";
    let translation = Translator::default().translate_source(src).unwrap();
    let universe = &translation.program.universe;
    for record in &translation.records {
        assert!(record.check_frame(universe).is_ok(), "{record}");
    }
    let witnesses = translation
        .records
        .iter()
        .filter(|r| r.is_smallest())
        .count();
    assert_eq!(witnesses, 1);
}

#[test]
fn unknown_variable_fails_fast() {
    let universe: VariableUniverse = ["x"].into_iter().collect();
    let root = ProgramNode::unary([
        Assignment::binary("x", Operand::var("x"), ArithOp::Add, Operand::lit(1)),
        Assignment::copy("x", Operand::var("y")),
    ]);
    let program = Program::new(root, universe);

    let err = translate(&program).unwrap_err();
    match &err {
        DloError::UnknownVariable { name, context } => {
            assert_eq!(name.as_str(), "y");
            assert!(context.contains("x = y"));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn unknown_condition_variable_fails_fast() {
    let universe: VariableUniverse = ["x"].into_iter().collect();
    let cond = Comparison::new(Operand::var("z"), Relation::Lt, Operand::lit(4));
    let root = ProgramNode::while_loop(
        cond,
        ProgramNode::unary([Assignment::copy("x", Operand::lit(1))]),
    );
    let err = translate(&Program::new(root, universe)).unwrap_err();
    assert!(err.is_unknown_variable());
    assert!(err.to_string().contains("loop condition"));
}

#[test]
fn builder_on_empty_chain() {
    let universe: VariableUniverse = ["x"].into_iter().collect();
    assert!(AxiomBuilder::new(&universe).build(None).unwrap().is_empty());
}

#[test]
fn parse_errors_propagate() {
    let err = Translator::default()
        .translate_source("while x < do x = 1")
        .unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn lexical_errors_are_reported_with_output() {
    let translation = Translator::default()
        .translate_source("x = x + 1 @")
        .unwrap();
    assert_eq!(translation.skipped.len(), 1);
    assert_eq!(translation.records.len(), 1);
}

#[test]
fn config_does_not_change_records() {
    let config = TranslateConfig {
        check_frames: false,
        dump_flow: true,
        ..TranslateConfig::default()
    };
    let src = "if x == y then x = y else y = x";
    assert_eq!(
        Translator::new(config).translate_source(src).unwrap().records,
        Translator::default().translate_source(src).unwrap().records
    );
}

#[test]
fn records_expose_their_axioms() {
    let translation = Translator::default()
        .translate_source("while x < 4 do x = x + 1")
        .unwrap();
    let counts: Vec<usize> = translation
        .records
        .iter()
        .map(|r: &AxiomRecord| r.axioms().count())
        .collect();
    assert_eq!(counts, vec![1, 2, 0]);
}

#[test]
fn index_symbols_in_universe_are_rejected() {
    let universe: VariableUniverse = ["N", "x"].into_iter().collect();
    let root = ProgramNode::while_loop(
        Comparison::new(Operand::var("x"), Relation::Lt, Operand::var("N")),
        ProgramNode::unary([Assignment::binary(
            "x",
            Operand::var("x"),
            ArithOp::Add,
            Operand::lit(1),
        )]),
    );
    let err = translate(&Program::new(root, universe)).unwrap_err();
    match &err {
        DloError::ReservedVariable { name } => assert_eq!(name.as_str(), "N"),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn index_symbols_in_source_are_rejected() {
    let err = Translator::default()
        .translate_source("while n < 4 do n = n + 1")
        .unwrap_err();
    assert!(err.is_parse());
}
