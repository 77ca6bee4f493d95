//! Integration tests for the level-configurable parser.

use pysubset::pysubset::ast::NodeKind;
use pysubset::pysubset::error::ParseError;
use pysubset::pysubset::level::Level;
use pysubset::pysubset::parsing::parse_module;
use pysubset::pysubset::testing::{assert_dump, parse_at};
use pysubset::pysubset::token::Token;
use pysubset::pysubset::validation::{is_valid, minimum_level};
use rstest::rstest;

#[rstest]
#[case::negation_binds_tighter("-1 + 2", "BinOp(left=UnaryOp(op=USub(), operand=Constant(value=1)), op=Add(), right=Constant(value=2))")]
#[case::addition_is_left_associative("a + b + c", "BinOp(left=BinOp(left=Name(id='a', ctx=Load()), op=Add(), right=Name(id='b', ctx=Load())), op=Add(), right=Name(id='c', ctx=Load()))")]
#[case::double_negation("--x", "UnaryOp(op=USub(), operand=UnaryOp(op=USub(), operand=Name(id='x', ctx=Load())))")]
#[case::parentheses_group("a + (b + c)", "BinOp(left=Name(id='a', ctx=Load()), op=Add(), right=BinOp(left=Name(id='b', ctx=Load()), op=Add(), right=Name(id='c', ctx=Load())))")]
#[case::calls_chain("f(1)(2)", "Call(func=Call(func=Name(id='f', ctx=Load()), args=[Constant(value=1)]), args=[Constant(value=2)])")]
#[case::empty_call("f()", "Call(func=Name(id='f', ctx=Load()), args=[])")]
fn test_l0_expressions(#[case] source: &str, #[case] expected: &str) {
    assert_dump(
        Level::L0,
        &format!("{source}\n"),
        &format!("Module(body=[Expr(value={expected})])"),
    );
}

#[rstest]
#[case::and_binds_tighter_than_or("a or b and c", "BoolOp(op=Or(), values=[Name(id='a', ctx=Load()), BoolOp(op=And(), values=[Name(id='b', ctx=Load()), Name(id='c', ctx=Load())])])")]
#[case::chains_flatten("a and b and c", "BoolOp(op=And(), values=[Name(id='a', ctx=Load()), Name(id='b', ctx=Load()), Name(id='c', ctx=Load())])")]
#[case::not_binds_looser_than_compare("not a == b", "UnaryOp(op=Not(), operand=Compare(left=Name(id='a', ctx=Load()), ops=[Eq()], comparators=[Name(id='b', ctx=Load())]))")]
#[case::compare_chains_nest_left("a == b != c", "Compare(left=Compare(left=Name(id='a', ctx=Load()), ops=[Eq()], comparators=[Name(id='b', ctx=Load())]), ops=[NotEq()], comparators=[Name(id='c', ctx=Load())])")]
#[case::compare_operands_are_sums("a + 1 is b", "Compare(left=BinOp(left=Name(id='a', ctx=Load()), op=Add(), right=Constant(value=1)), ops=[Is()], comparators=[Name(id='b', ctx=Load())])")]
#[case::subscript_of_call("f(x)[0]", "Subscript(value=Call(func=Name(id='f', ctx=Load()), args=[Name(id='x', ctx=Load())]), slice=Constant(value=0), ctx=Load())")]
#[case::dict_literal("{True: [1], 2: {}}", "Dict(keys=[Constant(value=True), Constant(value=2)], values=[List(elts=[Constant(value=1)], ctx=Load()), Dict(keys=[], values=[])])")]
fn test_l1_expressions(#[case] source: &str, #[case] expected: &str) {
    assert_dump(
        Level::L1,
        &format!("{source}\n"),
        &format!("Module(body=[Expr(value={expected})])"),
    );
}

#[rstest]
#[case::conditional("a if b else c", "IfExp(test=Name(id='b', ctx=Load()), body=Name(id='a', ctx=Load()), orelse=Name(id='c', ctx=Load()))")]
#[case::conditional_nests_right("1 if a else 2 if b else 3", "IfExp(test=Name(id='a', ctx=Load()), body=Constant(value=1), orelse=IfExp(test=Name(id='b', ctx=Load()), body=Constant(value=2), orelse=Constant(value=3)))")]
#[case::lambda_body_is_conditional("lambda x: x if x else 0", "Lambda(args=arguments(args=[arg(arg='x')]), body=IfExp(test=Name(id='x', ctx=Load()), body=Name(id='x', ctx=Load()), orelse=Constant(value=0)))")]
#[case::lambda_without_parameters("lambda: 1", "Lambda(args=arguments(args=[]), body=Constant(value=1))")]
fn test_l2_expressions(#[case] source: &str, #[case] expected: &str) {
    assert_dump(
        Level::L2,
        &format!("{source}\n"),
        &format!("Module(body=[Expr(value={expected})])"),
    );
}

#[rstest]
#[case::binary_minus("a - b\n", Level::L3)]
#[case::trailing_comma_in_call("f(1,)\n", Level::L3)]
#[case::trailing_comma_in_list("[1, 2,]\n", Level::L3)]
#[case::compare_at_l0("a == b\n", Level::L0)]
#[case::list_at_l0("[1]\n", Level::L0)]
#[case::subscript_target_at_l0("a[0] = 1\n", Level::L0)]
#[case::lambda_at_l1("f = lambda: 1\n", Level::L1)]
#[case::conditional_at_l1("a if b else c\n", Level::L1)]
#[case::def_at_l1("def f():\n    return\n", Level::L1)]
#[case::while_at_l2("while x:\n    x = 0\n", Level::L2)]
#[case::class_at_l2("class A:\n    x = 1\n", Level::L2)]
#[case::lambda_in_else_branch("a if b else lambda: c\n", Level::L3)]
#[case::assignment_to_call("f() = 1\n", Level::L3)]
#[case::empty_block("if x:\nprint(x)\n", Level::L3)]
fn test_rejected_programs(#[case] source: &str, #[case] level: Level) {
    assert!(
        matches!(parse_module(source, level), Err(ParseError::Syntax(_))),
        "{source:?} should not parse at {level}"
    );
}

#[test]
fn test_assignment_to_literal_reports_location() {
    let error = parse_module("x = 1\n1 = x\n", Level::L0).unwrap_err();
    match error {
        ParseError::Syntax(syntax) => {
            assert_eq!(syntax.found, Some(Token::Assign));
            assert_eq!(syntax.location.line, 2);
            assert_eq!(syntax.location.column, 3);
        }
        other => panic!("expected a syntax error, got {other}"),
    }
}

#[test]
fn test_inconsistent_dedent() {
    let source = "if a:\n    x = 1\n  y = 2\n";
    let error = parse_module(source, Level::L3).unwrap_err();
    assert_eq!(error.kind_name(), "IndentationError");
    assert_eq!(error.location().line, 3);
}

#[test]
fn test_else_binds_to_nearest_block() {
    let source = "if a:\n    if b:\n        x = 1\nelse:\n    x = 2\n";
    assert_dump(
        Level::L3,
        source,
        "Module(body=[If(test=Name(id='a', ctx=Load()), body=[If(test=Name(id='b', ctx=Load()), body=[Assign(targets=[Name(id='x', ctx=Store())], value=Constant(value=1))], orelse=[])], orelse=[Assign(targets=[Name(id='x', ctx=Store())], value=Constant(value=2))])])",
    );
}

#[test]
fn test_single_line_suites() {
    let module = parse_at(Level::L3, "while x: x = x + 1\nif x: print(x)\nelse: print(0)\n");
    assert_eq!(module.body.len(), 2);
    assert!(module.body.iter().all(|stmt| stmt.is_compound()));
}

#[test]
fn test_missing_final_newline_is_tolerated() {
    let with = parse_at(Level::L3, "def f(a):\n    return a\n");
    let without = parse_at(Level::L3, "def f(a):\n    return a");
    assert_eq!(with, without);
}

#[test]
fn test_empty_program() {
    for level in Level::ALL {
        assert!(parse_at(level, "").body.is_empty());
        assert!(parse_at(level, "\n\n   \n").body.is_empty());
    }
}

/// Whatever parses at a level parses identically at every higher level.
#[rstest]
#[case("x = -1 + f(2)\n")]
#[case("(x) = y\n[x] = 1\n")]
#[case("a[b] = c == d or not e\n")]
#[case("f = lambda a, b: a + b if a else b\n")]
#[case("def g():\n    return 1\ng()\n")]
fn test_levels_are_monotone(#[case] source: &str) {
    let lowest = Level::ALL
        .into_iter()
        .find(|level| parse_module(source, *level).is_ok())
        .expect("program parses at some level");
    let expected = parse_at(lowest, source);
    for level in Level::ALL.into_iter().filter(|level| *level >= lowest) {
        assert_eq!(parse_at(level, source), expected, "{source:?} at {level}");
    }
}

#[test]
fn test_bracketed_target_is_a_list_node() {
    let module = parse_at(Level::L0, "[x] = 1\n");
    assert!(!is_valid(Level::L0, &module));
    assert_eq!(minimum_level(&module), Level::L1);
    assert_eq!(NodeKind::List.introduced_at(), Level::L1);
}
