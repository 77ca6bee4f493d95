//! Source printer
//!
//!     Turns a tree back into program text that parses to the same tree. Parentheses are only
//!     written where the precedence of a child is looser than its position allows. Blocks are
//!     indented by four spaces and every suite is printed in its indented form.
//!
//!     Binding strengths, loosest first:
//!
//!         1  lambda, conditional
//!         2  or
//!         3  and
//!         4  not
//!         5  comparison        right operand needs 6
//!         6  +                 right operand needs 7
//!         7  unary -
//!         8  call, subscript, atoms

use super::{Format, FormatError};
use crate::pysubset::ast::{
    BoolOperator, CmpOperator, Constant, Expr, Module, Parameter, Stmt, UnaryOperator,
};

const INDENT: &str = "    ";

const LOOSEST: u8 = 1;
const OR: u8 = 2;
const AND: u8 = 3;
const NOT: u8 = 4;
const COMPARE: u8 = 5;
const ADD: u8 = 6;
const NEG: u8 = 7;
const PRIMARY: u8 = 8;

pub struct SourceFormat;

impl Format for SourceFormat {
    fn name(&self) -> &str {
        "source"
    }

    fn serialize(&self, module: &Module) -> Result<String, FormatError> {
        Ok(to_source(module))
    }
}

pub fn to_source(module: &Module) -> String {
    let mut out = String::new();
    write_block(&mut out, &module.body, 0);
    out
}

fn write_block(out: &mut String, body: &[Stmt], depth: usize) {
    for stmt in body {
        write_stmt(out, stmt, depth);
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    let pad = INDENT.repeat(depth);
    match stmt {
        Stmt::Assign { target, value } => {
            out.push_str(&format!("{pad}{} = {}\n", expr_source(target), expr_source(value)));
        }
        Stmt::Expr { value } => out.push_str(&format!("{pad}{}\n", expr_source(value))),
        Stmt::Return { value: None } => out.push_str(&format!("{pad}return\n")),
        Stmt::Return { value: Some(value) } => {
            out.push_str(&format!("{pad}return {}\n", expr_source(value)));
        }
        Stmt::FunctionDef { name, params, body } => {
            out.push_str(&format!("{pad}def {name}({}):\n", parameters(params)));
            write_block(out, body, depth + 1);
        }
        Stmt::If { test, body, orelse } => {
            out.push_str(&format!("{pad}if {}:\n", expr_source(test)));
            write_block(out, body, depth + 1);
            if !orelse.is_empty() {
                out.push_str(&format!("{pad}else:\n"));
                write_block(out, orelse, depth + 1);
            }
        }
        Stmt::While { test, body } => {
            out.push_str(&format!("{pad}while {}:\n", expr_source(test)));
            write_block(out, body, depth + 1);
        }
        Stmt::ClassDef { name, body } => {
            out.push_str(&format!("{pad}class {name}:\n"));
            write_block(out, body, depth + 1);
        }
    }
}

/// An expression in a position that accepts any expression.
pub fn expr_source(expr: &Expr) -> String {
    with_precedence(expr, LOOSEST)
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Lambda { .. } | Expr::IfExp { .. } => LOOSEST,
        Expr::BoolOp {
            op: BoolOperator::Or,
            ..
        } => OR,
        Expr::BoolOp {
            op: BoolOperator::And,
            ..
        } => AND,
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            ..
        } => NOT,
        Expr::Compare { .. } => COMPARE,
        Expr::BinOp { .. } => ADD,
        Expr::UnaryOp {
            op: UnaryOperator::Neg,
            ..
        } => NEG,
        _ => PRIMARY,
    }
}

fn with_precedence(expr: &Expr, required: u8) -> String {
    let text = render(expr);
    if precedence(expr) < required {
        format!("({text})")
    } else {
        text
    }
}

fn render(expr: &Expr) -> String {
    match expr {
        Expr::Name { id, .. } => id.clone(),
        Expr::Constant { value } => match value {
            Constant::Int(value) => value.to_string(),
            Constant::Bool(true) => "True".to_string(),
            Constant::Bool(false) => "False".to_string(),
        },
        Expr::Call { func, args } => {
            format!("{}({})", with_precedence(func, PRIMARY), comma_list(args))
        }
        Expr::Subscript { value, index, .. } => {
            format!("{}[{}]", with_precedence(value, PRIMARY), expr_source(index))
        }
        Expr::List { elts, .. } => format!("[{}]", comma_list(elts)),
        Expr::Dict { keys, values } => {
            let entries: Vec<String> = keys
                .iter()
                .zip(values)
                .map(|(key, value)| format!("{}: {}", expr_source(key), expr_source(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Expr::UnaryOp {
            op: UnaryOperator::Neg,
            operand,
        } => format!("-{}", with_precedence(operand, NEG)),
        Expr::UnaryOp {
            op: UnaryOperator::Not,
            operand,
        } => format!("not {}", with_precedence(operand, NOT)),
        Expr::BinOp { left, right, .. } => format!(
            "{} + {}",
            with_precedence(left, ADD),
            with_precedence(right, NEG)
        ),
        Expr::Compare { left, op, right } => format!(
            "{} {} {}",
            with_precedence(left, COMPARE),
            comparison_operator(*op),
            with_precedence(right, ADD)
        ),
        Expr::BoolOp { op, values } => {
            let (keyword, operand) = match op {
                BoolOperator::Or => (" or ", AND),
                BoolOperator::And => (" and ", NOT),
            };
            values
                .iter()
                .map(|value| with_precedence(value, operand))
                .collect::<Vec<_>>()
                .join(keyword)
        }
        Expr::IfExp { test, body, orelse } => {
            let orelse = match orelse.as_ref() {
                Expr::Lambda { .. } => format!("({})", render(orelse)),
                other => with_precedence(other, LOOSEST),
            };
            format!(
                "{} if {} else {}",
                with_precedence(body, OR),
                with_precedence(test, OR),
                orelse
            )
        }
        Expr::Lambda { params, body } => {
            if params.is_empty() {
                format!("lambda: {}", expr_source(body))
            } else {
                format!("lambda {}: {}", parameters(params), expr_source(body))
            }
        }
    }
}

fn comma_list(items: &[Expr]) -> String {
    items
        .iter()
        .map(expr_source)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parameters(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn comparison_operator(op: CmpOperator) -> &'static str {
    match op {
        CmpOperator::Eq => "==",
        CmpOperator::NotEq => "!=",
        CmpOperator::Is => "is",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_parentheses() {
        let grouped = Expr::add(Expr::name("a"), Expr::add(Expr::name("b"), Expr::name("c")));
        assert_eq!(expr_source(&grouped), "a + (b + c)");

        let left = Expr::add(Expr::add(Expr::name("a"), Expr::name("b")), Expr::name("c"));
        assert_eq!(expr_source(&left), "a + b + c");

        let negated_sum = Expr::neg(Expr::add(Expr::int(1), Expr::int(2)));
        assert_eq!(expr_source(&negated_sum), "-(1 + 2)");
    }

    #[test]
    fn test_comparison_chains() {
        let nested = Expr::compare(
            Expr::compare(Expr::name("a"), CmpOperator::Eq, Expr::name("b")),
            CmpOperator::Eq,
            Expr::name("c"),
        );
        assert_eq!(expr_source(&nested), "a == b == c");

        let right = Expr::compare(
            Expr::name("a"),
            CmpOperator::Is,
            Expr::compare(Expr::name("b"), CmpOperator::NotEq, Expr::name("c")),
        );
        assert_eq!(expr_source(&right), "a is (b != c)");
    }

    #[test]
    fn test_nested_bool_ops_keep_parentheses() {
        let inner = Expr::bool_op(BoolOperator::And, vec![Expr::name("a"), Expr::name("b")]);
        let outer = Expr::bool_op(BoolOperator::And, vec![inner, Expr::name("c")]);
        assert_eq!(expr_source(&outer), "(a and b) and c");
    }

    #[test]
    fn test_conditional_and_lambda() {
        let expr = Expr::if_exp(
            Expr::name("c"),
            Expr::lambda(vec![], Expr::int(1)),
            Expr::lambda(vec![Parameter::new("x")], Expr::name("x")),
        );
        assert_eq!(expr_source(&expr), "(lambda: 1) if c else (lambda x: x)");
    }

    #[test]
    fn test_blocks_are_indented() {
        let module = Module::new(vec![Stmt::If {
            test: Expr::name("x"),
            body: vec![Stmt::While {
                test: Expr::bool(true),
                body: vec![Stmt::Return { value: None }],
            }],
            orelse: vec![Stmt::assign(Expr::store("y"), Expr::int(2))],
        }]);
        assert_eq!(
            to_source(&module),
            "if x:\n    while True:\n        return\nelse:\n    y = 2\n"
        );
    }
}
