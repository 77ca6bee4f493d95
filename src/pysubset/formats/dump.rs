//! `ast.dump` notation
//!
//! Renders a tree the way the reference interpreter's `ast.dump` does, without attributes,
//! so the two can be compared side by side: `Module(body=[Expr(value=Name(id='x', ctx=Load()))])`.

use super::{Format, FormatError};
use crate::pysubset::ast::{
    BinaryOperator, BoolOperator, CmpOperator, Constant, Expr, ExprContext, Module, Parameter,
    Stmt, UnaryOperator,
};

pub struct DumpFormat;

impl Format for DumpFormat {
    fn name(&self) -> &str {
        "dump"
    }

    fn serialize(&self, module: &Module) -> Result<String, FormatError> {
        Ok(dump(module))
    }
}

pub fn dump(module: &Module) -> String {
    format!("Module(body={})", stmts(&module.body))
}

pub fn dump_expr(expr: &Expr) -> String {
    match expr {
        Expr::Name { id, ctx } => format!("Name(id='{id}', ctx={})", context(*ctx)),
        Expr::Constant { value } => format!("Constant(value={})", constant(*value)),
        Expr::Call { func, args } => {
            format!("Call(func={}, args={})", dump_expr(func), exprs(args))
        }
        Expr::UnaryOp { op, operand } => format!(
            "UnaryOp(op={}, operand={})",
            unary_operator(*op),
            dump_expr(operand)
        ),
        Expr::BinOp { left, op, right } => format!(
            "BinOp(left={}, op={}, right={})",
            dump_expr(left),
            binary_operator(*op),
            dump_expr(right)
        ),
        Expr::BoolOp { op, values } => format!(
            "BoolOp(op={}, values={})",
            bool_operator(*op),
            exprs(values)
        ),
        Expr::Compare { left, op, right } => format!(
            "Compare(left={}, ops=[{}], comparators=[{}])",
            dump_expr(left),
            cmp_operator(*op),
            dump_expr(right)
        ),
        Expr::IfExp { test, body, orelse } => format!(
            "IfExp(test={}, body={}, orelse={})",
            dump_expr(test),
            dump_expr(body),
            dump_expr(orelse)
        ),
        Expr::List { elts, ctx } => format!("List(elts={}, ctx={})", exprs(elts), context(*ctx)),
        Expr::Dict { keys, values } => {
            format!("Dict(keys={}, values={})", exprs(keys), exprs(values))
        }
        Expr::Subscript { value, index, ctx } => format!(
            "Subscript(value={}, slice={}, ctx={})",
            dump_expr(value),
            dump_expr(index),
            context(*ctx)
        ),
        Expr::Lambda { params, body } => format!(
            "Lambda(args={}, body={})",
            arguments(params),
            dump_expr(body)
        ),
    }
}

pub fn dump_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Assign { target, value } => format!(
            "Assign(targets=[{}], value={})",
            dump_expr(target),
            dump_expr(value)
        ),
        Stmt::Expr { value } => format!("Expr(value={})", dump_expr(value)),
        Stmt::Return { value: Some(value) } => format!("Return(value={})", dump_expr(value)),
        Stmt::Return { value: None } => "Return()".to_string(),
        Stmt::FunctionDef { name, params, body } => format!(
            "FunctionDef(name='{name}', args={}, body={})",
            arguments(params),
            stmts(body)
        ),
        Stmt::If { test, body, orelse } => format!(
            "If(test={}, body={}, orelse={})",
            dump_expr(test),
            stmts(body),
            stmts(orelse)
        ),
        Stmt::While { test, body } => {
            format!("While(test={}, body={})", dump_expr(test), stmts(body))
        }
        Stmt::ClassDef { name, body } => format!("ClassDef(name='{name}', body={})", stmts(body)),
    }
}

fn stmts(body: &[Stmt]) -> String {
    list(body.iter().map(dump_stmt))
}

fn exprs(items: &[Expr]) -> String {
    list(items.iter().map(dump_expr))
}

fn list(items: impl Iterator<Item = String>) -> String {
    format!("[{}]", items.collect::<Vec<_>>().join(", "))
}

fn arguments(params: &[Parameter]) -> String {
    let args = list(params.iter().map(|param| format!("arg(arg='{}')", param.name)));
    format!("arguments(args={args})")
}

fn constant(value: Constant) -> String {
    match value {
        Constant::Int(value) => value.to_string(),
        Constant::Bool(true) => "True".to_string(),
        Constant::Bool(false) => "False".to_string(),
    }
}

fn context(ctx: ExprContext) -> &'static str {
    match ctx {
        ExprContext::Load => "Load()",
        ExprContext::Store => "Store()",
    }
}

fn unary_operator(op: UnaryOperator) -> &'static str {
    match op {
        UnaryOperator::Neg => "USub()",
        UnaryOperator::Not => "Not()",
    }
}

fn binary_operator(op: BinaryOperator) -> &'static str {
    match op {
        BinaryOperator::Add => "Add()",
    }
}

fn bool_operator(op: BoolOperator) -> &'static str {
    match op {
        BoolOperator::And => "And()",
        BoolOperator::Or => "Or()",
    }
}

fn cmp_operator(op: CmpOperator) -> &'static str {
    match op {
        CmpOperator::Eq => "Eq()",
        CmpOperator::NotEq => "NotEq()",
        CmpOperator::Is => "Is()",
    }
}
