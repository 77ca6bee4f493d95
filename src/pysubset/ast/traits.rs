//! AST traits - traversal
//!
//! Implement [Visitor] to walk a tree. Every method has a default that keeps descending, so an
//! implementation overrides only what it cares about and calls the matching `walk_*` helper to
//! continue into the children.

use super::nodes::{Expr, Module, Parameter, Stmt};

/// Visitor trait for traversing the AST
///
/// # Example
///
/// ```ignore
/// struct CallCounter(usize);
///
/// impl Visitor for CallCounter {
///     fn visit_expr(&mut self, expr: &Expr) {
///         if matches!(expr, Expr::Call { .. }) {
///             self.0 += 1;
///         }
///         walk_expr(self, expr);
///     }
/// }
/// ```
pub trait Visitor {
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_parameter(&mut self, _parameter: &Parameter) {}
}

pub fn walk_module<V: Visitor + ?Sized>(visitor: &mut V, module: &Module) {
    for stmt in &module.body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Assign { target, value } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        Stmt::Expr { value } => visitor.visit_expr(value),
        Stmt::Return { value } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::FunctionDef { params, body, .. } => {
            for parameter in params {
                visitor.visit_parameter(parameter);
            }
            walk_body(visitor, body);
        }
        Stmt::If { test, body, orelse } => {
            visitor.visit_expr(test);
            walk_body(visitor, body);
            walk_body(visitor, orelse);
        }
        Stmt::While { test, body } => {
            visitor.visit_expr(test);
            walk_body(visitor, body);
        }
        Stmt::ClassDef { body, .. } => walk_body(visitor, body),
    }
}

fn walk_body<V: Visitor + ?Sized>(visitor: &mut V, body: &[Stmt]) {
    for stmt in body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Name { .. } | Expr::Constant { .. } => {}
        Expr::Call { func, args } => {
            visitor.visit_expr(func);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::UnaryOp { operand, .. } => visitor.visit_expr(operand),
        Expr::BinOp { left, right, .. } | Expr::Compare { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::BoolOp { values, .. } => {
            for value in values {
                visitor.visit_expr(value);
            }
        }
        Expr::IfExp { test, body, orelse } => {
            visitor.visit_expr(test);
            visitor.visit_expr(body);
            visitor.visit_expr(orelse);
        }
        Expr::List { elts, .. } => {
            for elt in elts {
                visitor.visit_expr(elt);
            }
        }
        Expr::Dict { keys, values } => {
            for (key, value) in keys.iter().zip(values) {
                visitor.visit_expr(key);
                visitor.visit_expr(value);
            }
        }
        Expr::Subscript { value, index, .. } => {
            visitor.visit_expr(value);
            visitor.visit_expr(index);
        }
        Expr::Lambda { params, body } => {
            for parameter in params {
                visitor.visit_parameter(parameter);
            }
            visitor.visit_expr(body);
        }
    }
}
