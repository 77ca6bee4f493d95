//! Node kinds
//!
//!     The flat vocabulary used by the level validator. Each kind is tagged with the grammar level
//!     that introduces it, which is the single table both the validator and the documentation
//!     read from.

use serde::Serialize;
use std::fmt;

use super::nodes::{
    BinaryOperator, BoolOperator, CmpOperator, Expr, ExprContext, Module, Parameter, Stmt,
    UnaryOperator,
};
use super::traits::{walk_expr, walk_stmt, Visitor};
use crate::pysubset::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum NodeKind {
    // L0
    Module,
    Assign,
    Name,
    Load,
    Store,
    Constant,
    Expr,
    Call,
    UnaryOp,
    Neg,
    BinOp,
    Add,
    // L1
    List,
    Dict,
    Subscript,
    BoolOp,
    And,
    Or,
    Not,
    Compare,
    Eq,
    NotEq,
    Is,
    // L2
    Return,
    FunctionDef,
    Lambda,
    Parameter,
    IfExp,
    // L3
    If,
    While,
    ClassDef,
}

impl NodeKind {
    pub const ALL: [NodeKind; 31] = [
        NodeKind::Module,
        NodeKind::Assign,
        NodeKind::Name,
        NodeKind::Load,
        NodeKind::Store,
        NodeKind::Constant,
        NodeKind::Expr,
        NodeKind::Call,
        NodeKind::UnaryOp,
        NodeKind::Neg,
        NodeKind::BinOp,
        NodeKind::Add,
        NodeKind::List,
        NodeKind::Dict,
        NodeKind::Subscript,
        NodeKind::BoolOp,
        NodeKind::And,
        NodeKind::Or,
        NodeKind::Not,
        NodeKind::Compare,
        NodeKind::Eq,
        NodeKind::NotEq,
        NodeKind::Is,
        NodeKind::Return,
        NodeKind::FunctionDef,
        NodeKind::Lambda,
        NodeKind::Parameter,
        NodeKind::IfExp,
        NodeKind::If,
        NodeKind::While,
        NodeKind::ClassDef,
    ];

    /// The lowest level whose allowed set contains this kind.
    pub fn introduced_at(self) -> Level {
        match self {
            NodeKind::Module
            | NodeKind::Assign
            | NodeKind::Name
            | NodeKind::Load
            | NodeKind::Store
            | NodeKind::Constant
            | NodeKind::Expr
            | NodeKind::Call
            | NodeKind::UnaryOp
            | NodeKind::Neg
            | NodeKind::BinOp
            | NodeKind::Add => Level::L0,
            NodeKind::List
            | NodeKind::Dict
            | NodeKind::Subscript
            | NodeKind::BoolOp
            | NodeKind::And
            | NodeKind::Or
            | NodeKind::Not
            | NodeKind::Compare
            | NodeKind::Eq
            | NodeKind::NotEq
            | NodeKind::Is => Level::L1,
            NodeKind::Return
            | NodeKind::FunctionDef
            | NodeKind::Lambda
            | NodeKind::Parameter
            | NodeKind::IfExp => Level::L2,
            NodeKind::If | NodeKind::While | NodeKind::ClassDef => Level::L3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Module => "Module",
            NodeKind::Assign => "Assign",
            NodeKind::Name => "Name",
            NodeKind::Load => "Load",
            NodeKind::Store => "Store",
            NodeKind::Constant => "Constant",
            NodeKind::Expr => "Expr",
            NodeKind::Call => "Call",
            NodeKind::UnaryOp => "UnaryOp",
            NodeKind::Neg => "Neg",
            NodeKind::BinOp => "BinOp",
            NodeKind::Add => "Add",
            NodeKind::List => "List",
            NodeKind::Dict => "Dict",
            NodeKind::Subscript => "Subscript",
            NodeKind::BoolOp => "BoolOp",
            NodeKind::And => "And",
            NodeKind::Or => "Or",
            NodeKind::Not => "Not",
            NodeKind::Compare => "Compare",
            NodeKind::Eq => "Eq",
            NodeKind::NotEq => "NotEq",
            NodeKind::Is => "Is",
            NodeKind::Return => "Return",
            NodeKind::FunctionDef => "FunctionDef",
            NodeKind::Lambda => "Lambda",
            NodeKind::Parameter => "Parameter",
            NodeKind::IfExp => "IfExp",
            NodeKind::If => "If",
            NodeKind::While => "While",
            NodeKind::ClassDef => "ClassDef",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<ExprContext> for NodeKind {
    fn from(ctx: ExprContext) -> Self {
        match ctx {
            ExprContext::Load => NodeKind::Load,
            ExprContext::Store => NodeKind::Store,
        }
    }
}

impl From<UnaryOperator> for NodeKind {
    fn from(op: UnaryOperator) -> Self {
        match op {
            UnaryOperator::Neg => NodeKind::Neg,
            UnaryOperator::Not => NodeKind::Not,
        }
    }
}

impl From<BinaryOperator> for NodeKind {
    fn from(op: BinaryOperator) -> Self {
        match op {
            BinaryOperator::Add => NodeKind::Add,
        }
    }
}

impl From<BoolOperator> for NodeKind {
    fn from(op: BoolOperator) -> Self {
        match op {
            BoolOperator::And => NodeKind::And,
            BoolOperator::Or => NodeKind::Or,
        }
    }
}

impl From<CmpOperator> for NodeKind {
    fn from(op: CmpOperator) -> Self {
        match op {
            CmpOperator::Eq => NodeKind::Eq,
            CmpOperator::NotEq => NodeKind::NotEq,
            CmpOperator::Is => NodeKind::Is,
        }
    }
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::Assign { .. } => NodeKind::Assign,
            Stmt::Expr { .. } => NodeKind::Expr,
            Stmt::Return { .. } => NodeKind::Return,
            Stmt::FunctionDef { .. } => NodeKind::FunctionDef,
            Stmt::If { .. } => NodeKind::If,
            Stmt::While { .. } => NodeKind::While,
            Stmt::ClassDef { .. } => NodeKind::ClassDef,
        }
    }
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Name { .. } => NodeKind::Name,
            Expr::Constant { .. } => NodeKind::Constant,
            Expr::Call { .. } => NodeKind::Call,
            Expr::UnaryOp { .. } => NodeKind::UnaryOp,
            Expr::BinOp { .. } => NodeKind::BinOp,
            Expr::BoolOp { .. } => NodeKind::BoolOp,
            Expr::Compare { .. } => NodeKind::Compare,
            Expr::IfExp { .. } => NodeKind::IfExp,
            Expr::List { .. } => NodeKind::List,
            Expr::Dict { .. } => NodeKind::Dict,
            Expr::Subscript { .. } => NodeKind::Subscript,
            Expr::Lambda { .. } => NodeKind::Lambda,
        }
    }

    /// Operator and context kinds attached to this node.
    fn attached_kinds(&self) -> Option<NodeKind> {
        match self {
            Expr::Name { ctx, .. } | Expr::List { ctx, .. } | Expr::Subscript { ctx, .. } => {
                Some((*ctx).into())
            }
            Expr::UnaryOp { op, .. } => Some((*op).into()),
            Expr::BinOp { op, .. } => Some((*op).into()),
            Expr::BoolOp { op, .. } => Some((*op).into()),
            Expr::Compare { op, .. } => Some((*op).into()),
            _ => None,
        }
    }
}

/// Collects kinds in pre-order.
struct KindCollector {
    kinds: Vec<NodeKind>,
}

impl Visitor for KindCollector {
    fn visit_module(&mut self, module: &Module) {
        self.kinds.push(NodeKind::Module);
        super::traits::walk_module(self, module);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.kinds.push(stmt.kind());
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.kinds.push(expr.kind());
        self.kinds.extend(expr.attached_kinds());
        walk_expr(self, expr);
    }

    fn visit_parameter(&mut self, _parameter: &Parameter) {
        self.kinds.push(NodeKind::Parameter);
    }
}

/// Every kind occurring in the tree, pre-order, with repetitions.
pub fn node_kinds(module: &Module) -> Vec<NodeKind> {
    let mut collector = KindCollector { kinds: Vec::new() };
    collector.visit_module(module);
    collector.kinds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_of_assignment() {
        let module = Module::new(vec![Stmt::assign(
            Expr::store("x"),
            Expr::add(Expr::neg(Expr::int(1)), Expr::name("y")),
        )]);

        assert_eq!(
            node_kinds(&module),
            vec![
                NodeKind::Module,
                NodeKind::Assign,
                NodeKind::Name,
                NodeKind::Store,
                NodeKind::BinOp,
                NodeKind::Add,
                NodeKind::UnaryOp,
                NodeKind::Neg,
                NodeKind::Constant,
                NodeKind::Name,
                NodeKind::Load,
            ]
        );
    }

    #[test]
    fn test_every_kind_is_listed_once() {
        let mut sorted = NodeKind::ALL.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), NodeKind::ALL.len());
    }

    #[test]
    fn test_levels_are_tagged_in_order() {
        let levels: Vec<Level> = NodeKind::ALL.iter().map(|k| k.introduced_at()).collect();
        let mut sorted = levels.clone();
        sorted.sort();
        assert_eq!(levels, sorted);
    }
}
