//! Node types
//!
//! Field names follow the reference interpreter's tree (`targets` aside: assignment has a single
//! target here), so dumps of both trees line up.

use serde::Serialize;

/// Root of every parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Module {
    pub body: Vec<Stmt>,
}

impl Module {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node")]
pub enum Stmt {
    Assign {
        target: Expr,
        value: Expr,
    },
    /// An expression evaluated for its effect.
    Expr {
        value: Expr,
    },
    Return {
        value: Option<Expr>,
    },
    FunctionDef {
        name: String,
        params: Vec<Parameter>,
        body: Vec<Stmt>,
    },
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
    },
    ClassDef {
        name: String,
        body: Vec<Stmt>,
    },
}

/// A formal parameter of a function definition or lambda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node")]
pub enum Expr {
    Name {
        id: String,
        ctx: ExprContext,
    },
    Constant {
        value: Constant,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    /// Same-operator chains are flattened into `values`.
    BoolOp {
        op: BoolOperator,
        values: Vec<Expr>,
    },
    /// One operator, one right operand. Chains nest on the left.
    Compare {
        left: Box<Expr>,
        op: CmpOperator,
        right: Box<Expr>,
    },
    IfExp {
        test: Box<Expr>,
        body: Box<Expr>,
        orelse: Box<Expr>,
    },
    List {
        elts: Vec<Expr>,
        ctx: ExprContext,
    },
    Dict {
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
    Subscript {
        value: Box<Expr>,
        index: Box<Expr>,
        ctx: ExprContext,
    },
    Lambda {
        params: Vec<Parameter>,
        body: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Constant {
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExprContext {
    Load,
    Store,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Add,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoolOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CmpOperator {
    Eq,
    NotEq,
    Is,
}

// Builders used by the parser and by tests.
impl Expr {
    /// A name in load position.
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name {
            id: id.into(),
            ctx: ExprContext::Load,
        }
    }

    /// A name in store position.
    pub fn store(id: impl Into<String>) -> Self {
        Expr::Name {
            id: id.into(),
            ctx: ExprContext::Store,
        }
    }

    pub fn int(value: i64) -> Self {
        Expr::Constant {
            value: Constant::Int(value),
        }
    }

    pub fn bool(value: bool) -> Self {
        Expr::Constant {
            value: Constant::Bool(value),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
        }
    }

    pub fn unary(op: UnaryOperator, operand: Expr) -> Self {
        Expr::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn neg(operand: Expr) -> Self {
        Self::unary(UnaryOperator::Neg, operand)
    }

    pub fn not(operand: Expr) -> Self {
        Self::unary(UnaryOperator::Not, operand)
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::BinOp {
            left: Box::new(left),
            op: BinaryOperator::Add,
            right: Box::new(right),
        }
    }

    pub fn bool_op(op: BoolOperator, values: Vec<Expr>) -> Self {
        Expr::BoolOp { op, values }
    }

    pub fn compare(left: Expr, op: CmpOperator, right: Expr) -> Self {
        Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn if_exp(test: Expr, body: Expr, orelse: Expr) -> Self {
        Expr::IfExp {
            test: Box::new(test),
            body: Box::new(body),
            orelse: Box::new(orelse),
        }
    }

    pub fn list(elts: Vec<Expr>) -> Self {
        Expr::List {
            elts,
            ctx: ExprContext::Load,
        }
    }

    pub fn dict(entries: Vec<(Expr, Expr)>) -> Self {
        let (keys, values) = entries.into_iter().unzip();
        Expr::Dict { keys, values }
    }

    pub fn subscript(value: Expr, index: Expr) -> Self {
        Expr::Subscript {
            value: Box::new(value),
            index: Box::new(index),
            ctx: ExprContext::Load,
        }
    }

    pub fn lambda(params: Vec<Parameter>, body: Expr) -> Self {
        Expr::Lambda {
            params,
            body: Box::new(body),
        }
    }

    /// Re-tag an assignable expression as a store target.
    ///
    /// Only the outermost node changes context: `a[i] = v` stores into the subscript but still
    /// loads `a` and `i`. A bracketed target stores into each of its elements.
    pub fn into_store(self) -> Self {
        match self {
            Expr::Name { id, .. } => Expr::Name {
                id,
                ctx: ExprContext::Store,
            },
            Expr::Subscript { value, index, .. } => Expr::Subscript {
                value,
                index,
                ctx: ExprContext::Store,
            },
            Expr::List { elts, .. } => Expr::List {
                elts: elts.into_iter().map(Expr::into_store).collect(),
                ctx: ExprContext::Store,
            },
            other => other,
        }
    }
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    pub fn expr(value: Expr) -> Self {
        Stmt::Expr { value }
    }

    /// True for statements that own a suite.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Stmt::FunctionDef { .. } | Stmt::If { .. } | Stmt::While { .. } | Stmt::ClassDef { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_store_only_retags_outer_node() {
        let target = Expr::subscript(Expr::name("a"), Expr::name("i")).into_store();
        assert_eq!(
            target,
            Expr::Subscript {
                value: Box::new(Expr::name("a")),
                index: Box::new(Expr::name("i")),
                ctx: ExprContext::Store,
            }
        );
    }

    #[test]
    fn test_into_store_on_bracketed_target() {
        let target = Expr::list(vec![Expr::name("x")]).into_store();
        assert_eq!(
            target,
            Expr::List {
                elts: vec![Expr::store("x")],
                ctx: ExprContext::Store,
            }
        );
    }

    #[test]
    fn test_dict_builder_splits_entries() {
        let dict = Expr::dict(vec![(Expr::int(1), Expr::int(2))]);
        assert_eq!(
            dict,
            Expr::Dict {
                keys: vec![Expr::int(1)],
                values: vec![Expr::int(2)],
            }
        );
    }
}
