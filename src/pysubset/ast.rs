//! AST definitions
//!
//!     The tree handed to downstream consumers. The node set is closed: statements and
//!     expressions are sum types, so every consumer (the level validator, the formats) matches
//!     exhaustively and a new node kind cannot be forgotten silently.
//!
//!     Every node owns its children. There is no sharing and no parent pointers. Nodes are built
//!     bottom-up by the parser as each production reduces and are not mutated afterwards.
//!
//! Names and Contexts
//!
//!     `Name`, `List` and `Subscript` carry an [ExprContext]: `Store` when they occur as an
//!     assignment target, `Load` everywhere else. The context is decided by the grammar position
//!     the node was parsed in, never inferred later.
//!
//! Node Kinds
//!
//!     [NodeKind] is the flat vocabulary the level validator works with. Operators and contexts
//!     are kinds of their own (an `UnaryOp` node with a `Neg` operator yields both `UnaryOp` and
//!     `Neg`), matching what a walk over the reference interpreter's tree reports.

pub mod kinds;
pub mod nodes;
pub mod range;
pub mod traits;

pub use kinds::{node_kinds, NodeKind};
pub use nodes::{
    BinaryOperator, BoolOperator, CmpOperator, Constant, Expr, ExprContext, Module, Parameter,
    Stmt, UnaryOperator,
};
pub use range::{Position, SourceLocation};
pub use traits::{walk_expr, walk_module, walk_stmt, Visitor};
