//! Level validation
//!
//!     Confirms that a finished tree only contains node kinds allowed at a level. The check is
//!     structural: it looks at kinds alone and never re-derives precedence or scoping. The walk is
//!     pre-order and the first offending kind is reported.

use log::debug;

use crate::pysubset::ast::{node_kinds, Module, NodeKind};
use crate::pysubset::error::LevelViolation;
use crate::pysubset::level::Level;

pub fn validate(level: Level, module: &Module) -> Result<(), LevelViolation> {
    match first_violation(level, module) {
        Some(kind) => {
            debug!("{kind} is outside {level}");
            Err(LevelViolation { level, kind })
        }
        None => Ok(()),
    }
}

pub fn is_valid(level: Level, module: &Module) -> bool {
    first_violation(level, module).is_none()
}

/// The lowest level the tree validates at.
pub fn minimum_level(module: &Module) -> Level {
    node_kinds(module)
        .into_iter()
        .map(NodeKind::introduced_at)
        .max()
        .unwrap_or(Level::L0)
}

fn first_violation(level: Level, module: &Module) -> Option<NodeKind> {
    node_kinds(module)
        .into_iter()
        .find(|kind| !level.allows(*kind))
}
