//! Grammar levels
//!
//!     The four nested grammars, ordered `L0 < L1 < L2 < L3`. A level is fixed configuration: it
//!     is chosen once when a parser is built and selects which productions exist, and it names the
//!     node kinds the validator accepts. Each level is a strict superset of the one below it, both
//!     grammatically and in its allowed kinds.
//!
//!     Levels parse case-insensitively from `L0..L3` and from the historical `P0..P3` spelling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::pysubset::ast::NodeKind;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Level {
    #[serde(alias = "l0", alias = "P0", alias = "p0")]
    L0,
    #[serde(alias = "l1", alias = "P1", alias = "p1")]
    L1,
    #[serde(alias = "l2", alias = "P2", alias = "p2")]
    L2,
    #[default]
    #[serde(alias = "l3", alias = "P3", alias = "p3")]
    L3,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown subset '{0}', expected one of L0, L1, L2, L3")]
pub struct UnknownLevel(pub String);

impl Level {
    pub const ALL: [Level; 4] = [Level::L0, Level::L1, Level::L2, Level::L3];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Every node kind a program at this level may contain.
    pub fn allowed_kinds(self) -> BTreeSet<NodeKind> {
        NodeKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.introduced_at() <= self)
            .collect()
    }

    pub fn allows(self, kind: NodeKind) -> bool {
        kind.introduced_at() <= self
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.index())
    }
}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let prefix = chars.next().map(|c| c.to_ascii_uppercase());
        let level = match (prefix, chars.as_str()) {
            (Some('L') | Some('P'), "0") => Level::L0,
            (Some('L') | Some('P'), "1") => Level::L1,
            (Some('L') | Some('P'), "2") => Level::L2,
            (Some('L') | Some('P'), "3") => Level::L3,
            _ => return Err(UnknownLevel(trimmed.to_string())),
        };
        Ok(level)
    }
}
