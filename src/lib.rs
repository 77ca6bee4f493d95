//! # pysubset
//!
//! Recognizer for the four nested grammar levels (P0 ⊂ P1 ⊂ P2 ⊂ P3) of an
//! indentation-delimited scripting language, plus the level checker that
//! certifies a program only uses the node kinds its level allows.
//!
//! File Layout
//!
//! src/pysubset
//!   ├── level        The L0-L3 grammar levels and their allowed node kinds
//!   ├── token        Token kinds shared by the scanner, the block filter and the parser
//!   ├── lexing       Scanner and the offside-rule block filter
//!   ├── parsing      The level-configurable grammar
//!   ├── ast          Node types, node kinds and source locations
//!   ├── error        Lexing, indentation, syntax, level and execution errors
//!   ├── validation   Level membership checks over a finished tree
//!   ├── formats      Dump, source, json and yaml renderings of a tree
//!   ├── pipeline     Source -> tokens -> tree orchestration
//!   ├── harness      Cross-validation against a reference interpreter
//!   └── config       Layered configuration
//!
//! For testing helpers see the [testing module](pysubset::testing).

pub mod pysubset;
