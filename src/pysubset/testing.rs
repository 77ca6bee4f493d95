//! Testing utilities
//!
//!     Helpers shared by the unit tests and the integration tests under `tests/`.
//!
//! Sample Programs
//!
//!     [Samples] gives access to the curated programs in `samples/`, one per level. Each one is
//!     known to parse at its level, to fail validation below it and to run cleanly under the
//!     reference interpreter (with its `.in` fixture where it reads input). Prefer them over
//!     ad-hoc snippets when a test needs a realistic whole program.
//!
//! Assertions
//!
//!     [parse_at] and [assert_dump] keep parser tests to one line per case: the expected tree is
//!     written in `ast.dump` notation rather than as nested constructors.

use crate::pysubset::ast::Module;
use crate::pysubset::formats::dump::dump;
use crate::pysubset::level::Level;
use crate::pysubset::lexing;
use crate::pysubset::parsing::parse_module;
use crate::pysubset::token::Token;

/// A curated sample program.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub level: Level,
    pub source: &'static str,
}

pub struct Samples;

const SAMPLES: [Sample; 4] = [
    Sample {
        name: "l0-arithmetic.py",
        level: Level::L0,
        source: include_str!("../../samples/l0-arithmetic.py"),
    },
    Sample {
        name: "l1-collections.py",
        level: Level::L1,
        source: include_str!("../../samples/l1-collections.py"),
    },
    Sample {
        name: "l2-functions.py",
        level: Level::L2,
        source: include_str!("../../samples/l2-functions.py"),
    },
    Sample {
        name: "l3-control.py",
        level: Level::L3,
        source: include_str!("../../samples/l3-control.py"),
    },
];

impl Samples {
    pub fn all() -> &'static [Sample] {
        &SAMPLES
    }

    pub fn get(name: &str) -> Option<&'static Sample> {
        SAMPLES.iter().find(|sample| sample.name == name)
    }

    pub fn for_level(level: Level) -> &'static Sample {
        &SAMPLES[level.index()]
    }

    /// Directory holding the sample files, for tests that need real paths.
    pub fn directory() -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("samples")
    }
}

/// Parse or panic with the error message.
pub fn parse_at(level: Level, source: &str) -> Module {
    match parse_module(source, level) {
        Ok(module) => module,
        Err(error) => panic!("{level} parse of {source:?} failed: {error}"),
    }
}

/// Assert that `source` parses at `level` to the tree written as `expected` in dump notation.
pub fn assert_dump(level: Level, source: &str, expected: &str) {
    let actual = dump(&parse_at(level, source));
    assert_eq!(actual, expected, "dump of {source:?} at {level}");
}

/// Block-filtered tokens without their ranges.
pub fn token_kinds(source: &str) -> Vec<Token> {
    match lexing::lex_all(source) {
        Ok(tokens) => tokens.into_iter().map(|(token, _)| token).collect(),
        Err(error) => panic!("lexing {source:?} failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pysubset::validation::{is_valid, minimum_level};

    #[test]
    fn test_samples_parse_at_their_level() {
        for sample in Samples::all() {
            let module = parse_at(sample.level, sample.source);
            assert_eq!(minimum_level(&module), sample.level, "{}", sample.name);
            assert!(is_valid(sample.level, &module));
        }
    }

    #[test]
    fn test_samples_are_rejected_below_their_level() {
        for sample in Samples::all().iter().filter(|s| s.level > Level::L0) {
            let lower = Level::ALL[sample.level.index() - 1];
            assert!(
                parse_module(sample.source, lower).is_err(),
                "{} parsed at {lower}",
                sample.name
            );
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Samples::get("l2-functions.py").unwrap().level, Level::L2);
        assert_eq!(Samples::for_level(Level::L3).name, "l3-control.py");
        assert!(Samples::get("missing.py").is_none());
    }
}
