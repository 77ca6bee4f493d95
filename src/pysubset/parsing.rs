//! Parser
//!
//!     chumsky combinators over the block-filtered token stream. The grammar is written once;
//!     [module_parser](statements::module_parser) takes the [Level] and only adds the
//!     productions that level has, so each level's parser is fixed when it is built and no rule
//!     is switched on or off while parsing. Every production builds its AST node as it reduces.
//!
//!     The token stream is pulled lazily. Lexing and indentation errors cannot travel through
//!     chumsky's token stream, so they are parked next to it: the stream simply ends at the first
//!     such error and the parked error is reported instead of whatever the parser made of the
//!     truncated input.
//!
//!     There is no error recovery. The first error aborts the parse and no partial tree is
//!     returned.
//!
//! Grammar
//!
//!     See [statements] for the statement level productions and [expressions] for the
//!     precedence ladder.

pub mod common;
pub mod expressions;
pub mod statements;

use chumsky::prelude::*;
use chumsky::Stream;

use crate::pysubset::ast::{Module, SourceLocation};
use crate::pysubset::error::{ParseError, SyntaxError};
use crate::pysubset::level::Level;
use crate::pysubset::lexing;
use common::GrammarParser;

/// Parse `source` with the grammar of `level`.
pub fn parse_module(source: &str, level: Level) -> Result<Module, ParseError> {
    ModuleParser::new(level).parse(source)
}

/// A parser built for one level, reusable across sources.
pub struct ModuleParser {
    level: Level,
    grammar: GrammarParser<Module>,
}

impl ModuleParser {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            grammar: statements::module_parser(level),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn parse(&self, source: &str) -> Result<Module, ParseError> {
        let end = source.len();
        let mut fault: Option<ParseError> = None;

        let result = {
            let tokens = lexing::lex(source).scan(&mut fault, |fault, item| match item {
                Ok(token) => Some(token),
                Err(error) => {
                    **fault = Some(error);
                    None
                }
            });
            self.grammar.parse(Stream::from_iter(end..end, tokens))
        };

        if let Some(error) = fault {
            return Err(error);
        }

        result.map_err(|errors| {
            let location = SourceLocation::new(source);
            let syntax = match errors.into_iter().next() {
                Some(error) => SyntaxError::from_simple(error, &location),
                None => SyntaxError {
                    expected: Vec::new(),
                    context: None,
                    found: None,
                    message: None,
                    location: location.byte_to_position(end),
                },
            };
            syntax.into()
        })
    }
}
