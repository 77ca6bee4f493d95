//! Error types
//!
//!     Every failure of a parse is fatal: the pipeline stops at the first error and no partial
//!     tree is returned. The three parse failures (lexing, indentation, syntax) are unified as
//!     [ParseError]. Level violations and execution failures happen after a successful parse and
//!     have their own types. [CheckError] is what a whole-file check reports.

use chumsky::error::{Simple, SimpleReason};
use std::fmt;
use std::io;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

use crate::pysubset::ast::{NodeKind, Position, SourceLocation};
use crate::pysubset::level::Level;
use crate::pysubset::token::Token;

/// A character no token rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character {found:?} at {location}")]
pub struct LexError {
    pub found: char,
    pub span: Range<usize>,
    pub location: Position,
}

/// A dedent to a width that no enclosing block uses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unindent to width {width} does not match any outer indentation level at {location}")]
pub struct IndentationError {
    pub width: usize,
    pub location: Position,
}

/// A token that cannot continue the current derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct SyntaxError {
    /// Descriptions of the tokens that would have been accepted, sorted.
    pub expected: Vec<String>,
    /// The innermost labelled production being parsed, if any.
    pub context: Option<&'static str>,
    /// `None` at end of input.
    pub found: Option<Token>,
    pub message: Option<String>,
    pub location: Position,
}

impl SyntaxError {
    pub fn from_simple(error: Simple<Token>, location: &SourceLocation) -> Self {
        let mut expected: Vec<String> = error
            .expected()
            .map(|token| match token {
                Some(token) => token.describe(),
                None => "end of input".to_string(),
            })
            .collect();
        expected.sort();
        expected.dedup();

        let message = match error.reason() {
            SimpleReason::Custom(message) => Some(message.clone()),
            SimpleReason::Unclosed { delimiter, .. } => Some(format!("unclosed '{delimiter}'")),
            SimpleReason::Unexpected => None,
        };

        Self {
            expected,
            context: error.label(),
            found: error.found().cloned(),
            message,
            location: location.byte_to_position(error.span().start),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at {}: ", self.location)?;
        match &self.message {
            Some(message) => write!(f, "{message}")?,
            None => match &self.found {
                Some(token) => write!(f, "unexpected {}", token.describe())?,
                None => write!(f, "unexpected end of input")?,
            },
        }
        if let Some(context) = self.context {
            write!(f, " while parsing {context}")?;
        }
        if !self.expected.is_empty() {
            write!(f, ", expected {}", self.expected.join(" or "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Indentation(#[from] IndentationError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> Position {
        match self {
            ParseError::Lex(error) => error.location,
            ParseError::Indentation(error) => error.location,
            ParseError::Syntax(error) => error.location,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ParseError::Lex(_) => "LexError",
            ParseError::Indentation(_) => "IndentationError",
            ParseError::Syntax(_) => "SyntaxError",
        }
    }
}

/// A node whose kind is outside the declared level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("node kind {kind} is not allowed at {level} (introduced at {})", .kind.introduced_at())]
pub struct LevelViolation {
    pub level: Level,
    pub kind: NodeKind,
}

#[derive(Debug, Error)]
pub enum ExecutionFailure {
    #[error("program reads {needed} input line(s) but the fixture provides {available}")]
    MissingInput { needed: usize, available: usize },
    #[error("could not run interpreter '{interpreter}': {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: io::Error,
    },
    #[error("could not prepare program: {0}")]
    Io(#[from] io::Error),
    #[error(
        "program exited with status {}: {stderr}",
        .code.map_or_else(|| "signal".to_string(), |c| c.to_string())
    )]
    ExitStatus { code: Option<i32>, stderr: String },
    #[error("program wrote to stderr: {0}")]
    Diagnostics(String),
}

/// Failure of a whole-file check.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Level(#[from] LevelViolation),
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
}

impl CheckError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            CheckError::Read { .. } => "IoError",
            CheckError::Parse(error) => error.kind_name(),
            CheckError::Level(_) => "LevelViolation",
            CheckError::Execution(_) => "ExecutionFailure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::Error as _;

    #[test]
    fn test_syntax_error_message() {
        let error = SyntaxError {
            expected: vec!["'='".to_string(), "NEWLINE".to_string()],
            context: Some("statement"),
            found: Some(Token::Identifier("y".to_string())),
            message: None,
            location: Position::new(2, 3),
        };
        assert_eq!(
            error.to_string(),
            "syntax error at 2:3: unexpected identifier 'y' while parsing statement, expected '=' or NEWLINE"
        );
    }

    #[test]
    fn test_from_simple_resolves_location() {
        let source = "x = 1\n1 = x\n";
        let location = SourceLocation::new(source);
        let simple = Simple::expected_input_found(
            8..9,
            vec![Some(Token::Newline), None],
            Some(Token::Assign),
        );
        let error = SyntaxError::from_simple(simple, &location);

        assert_eq!(error.location, Position::new(2, 3));
        assert_eq!(error.found, Some(Token::Assign));
        assert_eq!(error.expected, vec!["NEWLINE".to_string(), "end of input".to_string()]);
    }

    #[test]
    fn test_parse_error_kind_names() {
        let error: ParseError = IndentationError {
            width: 2,
            location: Position::new(3, 1),
        }
        .into();
        assert_eq!(error.kind_name(), "IndentationError");
        assert_eq!(error.location(), Position::new(3, 1));
    }

    #[test]
    fn test_level_violation_message() {
        let violation = LevelViolation {
            level: Level::L0,
            kind: NodeKind::Compare,
        };
        assert_eq!(
            violation.to_string(),
            "node kind Compare is not allowed at L0 (introduced at L1)"
        );
    }
}
