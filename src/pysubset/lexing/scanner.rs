//! Scanner
//!
//!     Wraps the logos lexer derived on [Token]. Two things happen on top of plain logos:
//!
//!     - Consecutive `LineBreak` tokens are merged. logos matches one line break at a time, so
//!       blank lines and comment-only lines show up as several breaks in a row. The merged token
//!       keeps the width of the last one and spans the whole run.
//!     - A character no rule matches becomes a [LexError] with its position, after which the
//!       scanner yields nothing more.

use logos::Logos;

use crate::pysubset::ast::SourceLocation;
use crate::pysubset::error::LexError;
use crate::pysubset::token::{Token, TokenLocation};

pub struct Scanner<'a> {
    lexer: logos::Lexer<'a, Token>,
    source: &'a str,
    lookahead: Option<Result<TokenLocation, LexError>>,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Token::lexer(source),
            source,
            lookahead: None,
            failed: false,
        }
    }

    fn pull(&mut self) -> Option<Result<TokenLocation, LexError>> {
        if let Some(item) = self.lookahead.take() {
            return Some(item);
        }
        let token = self.lexer.next()?;
        let span = self.lexer.span();
        Some(match token {
            Ok(token) => Ok((token, span)),
            Err(()) => Err(self.error_at(span)),
        })
    }

    fn error_at(&self, span: std::ops::Range<usize>) -> LexError {
        let found = self.source[span.start..].chars().next().unwrap_or('\0');
        LexError {
            found,
            location: SourceLocation::new(self.source).byte_to_position(span.start),
            span,
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<TokenLocation, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let (token, mut span) = match self.pull()? {
            Ok(token) => token,
            Err(error) => {
                self.failed = true;
                return Some(Err(error));
            }
        };

        let Token::LineBreak(mut width) = token else {
            return Some(Ok((token, span)));
        };

        loop {
            match self.pull() {
                Some(Ok((Token::LineBreak(next_width), next_span))) => {
                    width = next_width;
                    span.end = next_span.end;
                }
                // An error right after the run surfaces on the next call.
                Some(other) => {
                    self.lookahead = Some(other);
                    break;
                }
                None => break,
            }
        }

        Some(Ok((Token::LineBreak(width), span)))
    }
}
