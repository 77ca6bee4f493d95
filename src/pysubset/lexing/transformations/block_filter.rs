//! Block filter
//!
//!     Turns raw `LineBreak(width)` tokens into the structural tokens the grammar is written
//!     against: `Newline`, `Indent` and `Dedent`. This is the offside rule. The parser never sees
//!     an indentation width.
//!
//!     The filter keeps a stack of open indentation widths, strictly increasing from the bottom,
//!     which always holds 0 at the bottom. For each line break of width `w`:
//!
//!         - `w` greater than the top: push `w` and emit one `Indent`. The indent stands in for
//!           the line break, so an indented suite reads `: INDENT statement+ DEDENT`.
//!         - `w` equal to the top: emit `Newline`.
//!         - `w` smaller than the top: emit `Newline`, then pop while the top is greater than
//!           `w`, emitting one `Dedent` per pop. If the new top is not exactly `w` the source
//!           dedented to a width no enclosing block uses and an [IndentationError] is raised.
//!
//!     At the end of input a `Newline` is synthesized if the last line had no line break, and
//!     one `Dedent` per width still open closes every block. Line breaks before the first real
//!     token are dropped, so leading blank lines and comments produce nothing.
//!
//!     Tokens produced by one line break are queued and drained, in order, before anything else
//!     is pulled from the scanner. The stack and the queue belong to one filter instance and
//!     live for one parse.
//!
//! Example
//!
//!     if x:
//!         y = 1
//!     else:
//!         y = 2
//!
//!     becomes `if x : INDENT y = 1 NEWLINE DEDENT else : INDENT y = 2 NEWLINE DEDENT`.

use std::collections::VecDeque;
use std::iter::Peekable;
use std::ops::Range;

use crate::pysubset::ast::SourceLocation;
use crate::pysubset::error::{IndentationError, LexError, ParseError};
use crate::pysubset::token::{Token, TokenLocation};

pub struct BlockFilter<'a, I>
where
    I: Iterator<Item = Result<TokenLocation, LexError>>,
{
    upstream: Peekable<I>,
    source: &'a str,
    indent_stack: Vec<usize>,
    pending: VecDeque<TokenLocation>,
    /// A significant token has been seen.
    started: bool,
    /// The last token handed out was `Newline`, `Indent` or `Dedent`.
    after_structural: bool,
    finished: bool,
}

impl<'a, I> BlockFilter<'a, I>
where
    I: Iterator<Item = Result<TokenLocation, LexError>>,
{
    pub fn new(upstream: I, source: &'a str) -> Self {
        Self {
            upstream: upstream.peekable(),
            source,
            indent_stack: vec![0],
            pending: VecDeque::new(),
            started: false,
            after_structural: true,
            finished: false,
        }
    }

    /// Widths of the currently open blocks, outermost first.
    pub fn indent_stack(&self) -> &[usize] {
        &self.indent_stack
    }

    fn top(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    fn line_break(&mut self, width: usize, span: Range<usize>) -> Result<(), IndentationError> {
        let top = self.top();

        if width > top {
            self.indent_stack.push(width);
            self.pending.push_back((Token::Indent, span));
            return Ok(());
        }

        self.pending.push_back((Token::Newline, span.clone()));
        if width == top {
            return Ok(());
        }

        while self.top() > width {
            self.indent_stack.pop();
            self.pending.push_back((Token::Dedent, span.end..span.end));
        }

        if self.top() != width {
            self.pending.clear();
            return Err(IndentationError {
                width,
                location: SourceLocation::new(self.source).byte_to_position(span.end),
            });
        }
        Ok(())
    }

    fn close(&mut self) {
        let end = self.source.len();
        if self.started && !self.after_structural {
            self.pending.push_back((Token::Newline, end..end));
        }
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.pending.push_back((Token::Dedent, end..end));
        }
        self.finished = true;
    }
}

impl<I> Iterator for BlockFilter<'_, I>
where
    I: Iterator<Item = Result<TokenLocation, LexError>>,
{
    type Item = Result<TokenLocation, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                self.after_structural = token.0.is_structural();
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }

            match self.upstream.next() {
                None => self.close(),
                Some(Err(error)) => {
                    self.finished = true;
                    return Some(Err(error.into()));
                }
                Some(Ok((Token::LineBreak(width), span))) => {
                    if !self.started {
                        continue;
                    }
                    if self.upstream.peek().is_none() {
                        self.pending.push_back((Token::Newline, span));
                        continue;
                    }
                    if let Err(error) = self.line_break(width, span) {
                        self.finished = true;
                        return Some(Err(error.into()));
                    }
                }
                Some(Ok(token)) => {
                    self.started = true;
                    self.after_structural = token.0.is_structural();
                    return Some(Ok(token));
                }
            }
        }
    }
}
