//! Lexer
//!
//!     Lexing runs in two lazy stages, each an iterator pulling from the one before it:
//!
//!         1. The scanner. See [scanner](scanner). A logos lexer produces raw tokens with their
//!            byte ranges. A run of line breaks separated only by blank or comment lines is
//!            collapsed into one `LineBreak(width)`, where width is the leading whitespace of
//!            the line that follows the run.
//!
//!         2. The block filter. See [block_filter](transformations::block_filter). It applies
//!            the offside rule: every `LineBreak` is replaced by `Newline`, `Indent` or `Dedent`
//!            tokens according to a stack of open indentation widths.
//!
//!     Nothing is buffered beyond the dedents produced by a single line break, and both stages
//!     stop for good after their first error.
//!
//! Byte Ranges
//!
//!     Every token keeps the byte range of the text it came from. Synthetic tokens borrow the
//!     range of the line break they replace, or an empty range at the end of the input. Ranges
//!     are only turned into line and column positions when an error is reported.

pub mod scanner;
pub mod transformations;

pub use scanner::Scanner;
pub use transformations::block_filter::BlockFilter;

use crate::pysubset::error::ParseError;
use crate::pysubset::token::TokenLocation;

/// Raw scanner tokens, line breaks included.
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

/// The token stream the parser consumes.
pub fn lex(source: &str) -> BlockFilter<'_, Scanner<'_>> {
    BlockFilter::new(Scanner::new(source), source)
}

/// Collects [lex] into a vector, stopping at the first error.
pub fn lex_all(source: &str) -> Result<Vec<TokenLocation>, ParseError> {
    lex(source).collect()
}
