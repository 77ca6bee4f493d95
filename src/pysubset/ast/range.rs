//! Source positions
//!
//! Tokens carry byte ranges. Errors report `line:column`, both 1-based, so they can be pasted
//! straight into an editor. [SourceLocation] does the conversion with a binary search over the
//! byte offsets where each line starts.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A 1-based line and column. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Converts byte offsets of one source text into positions.
#[derive(Debug, Clone)]
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Offsets past the end clamp to the end of the source.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);
        let start = self.line_starts[line];
        let column = self
            .source
            .get(start..offset)
            .map(|text| text.chars().count())
            .unwrap_or(offset - start);

        Position::new(line + 1, column + 1)
    }

    pub fn span_start(&self, span: &Range<usize>) -> Position {
        self.byte_to_position(span.start)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert_eq!(Position::new(3, 4).to_string(), "3:4");
    }

    #[test]
    fn test_byte_to_position() {
        let location = SourceLocation::new("x = 1\n  y\nz");

        assert_eq!(location.byte_to_position(0), Position::new(1, 1));
        assert_eq!(location.byte_to_position(4), Position::new(1, 5));
        assert_eq!(location.byte_to_position(6), Position::new(2, 1));
        assert_eq!(location.byte_to_position(8), Position::new(2, 3));
        assert_eq!(location.byte_to_position(10), Position::new(3, 1));
        assert_eq!(location.line_count(), 3);
    }

    #[test]
    fn test_offset_at_end_of_source() {
        let location = SourceLocation::new("ab\n");
        assert_eq!(location.byte_to_position(3), Position::new(2, 1));
        assert_eq!(location.byte_to_position(99), Position::new(2, 1));
    }

    #[test]
    fn test_columns_count_characters() {
        let location = SourceLocation::new("é = ?");
        assert_eq!(location.byte_to_position(5), Position::new(1, 5));
    }
}
