//! Source positions for document provenance.
//!
//! Parsers work in byte offsets (`TextRange`); consumers report line and
//! column. [`SourceSpan`] is the line/column form carried by every model
//! value, and [`File`] owns the text plus the index used to convert between
//! the two.

mod file;

use std::fmt;

pub use file::File;
pub use line_index::LineIndex;
pub use text_size::{TextRange, TextSize};

/// Zero-based line and column. The column counts UTF-8 bytes from the start
/// of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const ZERO: Self = Self { line: 0, column: 0 };

    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Start and end of a token in the original document text.
///
/// `end` is never before `start`. Synthetic values use [`SourceSpan::ZERO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceSpan {
    start: Position,
    end: Position,
}

impl SourceSpan {
    pub const ZERO: Self = Self { start: Position::ZERO, end: Position::ZERO };

    /// Creates a span, swapping the bounds if they arrive reversed.
    pub fn new(start: Position, end: Position) -> Self {
        if end < start { Self { start: end, end: start } } else { Self { start, end } }
    }

    pub fn from_range(index: &LineIndex, range: TextRange) -> Self {
        let start = index.line_col(range.start());
        let end = index.line_col(range.end());
        Self::new(Position::new(start.line, start.col), Position::new(end.line, end.col))
    }

    pub fn start(self) -> Position {
        self.start
    }

    pub fn end(self) -> Position {
        self.end
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Self) -> Self {
        Self { start: self.start.min(other.start), end: self.end.max(other.end) }
    }

    pub fn contains(self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
