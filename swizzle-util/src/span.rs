//! Source-position tracking.
//!
//! `FileInfo` is the range the tokenizer stamps onto every token as it is
//! produced; `advance_by` is the single place that knows how a character
//! moves the cursor, tracking a begin/end pair per token instead of a flat
//! byte offset range.

use crate::symbol::Symbol;
use std::fmt;

/// A 1-based line/column pair. Both fields are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineInfo {
    pub line: u32,
    pub column: u32,
}

impl LineInfo {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position a fresh file or token starts at.
    pub const fn start() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for LineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The source range a token or error spans: a file name plus a begin/end
/// `LineInfo` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileInfo {
    pub file_name: Symbol,
    pub start: LineInfo,
    pub end: LineInfo,
}

impl FileInfo {
    pub fn new(file_name: Symbol) -> Self {
        Self {
            file_name,
            start: LineInfo::start(),
            end: LineInfo::start(),
        }
    }

    /// Advance `end` past `c`. A newline resets the column to 1 and moves to
    /// the next line; every other character, tab included, advances the
    /// column by one.
    pub fn advance_by(&mut self, c: char) {
        if c == '\n' {
            self.end.line += 1;
            self.end.column = 1;
        } else {
            self.end.column += 1;
        }
    }

    /// Start a fresh range at the current end position, for the next token.
    pub fn reset(&self) -> Self {
        Self {
            file_name: self.file_name,
            start: self.end,
            end: self.end,
        }
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_name, self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_by_moves_column() {
        let mut info = FileInfo::new(Symbol::intern("a.swizzle"));
        info.advance_by('x');
        info.advance_by('y');
        assert_eq!(info.end, LineInfo::new(1, 3));
    }

    #[test]
    fn advance_by_newline_resets_column_and_bumps_line() {
        let mut info = FileInfo::new(Symbol::intern("b.swizzle"));
        info.advance_by('a');
        info.advance_by('\n');
        assert_eq!(info.end, LineInfo::new(2, 1));
    }

    #[test]
    fn tab_advances_column_like_any_other_character() {
        let mut info = FileInfo::new(Symbol::intern("c.swizzle"));
        info.advance_by('\t');
        assert_eq!(info.end, LineInfo::new(1, 2));
    }

    #[test]
    fn reset_starts_a_fresh_range_at_the_current_end() {
        let mut info = FileInfo::new(Symbol::intern("d.swizzle"));
        info.advance_by('a');
        info.advance_by('b');
        let next = info.reset();
        assert_eq!(next.start, info.end);
        assert_eq!(next.end, info.end);
    }
}
