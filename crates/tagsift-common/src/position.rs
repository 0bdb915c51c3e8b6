//! Source positions for diagnostics.

use std::fmt;

/// A location in scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextPosition {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column in characters, starting at 1.
    pub column: usize,
}

impl TextPosition {
    /// The position of the first character.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Step over `c`.
    pub const fn advance(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Move to byte `offset` of `text`.
    ///
    /// Walks forward from the current position, so a caller asking for
    /// increasing offsets pays for each character once. Moving backwards
    /// restarts from the beginning. Offsets past the end clamp to the end.
    pub fn advance_to(&mut self, text: &str, offset: usize) {
        if offset < self.offset {
            *self = Self::start();
        }
        let end = offset.min(text.len());
        if let Some(skipped) = text.get(self.offset..end) {
            for c in skipped.chars() {
                self.advance(c);
            }
        }
    }

    /// The position of byte `offset` in `text`.
    #[must_use]
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut position = Self::start();
        position.advance_to(text, offset);
        position
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_counts_lines_and_columns() {
        let text = "ab\ncd\nef";
        let position = TextPosition::locate(text, 7);
        assert_eq!(position.line, 3);
        assert_eq!(position.column, 2);
        assert_eq!(position.offset, 7);
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        let text = "é<";
        let position = TextPosition::locate(text, 2);
        assert_eq!(position.column, 2);
    }

    #[test]
    fn test_advance_to_can_move_backwards() {
        let text = "one\ntwo";
        let mut position = TextPosition::start();
        position.advance_to(text, 6);
        position.advance_to(text, 1);
        assert_eq!(position, TextPosition::locate(text, 1));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let position = TextPosition::locate("abc", 99);
        assert_eq!(position.offset, 3);
        assert_eq!(position.to_string(), "line 1, column 4");
    }
}
