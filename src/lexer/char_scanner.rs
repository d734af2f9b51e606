use std::str::Chars;

/// Rune reader with a single slot of pushback
///
/// Both the chunk splitter and the DSL scanner sit on top of one of these.
/// `read` returns `None` at end of input; `unread` hands back the last rune
/// `read` returned (including the end marker). Only one rune can be pushed
/// back between reads.
pub struct CharScanner<'a> {
    chars: Chars<'a>,
    /// Last value returned by `read`
    last: Option<char>,
    /// Whether `last` is waiting to be returned again
    pushed_back: bool,
    /// Byte offset of the next rune to be read
    offset: usize,
    /// Line of the next rune to be read (1-indexed)
    line: usize,
    /// Column of the next rune to be read (1-indexed)
    column: usize,
    /// Position before the last `read`, restored by `unread`
    prev: (usize, usize, usize),
}

impl<'a> CharScanner<'a> {
    /// Creates a scanner positioned at the start of `source`
    pub fn new(source: &'a str) -> Self {
        CharScanner {
            chars: source.chars(),
            last: None,
            pushed_back: false,
            offset: 0,
            line: 1,
            column: 1,
            prev: (0, 1, 1),
        }
    }

    /// Reads the next rune, or `None` once the input is exhausted
    pub fn read(&mut self) -> Option<char> {
        let ch = if self.pushed_back {
            self.pushed_back = false;
            self.last
        } else {
            self.last = self.chars.next();
            self.last
        };

        self.prev = (self.offset, self.line, self.column);
        if let Some(c) = ch {
            self.offset += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    /// Pushes the last read rune back
    pub fn unread(&mut self) {
        debug_assert!(!self.pushed_back, "unread called twice without a read");
        self.pushed_back = true;
        (self.offset, self.line, self.column) = self.prev;
    }

    /// Returns the next rune without consuming it
    pub fn peek(&mut self) -> Option<char> {
        let ch = self.read();
        self.unread();
        ch
    }

    /// Byte offset of the next rune
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line and column of the next rune
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_unread_peek() {
        let mut s = CharScanner::new("ab");
        assert_eq!(s.read(), Some('a'));
        s.unread();
        assert_eq!(s.read(), Some('a'));
        assert_eq!(s.peek(), Some('b'));
        assert_eq!(s.read(), Some('b'));
        assert_eq!(s.read(), None);
        s.unread();
        assert_eq!(s.read(), None);
    }

    #[test]
    fn test_position_restored_on_unread() {
        let mut s = CharScanner::new("x\ny");
        s.read();
        s.read();
        assert_eq!(s.position(), (2, 1));
        s.unread();
        assert_eq!(s.position(), (1, 2));
        assert_eq!(s.offset(), 1);
        assert_eq!(s.read(), Some('\n'));
        assert_eq!(s.read(), Some('y'));
        assert_eq!(s.position(), (2, 2));
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut s = CharScanner::new("é1");
        s.read();
        assert_eq!(s.offset(), 2);
        assert_eq!(s.peek(), Some('1'));
        assert_eq!(s.offset(), 2);
    }
}
