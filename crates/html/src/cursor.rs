//! Code point cursor over the source markup.

/// Walks the input one Unicode scalar value at a time.
///
/// Positions are indices into the decoded `char` sequence, so a character
/// outside the Basic Multilingual Plane still occupies a single position.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    chars: Vec<char>,
    position: usize,
}

impl Cursor {
    pub(crate) fn new(source: &str) -> Self {
        Self { chars: source.chars().collect(), position: 0 }
    }

    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Look `offset` characters ahead without consuming anything.
    #[inline]
    pub(crate) fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    /// Move forward `count` characters, stopping at the end of input.
    pub(crate) fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.chars.len());
    }

    /// Rewind (or fast-forward) to an absolute position.
    pub(crate) fn seek(&mut self, position: usize) {
        self.position = position.min(self.chars.len());
    }

    /// Consume the next character if it equals `expected`.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek(0) == Some(expected) {
            self.position += 1;
            return true;
        }
        false
    }

    /// Returns `true` if the unconsumed input begins with `pattern`.
    pub(crate) fn starts_with(&self, pattern: &str) -> bool {
        pattern.chars().enumerate().all(|(offset, expected)| self.peek(offset) == Some(expected))
    }

    /// Consume characters up to (but not including) the first one matching
    /// `stop`, or to the end of input.
    pub(crate) fn take_until(&mut self, stop: impl Fn(char) -> bool) -> String {
        let start = self.position;
        while let Some(c) = self.peek(0) {
            if stop(c) {
                break;
            }
            self.position += 1;
        }
        self.chars[start..self.position].iter().collect()
    }
}

impl Iterator for Cursor {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.peek(0)?;
        self.position += 1;
        Some(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_code_points_not_bytes() {
        let mut cursor = Cursor::new("a😀b");
        assert_eq!(cursor.next(), Some('a'));
        assert_eq!(cursor.next(), Some('😀'));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.next(), Some('b'));
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn peek_does_not_consume() {
        let cursor = Cursor::new("<!--");
        assert_eq!(cursor.peek(0), Some('<'));
        assert_eq!(cursor.peek(3), Some('-'));
        assert_eq!(cursor.peek(4), None);
        assert_eq!(cursor.position(), 0);
        assert!(cursor.starts_with("<!-"));
        assert!(!cursor.starts_with("<!--x"));
    }

    #[test]
    fn take_until_stops_before_match() {
        let mut cursor = Cursor::new("div class=\"x\">rest");
        assert_eq!(cursor.take_until(|c| c == '>' || c.is_whitespace()), "div");
        assert_eq!(cursor.take_until(|c| c == '>'), " class=\"x\"");
        assert!(cursor.eat('>'));
        assert!(!cursor.eat('>'));
        assert_eq!(cursor.take_until(|_| false), "rest");
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn seek_and_advance_are_clamped() {
        let mut cursor = Cursor::new("abc");
        cursor.advance(10);
        assert!(cursor.is_exhausted());
        cursor.seek(1);
        assert_eq!(cursor.peek(0), Some('b'));
        cursor.seek(99);
        assert_eq!(cursor.position(), 3);
    }
}
