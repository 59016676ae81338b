//! Word buffer used for word-atomic truncation.

use std::collections::VecDeque;

/// Returns `true` for characters that have distinct upper and lower case
/// forms. Digits, punctuation and uncased scripts are not letters here.
pub(crate) fn is_letter(c: char) -> bool {
    c.to_lowercase().ne(c.to_uppercase())
}

/// Characters of the word currently being read, not yet written to the
/// output nor counted against the budget.
#[derive(Debug)]
pub(crate) struct WordBuffer {
    chars: VecDeque<char>,
    /// Only whitespace so far. Leading whitespace belongs to the next word.
    blank: bool,
}

impl WordBuffer {
    pub(crate) fn new() -> Self {
        Self { chars: VecDeque::new(), blank: true }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Returns `true` if `c` ends the current word, meaning the buffer must
    /// be flushed before `c` is pushed.
    pub(crate) fn is_boundary(&self, c: char) -> bool {
        !is_letter(c) && !self.blank
    }

    pub(crate) fn push(&mut self, c: char) {
        if !c.is_whitespace() {
            self.blank = false;
        }
        self.chars.push_back(c);
    }

    /// How many buffered characters may be written with `remaining` budget
    /// left. Zero means nothing fits.
    pub(crate) fn fit(&self, remaining: usize, break_words: bool) -> usize {
        match break_words {
            true => remaining.min(self.len()),
            false if self.len() <= remaining => self.len(),
            false => 0,
        }
    }

    /// Remove the first `count` characters and append them to `output`.
    pub(crate) fn drain_into(&mut self, count: usize, output: &mut String) {
        let count = count.min(self.len());
        output.extend(self.chars.drain(..count));
        self.blank = self.chars.iter().all(|c| c.is_whitespace());
    }
}
