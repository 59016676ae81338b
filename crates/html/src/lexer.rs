//! Tag, comment and entity lexing.
//!
//! Every function here starts with the cursor positioned just after the
//! introducing character (`<` or `&`). Missing terminators are never errors:
//! the lexers run to the end of input instead.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::cursor::Cursor;
use crate::tags::TagRecord;

const COMMENT_OPEN: &str = "!--";
const COMMENT_CLOSE: &str = "-->";

/// What a `<` introduces, decided by looking ahead only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Markup {
    /// `<!--`
    Comment,
    /// `</`
    Closing,
    /// `<name`
    Opening,
    /// `<!DOCTYPE`, `a < b`, or a trailing `<`: plain visible text.
    Text,
}

impl Markup {
    pub(crate) fn detect(cursor: &Cursor) -> Self {
        match cursor.peek(0) {
            Some('!') if cursor.starts_with(COMMENT_OPEN) => Markup::Comment,
            Some('!') => Markup::Text,
            Some('/') => Markup::Closing,
            Some(c) if c.is_whitespace() => Markup::Text,
            Some(_) => Markup::Opening,
            None => Markup::Text,
        }
    }
}

/// A comment body, without its delimiters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Comment {
    pub(crate) body: String,
    pub(crate) terminated: bool,
}

impl Comment {
    /// Render the comment as it appears in the output. An unterminated
    /// comment stays unterminated.
    pub(crate) fn render(&self) -> String {
        let close = if self.terminated { COMMENT_CLOSE } else { "" };
        format!("<{COMMENT_OPEN}{}{close}", self.body)
    }
}

/// Lex a comment. Expects the cursor on the `!` of `<!--`.
pub(crate) fn comment(cursor: &mut Cursor) -> Comment {
    cursor.advance(COMMENT_OPEN.len());
    let mut body = String::new();
    while !cursor.is_exhausted() {
        if cursor.starts_with(COMMENT_CLOSE) {
            cursor.advance(COMMENT_CLOSE.len());
            return Comment { body, terminated: true };
        }
        body.extend(cursor.next());
    }
    Comment { body, terminated: false }
}

/// Lex an opening tag: the name up to whitespace or `>`, then the verbatim
/// attribute text up to `>`. Consumes the `>` when present.
pub(crate) fn opening_tag(cursor: &mut Cursor) -> TagRecord {
    let name = cursor.take_until(|c| c == '>' || c.is_whitespace());
    let attributes = cursor.take_until(|c| c == '>');
    let mut record = TagRecord::new(name, attributes);
    record.terminated = cursor.eat('>');
    record
}

/// A closing tag, with its name used verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ClosingTag {
    pub(crate) name: String,
    pub(crate) terminated: bool,
}

impl Display for ClosingTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "</{}", self.name)?;
        if self.terminated {
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Lex a closing tag. Expects the cursor on the `/` of `</`.
pub(crate) fn closing_tag(cursor: &mut Cursor) -> ClosingTag {
    cursor.eat('/');
    let name = cursor.take_until(|c| c == '>');
    let terminated = cursor.eat('>');
    ClosingTag { name, terminated }
}

/// Lex an entity reference after its `&`.
///
/// Returns the full reference (`&amp;`) and leaves the cursor after the `;`.
/// Returns `None` without moving the cursor when whitespace, a `<`, or the
/// end of input comes before any `;`.
pub(crate) fn entity(cursor: &mut Cursor) -> Option<String> {
    let mut offset = 0;
    loop {
        match cursor.peek(offset)? {
            ';' => break,
            c if c.is_whitespace() || c == '<' => return None,
            _ => offset += 1,
        }
    }
    let mut reference = String::from('&');
    reference.extend(cursor.by_ref().take(offset + 1));
    Some(reference)
}

/// Returns `true` if anything from the cursor onward would count as visible
/// text: any character outside of tags and comments.
pub(crate) fn has_visible_content(cursor: &Cursor) -> bool {
    let mut rest = cursor.clone();
    while let Some(c) = rest.next() {
        if c != '<' {
            return true;
        }
        match Markup::detect(&rest) {
            Markup::Text => return true,
            Markup::Comment => {
                comment(&mut rest);
            },
            Markup::Closing | Markup::Opening => {
                rest.take_until(|c| c == '>');
                rest.eat('>');
            },
        }
    }
    false
}
