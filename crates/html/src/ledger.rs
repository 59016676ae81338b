//! Bookkeeping for opened and owed-closing tags.

use std::collections::VecDeque;

use crate::lexer::Comment;
use crate::tags::{TagKind, TagRecord};

/// Markup waiting for content to be confirmed before it is written.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Pending {
    Tag(TagRecord),
    Comment(Comment),
}

impl Pending {
    fn is_standalone(&self) -> bool {
        match self {
            Pending::Tag(record) => record.is_standalone(),
            Pending::Comment(_) => true,
        }
    }
}

/// Which pending markup a [`TagLedger::commit`] may write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Everything that is pending.
    All,
    /// Leading void tags, self-closed tags and comments; stops at the first
    /// tag that would need content.
    Standalone,
}

/// Tracks opening tags that have been read but not written (`pending`), and
/// the names of written tags that still owe a closing tag (`open`).
///
/// Deferring the write lets a tag disappear entirely when none of its
/// content makes the cut, instead of leaving `<em></em>` behind.
#[derive(Debug, Default)]
pub(crate) struct TagLedger {
    pending: VecDeque<Pending>,
    open: Vec<String>,
}

impl TagLedger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn open(&mut self, record: TagRecord) {
        self.pending.push_back(Pending::Tag(record));
    }

    pub(crate) fn comment(&mut self, comment: Comment) {
        self.pending.push_back(Pending::Comment(comment));
    }

    /// Write pending markup to `output` in the order it was read.
    pub(crate) fn commit(&mut self, output: &mut String, scope: Scope) {
        while let Some(pending) = self.pending.front() {
            if scope == Scope::Standalone && !pending.is_standalone() {
                break;
            }
            match self.pending.pop_front() {
                Some(Pending::Tag(record)) => {
                    output.push_str(&record.to_string());
                    if record.needs_close() {
                        self.open.push(record.name);
                    }
                },
                Some(Pending::Comment(comment)) => output.push_str(&comment.render()),
                None => break,
            }
        }
    }

    /// Account for an explicit closing tag.
    ///
    /// Everything pending is committed first: a tag can't be deferred past
    /// its own closing tag. Open tags are then popped until one named `name`
    /// is found; tags popped on the way are left unclosed. Returns `false`
    /// if no open tag matched.
    pub(crate) fn close(&mut self, name: &str, output: &mut String) -> bool {
        self.commit(output, Scope::All);
        if !TagKind::classify(name).requires_close() {
            return true;
        }
        while let Some(open) = self.open.pop() {
            if open == name {
                return true;
            }
        }
        false
    }

    /// Close every tag still open, innermost first.
    pub(crate) fn finish(self, output: &mut String) {
        for name in self.open.iter().rev() {
            output.push_str("</");
            output.push_str(name);
            output.push('>');
        }
    }
}
