//! Tag classification tables and the opening-tag record.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Elements that never have content and never take a closing tag.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr", "image", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose closing tag may be omitted because the next sibling of
/// the same kind implicitly closes them.
///
/// `p` is intentionally absent: a cut paragraph always gets an explicit `</p>`.
pub const OPTIONAL_VOID_TAGS: &[&str] = &["li", "dt", "dd", "option", "optgroup", "rb", "rp", "rt", "rtc", "tr", "td", "th"];

/// How a tag name behaves with respect to closing.
///
/// Matching is exact and case-sensitive: `BR` is not `br`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// No content, no closing tag (e.g. `br`, `img`).
    Void,
    /// Closing tag is optional (e.g. `li`).
    OptionalVoid,
    /// Requires an explicit, correctly nested closing tag.
    Normal,
}

impl TagKind {
    /// Classify a tag name.
    ///
    /// ```
    /// use snippet_html::TagKind;
    /// assert_eq!(TagKind::classify("br"), TagKind::Void);
    /// assert_eq!(TagKind::classify("li"), TagKind::OptionalVoid);
    /// assert_eq!(TagKind::classify("div"), TagKind::Normal);
    /// assert_eq!(TagKind::classify("BR"), TagKind::Normal);
    /// ```
    #[must_use]
    pub fn classify(name: &str) -> Self {
        if VOID_TAGS.contains(&name) {
            TagKind::Void
        } else if OPTIONAL_VOID_TAGS.contains(&name) {
            TagKind::OptionalVoid
        } else {
            TagKind::Normal
        }
    }

    /// Returns `true` if an explicit closing tag must be matched against the
    /// currently open tags.
    #[inline]
    #[must_use]
    pub fn requires_close(&self) -> bool {
        matches!(self, TagKind::Normal)
    }
}

/// An opening tag as it was written, split into its bare name and the
/// verbatim remainder up to (not including) the `>`.
///
/// A tag cut off by the end of input renders without the `>` it never had.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TagRecord {
    pub(crate) name: String,
    /// Attribute text including its leading whitespace, and a trailing `/`
    /// for XHTML-style self-closing tags.
    pub(crate) attributes: String,
    pub(crate) terminated: bool,
}

impl TagRecord {
    pub(crate) fn new(name: impl Into<String>, attributes: impl Into<String>) -> Self {
        let mut name = name.into();
        let mut attributes = attributes.into();
        // `<br/>` lexes as the name `br/`.
        if name.ends_with('/') {
            name.pop();
            attributes.insert(0, '/');
        }
        Self { name, attributes, terminated: true }
    }

    pub(crate) fn kind(&self) -> TagKind {
        TagKind::classify(&self.name)
    }

    pub(crate) fn is_self_closing(&self) -> bool {
        self.attributes.ends_with('/')
    }

    /// Void and self-closed tags stand on their own: committing them never
    /// leaves anything open.
    pub(crate) fn is_standalone(&self) -> bool {
        self.kind() == TagKind::Void || self.is_self_closing()
    }

    pub(crate) fn needs_close(&self) -> bool {
        self.kind() == TagKind::Normal && !self.is_self_closing()
    }
}

impl Display for TagRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "<{}{}", self.name, self.attributes)?;
        if self.terminated {
            f.write_str(">")?;
        }
        Ok(())
    }
}
