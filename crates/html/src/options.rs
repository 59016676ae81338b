//! Truncation options.

use std::borrow::Cow;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Text appended after the closing tags when truncation removed content.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(from = "Option<String>"))]
pub enum Suffix {
    /// Nothing is appended.
    #[default]
    None,
    /// A fixed string, such as `"..."`.
    Literal(String),
    /// Produces the suffix on demand, once per truncation that needs it.
    Generator(Arc<dyn Fn() -> String + Send + Sync>),
}

impl Suffix {
    /// Wrap a closure as a [`Suffix::Generator`].
    pub fn generator(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Generator(Arc::new(f))
    }

    /// Resolve the suffix text, calling the generator if there is one.
    ///
    /// ```
    /// use snippet_html::Suffix;
    /// assert_eq!(Suffix::None.resolve(), None);
    /// assert_eq!(Suffix::from("...").resolve().as_deref(), Some("..."));
    /// assert_eq!(Suffix::generator(|| "…".repeat(2)).resolve().as_deref(), Some("……"));
    /// ```
    pub fn resolve(&self) -> Option<Cow<'_, str>> {
        match self {
            Suffix::None => None,
            Suffix::Literal(text) => Some(Cow::Borrowed(text.as_str())),
            Suffix::Generator(generate) => Some(Cow::Owned(generate())),
        }
    }
}

impl Debug for Suffix {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Suffix::None => f.write_str("None"),
            Suffix::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Suffix::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<&str> for Suffix {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}
impl From<String> for Suffix {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}
impl From<Option<String>> for Suffix {
    fn from(value: Option<String>) -> Self {
        value.map(Self::Literal).unwrap_or_default()
    }
}

/// What to do with an `&` that is never followed by a `;`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum EntityPolicy {
    /// Treat the `&` as an ordinary visible character.
    #[default]
    Lenient,
    /// Fail with [`UnterminatedEntity`](crate::error::ErrorKind::UnterminatedEntity).
    Strict,
}

/// Options for [`truncate_with`](crate::truncate_with).
///
/// Defaults to breaking words, no suffix and lenient entities.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Options {
    /// Cut in the middle of a word (`true`), or stop at the last word or tag
    /// boundary that fits (`false`).
    pub break_words: bool,
    /// Appended only when truncation actually removed content.
    pub suffix: Suffix,
    /// Handling of unterminated entity references.
    pub entities: EntityPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Self { break_words: true, suffix: Suffix::None, entities: EntityPolicy::Lenient }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_break_words(mut self, break_words: bool) -> Self {
        self.break_words = break_words;
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<Suffix>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_entities(mut self, entities: EntityPolicy) -> Self {
        self.entities = entities;
        self
    }
}
