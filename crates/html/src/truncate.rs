//! Truncation of HTML fragments to a visible-character budget.

use std::ops::ControlFlow;

use tracing::instrument;

use crate::cursor::Cursor;
use crate::error::{ErrorKind, Result};
use crate::ledger::{Scope, TagLedger};
use crate::lexer::{self, Markup};
use crate::options::{EntityPolicy, Options};
use crate::word::WordBuffer;

/// Truncates `source` to at most `length` visible characters using the
/// default [`Options`].
///
/// See [`truncate_with`] for the counting rules.
///
/// # Examples
///
/// ```rust
/// use snippet_html::truncate;
/// assert_eq!(truncate("<div>Hello World</div>", 8).unwrap(), "<div>Hello Wo</div>");
/// assert_eq!(truncate("&lt;&lt;&lt;", 2).unwrap(), "&lt;&lt;");
/// ```
pub fn truncate(source: &str, length: usize) -> Result<String> {
    truncate_with(source, length, &Options::default())
}

/// Truncates `source` to at most `length` visible characters.
///
/// Visible characters are counted per Unicode scalar value; an entity
/// reference such as `&amp;` counts once, and tags and comments don't count
/// at all. Every tag opened in the output is closed, and opening tags whose
/// content didn't make the cut are left out entirely.
///
/// # Errors
///
/// - [`UnmatchedClosingTag`](ErrorKind::UnmatchedClosingTag) if a closing tag
///   doesn't match any tag open at that point.
/// - [`UnterminatedEntity`](ErrorKind::UnterminatedEntity) for an `&` without
///   a `;`, but only with [`EntityPolicy::Strict`].
///
/// # Examples
///
/// ```rust
/// use snippet_html::{Options, truncate_with};
/// let options = Options::new().with_break_words(false).with_suffix("...");
/// let html = "<div><span>Hello</span> <span>World</span></div>";
/// assert_eq!(truncate_with(html, 7, &options).unwrap(), "<div><span>Hello</span> </div>...");
/// ```
#[instrument(level = "trace", skip(source, options), fields(source_size = source.len()))]
pub fn truncate_with(source: &str, length: usize, options: &Options) -> Result<String> {
    Truncator::new(source, length, options).run()
}

/// State of a single truncation call.
struct Truncator<'a> {
    cursor: Cursor,
    options: &'a Options,
    length: usize,
    visible: usize,
    output: String,
    ledger: TagLedger,
    word: WordBuffer,
}

impl<'a> Truncator<'a> {
    fn new(source: &str, length: usize, options: &'a Options) -> Self {
        Self {
            cursor: Cursor::new(source),
            options,
            length,
            visible: 0,
            output: String::with_capacity(source.len().min(length.saturating_mul(2))),
            ledger: TagLedger::new(),
            word: WordBuffer::new(),
        }
    }

    fn run(mut self) -> Result<String> {
        while self.visible < self.length {
            let start = self.cursor.position();
            let Some(c) = self.cursor.next() else {
                break;
            };
            let flow = match c {
                '<' => self.markup(start)?,
                '&' => self.entity(start)?,
                c => self.text(c),
            };
            if flow.is_break() {
                tracing::debug!(offset = start, visible = self.visible, "visible length budget exhausted");
                break;
            }
        }
        if self.word.is_empty() && !lexer::has_visible_content(&self.cursor) {
            self.trailing_markup()?;
        }
        Ok(self.finish())
    }

    /// Read the markup left once the budget is spent, provided no visible
    /// text follows. Input that fits keeps its trailing closing tags, void
    /// tags and comments.
    fn trailing_markup(&mut self) -> Result<()> {
        while !self.cursor.is_exhausted() {
            let start = self.cursor.position();
            self.cursor.next();
            if self.markup(start)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    /// Handle everything a `<` can introduce. `start` is the offset of the `<`.
    fn markup(&mut self, start: usize) -> Result<ControlFlow<()>> {
        // A word cut short means this markup already lies past the cut.
        if self.flush_word().is_break() || !self.word.is_empty() {
            return Ok(ControlFlow::Break(()));
        }
        match Markup::detect(&self.cursor) {
            Markup::Comment => self.ledger.comment(lexer::comment(&mut self.cursor)),
            Markup::Closing => {
                let tag = lexer::closing_tag(&mut self.cursor);
                if !self.ledger.close(&tag.name, &mut self.output) {
                    exn::bail!(ErrorKind::UnmatchedClosingTag { tag: tag.name, offset: start });
                }
                self.output.push_str(&tag.to_string());
            },
            Markup::Opening => self.ledger.open(lexer::opening_tag(&mut self.cursor)),
            Markup::Text => return Ok(self.text('<')),
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Handle an `&`. `start` is the offset of the `&`.
    fn entity(&mut self, start: usize) -> Result<ControlFlow<()>> {
        let Some(reference) = lexer::entity(&mut self.cursor) else {
            return match self.options.entities {
                EntityPolicy::Lenient => Ok(self.text('&')),
                EntityPolicy::Strict => exn::bail!(ErrorKind::UnterminatedEntity { offset: start }),
            };
        };
        if self.flush_word().is_break() || self.visible >= self.length {
            // Leave the reference unread so the cut is visible to `finish`.
            self.cursor.seek(start);
            return Ok(ControlFlow::Break(()));
        }
        self.ledger.commit(&mut self.output, Scope::All);
        self.output.push_str(&reference);
        self.visible += 1;
        Ok(ControlFlow::Continue(()))
    }

    /// Handle a plain character.
    fn text(&mut self, c: char) -> ControlFlow<()> {
        if self.word.is_boundary(c) {
            self.flush_word()?;
        }
        self.word.push(c);
        ControlFlow::Continue(())
    }

    /// Write as much of the buffered word as the budget (and the word
    /// breaking option) allows. Breaks when nothing could be written.
    fn flush_word(&mut self) -> ControlFlow<()> {
        if self.word.is_empty() {
            return ControlFlow::Continue(());
        }
        let remaining = self.length.saturating_sub(self.visible);
        let count = self.word.fit(remaining, self.options.break_words);
        if count == 0 {
            return ControlFlow::Break(());
        }
        self.ledger.commit(&mut self.output, Scope::All);
        self.word.drain_into(count, &mut self.output);
        self.visible += count;
        ControlFlow::Continue(())
    }

    fn finish(mut self) -> String {
        // Void tags have no content to trigger a commit, keep them anyway.
        self.ledger.commit(&mut self.output, Scope::Standalone);
        let flushed = self.flush_word().is_continue() && self.word.is_empty();
        let truncated = !flushed || lexer::has_visible_content(&self.cursor);
        self.ledger.finish(&mut self.output);
        if truncated && let Some(suffix) = self.options.suffix.resolve() {
            self.output.push_str(&suffix);
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Suffix;
    use rstest::rstest;

    /// Count visible characters the same way the truncator does.
    fn visible_length(html: &str) -> usize {
        let mut cursor = Cursor::new(html);
        let mut count = 0;
        while let Some(c) = cursor.next() {
            match c {
                '<' => match Markup::detect(&cursor) {
                    Markup::Comment => {
                        lexer::comment(&mut cursor);
                    },
                    Markup::Closing | Markup::Opening => {
                        cursor.take_until(|c| c == '>');
                        cursor.eat('>');
                    },
                    Markup::Text => count += 1,
                },
                '&' => {
                    lexer::entity(&mut cursor);
                    count += 1;
                },
                _ => count += 1,
            }
        }
        count
    }

    /// Re-parse the output tags with a stack; returns `true` if every
    /// non-void tag is closed in order.
    fn is_well_formed(html: &str) -> bool {
        let mut cursor = Cursor::new(html);
        let mut stack = Vec::new();
        while let Some(c) = cursor.next() {
            if c != '<' {
                continue;
            }
            match Markup::detect(&cursor) {
                Markup::Comment => {
                    lexer::comment(&mut cursor);
                },
                Markup::Closing => {
                    let name = lexer::closing_tag(&mut cursor).name;
                    if crate::TagKind::classify(&name).requires_close() && stack.pop() != Some(name) {
                        return false;
                    }
                },
                Markup::Opening => {
                    let record = lexer::opening_tag(&mut cursor);
                    if record.needs_close() {
                        stack.push(record.name);
                    }
                },
                Markup::Text => {},
            }
        }
        stack.is_empty()
    }

    /// Every entity reference in `source`, in full.
    fn references(source: &str) -> Vec<String> {
        let mut cursor = Cursor::new(source);
        let mut found = Vec::new();
        while let Some(c) = cursor.next() {
            if c == '&' {
                found.extend(lexer::entity(&mut cursor));
            }
        }
        found
    }

    /// Returns `true` if every `&` in `output` begins one of the references
    /// of `source` up to and including its `;`. Only meaningful for sources
    /// without a bare `&`.
    fn entities_are_whole(output: &str, source: &str) -> bool {
        let references = references(source);
        output
            .match_indices('&')
            .all(|(at, _)| references.iter().any(|reference| output[at..].starts_with(reference.as_str())))
    }

    fn break_words_off() -> Options {
        Options::new().with_break_words(false)
    }

    #[rstest]
    // Plain text
    #[case("Some text", 9, "Some text")]
    #[case("lorem ipsum lorem ipsum lorem ipsum", 13, "lorem ipsum l")]
    #[case("", 5, "")]
    #[case("Hello", 0, "")]
    // Simple markup
    #[case("<div>Hello World</div>", 11, "<div>Hello World</div>")]
    #[case("<div>Hello World</div>", 8, "<div>Hello Wo</div>")]
    #[case("<span><div>Hello</div> <p>World</p></span>", 6, "<span><div>Hello</div> </span>")]
    #[case("<p style=\"font-size: 20\">Hello World</p>", 11, "<p style=\"font-size: 20\">Hello World</p>")]
    #[case("<div><b>Hello</b> <i>World</i></div>", 5, "<div><b>Hello</b></div>")]
    // Entities
    #[case("&lt;&lt;&lt;&lt;&lt;&lt;&lt;", 5, "&lt;&lt;&lt;&lt;&lt;")]
    #[case("<b>Tom&amp;Jerry</b>", 4, "<b>Tom&amp;</b>")]
    #[case("15 &lt 30", 10, "15 &lt 30")]
    #[case("AT&T rocks", 3, "AT&")]
    // Optional and void tags
    #[case("<ul><li>Hello<li>Who<li>is<li>John<li>Doe</ul>", 10, "<ul><li>Hello<li>Who<li>is</ul>")]
    #[case("Hello<br>", 5, "Hello<br>")]
    #[case("Hello<br/><b>World</b>", 5, "Hello<br/>")]
    #[case("<p>Hi<img src=\"a.png\" /> there</p>", 4, "<p>Hi<img src=\"a.png\" /> t</p>")]
    // Comments are kept and never counted
    #[case("<!-- note -->Hello World", 5, "<!-- note -->Hello")]
    #[case("<b><!-- note -->Hello</b>", 3, "<b><!-- note -->Hel</b>")]
    #[case("Hello<!-- never closed", 10, "Hello<!-- never closed")]
    // A `<` that doesn't start a tag is text
    #[case("a < b", 3, "a <")]
    #[case("<!DOCTYPE html>", 4, "<!DO")]
    // Unicode scalar values, not bytes
    #[case("<i>héllo wörld</i>", 7, "<i>héllo w</i>")]
    #[case("😀😀😀", 2, "😀😀")]
    fn test_truncate(#[case] source: &str, #[case] length: usize, #[case] expected: &str) {
        assert_eq!(truncate(source, length).unwrap(), expected);
    }

    #[rstest]
    #[case("<div><span>Hello</span><span> World</span></div>", 7, "<div><span>Hello</span></div>")]
    #[case("<div><span>Hello</span> <span>World</span></div>", 7, "<div><span>Hello</span> </div>")]
    #[case("Hello wonderful world", 14, "Hello")]
    #[case("Hello wonderful world", 15, "Hello wonderful")]
    #[case("Supercalifragilistic", 5, "")]
    fn test_keep_words(#[case] source: &str, #[case] length: usize, #[case] expected: &str) {
        assert_eq!(truncate_with(source, length, &break_words_off()).unwrap(), expected);
    }

    #[rstest]
    #[case("<p>Hello, my friend</p>", 16, Options::new().with_suffix("..."), "<p>Hello, my friend</p>")]
    #[case("<p>Hello, my friend</p>", 15, Options::new().with_suffix("..."), "<p>Hello, my frien</p>...")]
    #[case(
        "<div><span>Hello</span> <span>World</span></div>",
        7,
        Options::new().with_suffix("..."),
        "<div><span>Hello</span> <span>W</span></div>..."
    )]
    #[case(
        "<div><span>Hello</span> <span>World</span></div>",
        7,
        break_words_off().with_suffix("..."),
        "<div><span>Hello</span> </div>..."
    )]
    #[case("", 5, Options::new().with_suffix("..."), "")]
    #[case(
        "<p>Hello, my friend</p>",
        15,
        Options::new().with_suffix(Suffix::generator(|| "...".to_string())),
        "<p>Hello, my frien</p>..."
    )]
    // The budget runs out exactly on a closing tag or an entity.
    #[case("<div><b>Hello</b> world</div>", 5, Options::new().with_suffix("…"), "<div><b>Hello</b></div>…")]
    #[case("&lt;&lt;&lt;", 2, Options::new().with_suffix("…"), "&lt;&lt;…")]
    #[case("<div><b>Hello</b></div><!-- end -->", 5, Options::new().with_suffix("…"), "<div><b>Hello</b></div><!-- end -->")]
    #[case("<b>Hello</b><br> world", 5, Options::new().with_suffix("…"), "<b>Hello</b>…")]
    fn test_suffix(#[case] source: &str, #[case] length: usize, #[case] options: Options, #[case] expected: &str) {
        assert_eq!(truncate_with(source, length, &options).unwrap(), expected);
    }

    #[test]
    fn unmatched_closing_tag() {
        let err = truncate("<span><div>Hello World</span> Some</div> other text", 27).unwrap_err();
        assert_eq!(*err, ErrorKind::UnmatchedClosingTag { tag: "div".to_string(), offset: 34 });
        assert_eq!((*err).to_string(), "unexpected closing tag 'div' on offset 34");
    }

    #[test]
    fn unmatched_closing_tag_offset_counts_code_points() {
        let err = truncate("😀😀</b>", 10).unwrap_err();
        assert_eq!(*err, ErrorKind::UnmatchedClosingTag { tag: "b".to_string(), offset: 2 });
    }

    #[test]
    fn closing_tag_after_cut_is_not_read() {
        // The mismatch lies past the budget, so it's never reached.
        assert_eq!(truncate("<b>Hello</b> world</i>", 3).unwrap(), "<b>Hel</b>");
    }

    #[rstest]
    #[case("15 &lt 30", 3)]
    #[case("Fish & Chips", 5)]
    #[case("trailing &amp", 9)]
    fn strict_entities(#[case] source: &str, #[case] offset: usize) {
        let options = Options::new().with_entities(EntityPolicy::Strict);
        let err = truncate_with(source, 100, &options).unwrap_err();
        assert_eq!(*err, ErrorKind::UnterminatedEntity { offset });
    }

    #[test]
    fn strict_entities_accept_terminated_references() {
        let options = Options::new().with_entities(EntityPolicy::Strict);
        assert_eq!(truncate_with("Fish &amp; Chips", 6, &options).unwrap(), "Fish &amp;");
    }

    #[test]
    fn fitting_input_is_unchanged() {
        let sources = [
            "Some text",
            "<div class=\"card\"><h2>Title</h2><p>Body &amp; more<br>text</p></div>",
            "<ul><li>One<li>Two</ul>",
            "<p><!-- c -->Hi <img src=\"x\" /> there</p>",
            "<table><tr><td>1<td>2</table>",
            "<b>Hello</b><br>",
            "<p>Hello</p><img src=\"x\">",
            "<b>Hello</b><!-- end -->",
            "<p>Hi</p><p></p>",
            "<p>Tom &amp; Jerry</p><hr/>",
            "Hi<img src='x",
            "<b>Hi</b",
        ];
        for source in sources {
            assert_eq!(truncate(source, visible_length(source)).unwrap(), source);
            assert_eq!(truncate(source, 1000).unwrap(), source);
        }
    }

    #[rstest]
    #[case("Hi<img src='x", 100, "Hi<img src='x")]
    #[case("<b>Hi</b", 100, "<b>Hi</b")]
    #[case("<b>Hi</b", 1, "<b>H</b>")]
    #[case("<p>Hello</p><p>World", 5, "<p>Hello</p>")]
    fn unterminated_tags_pass_through(#[case] source: &str, #[case] length: usize, #[case] expected: &str) {
        assert_eq!(truncate(source, length).unwrap(), expected);
    }

    #[test]
    fn output_respects_budget_and_nesting() {
        let source = "<article><h1>Big &amp; Bold &#8212; &lt;New&gt;</h1><p>Some <em>emphasised <strong>and strong</strong></em> words, \
                      <a href=\"#\">a link</a><br>and a line break.</p><ul><li>one<li>two</ul></article>";
        for break_words in [true, false] {
            let options = Options::new().with_break_words(break_words);
            for length in 0..=visible_length(source) + 1 {
                let output = truncate_with(source, length, &options).unwrap();
                assert!(visible_length(&output) <= length, "{length}: {output}");
                assert!(is_well_formed(&output), "{length}: {output}");
                assert!(!output.contains("<br></br>"), "{length}: {output}");
                assert!(entities_are_whole(&output, source), "{length}: {output}");
            }
        }
    }
}
