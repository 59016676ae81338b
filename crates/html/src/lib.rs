//! Truncate HTML fragments to a number of *visible* characters.
//!
//! Tags, comments and entity markup don't count toward the limit, and the
//! output stays well-formed:
//!
//! - every tag opened before the cut is closed, innermost first,
//! - opening tags whose content was cut away entirely are dropped,
//! - entity references (`&amp;`) count as one character and are never split,
//! - void (`<br>`) and self-closed (`<img />`) tags never get a closing tag.
//!
//! Word breaking and an optional suffix (such as `"..."`) are configured
//! through [`Options`].
//!
//! ```rust
//! use snippet_html::{Options, truncate, truncate_with};
//!
//! let html = "<span><div>Hello</div> <p>World</p></span>";
//! assert_eq!(truncate(html, 6).unwrap(), "<span><div>Hello</div> </span>");
//!
//! let options = Options::new().with_suffix("...");
//! assert_eq!(
//!     truncate_with("<p>Hello, my friend</p>", 15, &options).unwrap(),
//!     "<p>Hello, my frien</p>..."
//! );
//! ```
//!
//! This is not a sanitizer or an HTML5 parser: markup is passed through
//! verbatim, and an unterminated tag or comment simply runs to the end of
//! the input.

mod cursor;
pub mod error;
mod ledger;
mod lexer;
mod options;
mod tags;
mod truncate;
mod word;

pub use crate::options::{EntityPolicy, Options, Suffix};
pub use crate::tags::{OPTIONAL_VOID_TAGS, TagKind, VOID_TAGS};
pub use crate::truncate::{truncate, truncate_with};
