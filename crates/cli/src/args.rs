//! Command-line arguments and how they combine with configuration.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use exn::{OptionExt, ResultExt};
use snippet_config::Config;
use snippet_html::{EntityPolicy, Options};

use crate::error::{ErrorKind, Result};

#[derive(Debug, Parser)]
#[command(name = "snippet", version, about = "Truncate HTML to a number of visible characters")]
pub struct Args {
    /// Visible characters to keep; falls back to `length` in the configuration.
    #[arg(short, long)]
    pub length: Option<usize>,
    /// Never cut inside a word, stop at the last word or tag boundary that fits.
    #[arg(short = 'w', long)]
    pub keep_words: bool,
    /// Appended when content was cut, e.g. "...".
    #[arg(short, long)]
    pub suffix: Option<String>,
    /// Fail on an `&` without a matching `;` instead of treating it as text.
    #[arg(long)]
    pub strict_entities: bool,
    /// Configuration file (TOML, YAML or JSON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// HTML file to truncate. Reads standard input when omitted or `-`.
    pub input: Option<PathBuf>,
}

impl Args {
    pub fn length(&self, config: &Config) -> Result<usize> {
        self.length.or(config.length).ok_or_raise(|| ErrorKind::MissingLength)
    }

    /// Configured options with command-line flags applied on top.
    pub fn options(&self, config: &Config) -> Options {
        let mut options = config.options();
        if self.keep_words {
            options = options.with_break_words(false);
        }
        if let Some(suffix) = &self.suffix {
            options = options.with_suffix(suffix.as_str());
        }
        if self.strict_entities {
            options = options.with_entities(EntityPolicy::Strict);
        }
        options
    }

    pub fn read_input(&self) -> Result<String> {
        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path).or_raise(|| ErrorKind::Io),
            _ => {
                let mut html = String::new();
                std::io::stdin().lock().read_to_string(&mut html).or_raise(|| ErrorKind::Io)?;
                Ok(html)
            },
        }
    }
}
