//! Layered configuration for snippet.
//!
//! Later layers override earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. The user configuration file, `config.toml` in the platform
//!    configuration directory (skipped when absent).
//! 3. An explicitly requested file; TOML, YAML or JSON by extension.
//! 4. `SNIPPET_`-prefixed environment variables, e.g. `SNIPPET_LENGTH=120`
//!    or `SNIPPET_BREAK_WORDS=false`.

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use serde::Deserialize;
use snippet_html::{EntityPolicy, Options};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// Prefix of environment variables that override file configuration.
pub const ENV_PREFIX: &str = "SNIPPET_";
const USER_FILE_NAME: &str = "config.toml";

/// Truncation defaults, as read from files and the environment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Visible character budget. Has no default; the command-line usually
    /// provides it.
    pub length: Option<usize>,
    /// Allow cutting in the middle of a word.
    pub break_words: bool,
    /// Appended when content was cut.
    pub suffix: Option<String>,
    /// Handling of `&` without a matching `;`.
    pub entities: EntityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self { length: None, break_words: true, suffix: None, entities: EntityPolicy::default() }
    }
}

impl Config {
    /// Location of the user configuration file, if the platform has a
    /// configuration directory.
    pub fn user_file() -> Option<PathBuf> {
        ProjectDirs::from("", "", "snippet").map(|dirs| dirs.config_dir().join(USER_FILE_NAME))
    }

    /// Load configuration from every layer.
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::from_figment(Self::figment(explicit)?)
    }

    /// Build (but don't extract) the layered [`Figment`], so callers can
    /// merge their own providers on top.
    pub fn figment(explicit: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new();
        if let Some(user_file) = Self::user_file() {
            tracing::trace!(path = %user_file.display(), "merging user configuration file");
            figment = figment.merge(Toml::file(user_file));
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_lowercase();
            figment = match extension.as_str() {
                "toml" => figment.merge(Toml::file(path)),
                "yaml" | "yml" => figment.merge(Yaml::file(path)),
                "json" => figment.merge(Json::file(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(extension.clone())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        figment.extract().or_raise(|| ErrorKind::Invalid)
    }

    /// Truncation options described by this configuration.
    pub fn options(&self) -> Options {
        Options::new()
            .with_break_words(self.break_words)
            .with_suffix(self.suffix.clone())
            .with_entities(self.entities)
    }
}
