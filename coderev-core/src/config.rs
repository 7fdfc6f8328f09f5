//! User configuration for coderev.
//!
//! Read from `$XDG_CONFIG_HOME/coderev/config.toml`. Every key is optional;
//! a missing file yields [`Config::default`]. The API key is never read from
//! here, only from the environment (see [`crate::client::API_KEY_ENV`]).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::prompt::DEFAULT_TEMPERATURE;
use crate::types::Language;
use crate::{Error, Result};

/// Default Gemini REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model used for reviews.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Settings loaded from `config.toml`, overridable from the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Theme name, `"dark"` or `"catppuccin-mocha"`.
    pub theme: String,
    pub model: String,
    /// Endpoint root; the client appends `/models/{model}:generateContent`.
    pub base_url: String,
    pub temperature: f64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Language selected at startup.
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: 120,
            language: Language::default(),
        }
    }
}

impl Config {
    /// Loads the config file at `path`.
    ///
    /// A missing file is not an error and returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file exists but cannot be read, and
    /// `Error::Config` if it is not valid TOML for this struct.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&raw).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Parses config TOML text.
    pub fn parse(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

/// Returns `$XDG_<var>` or `$HOME/<fallback>`, or a relative `<fallback>` as a last resort.
fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(fallback))
        })
        .unwrap_or_else(|| PathBuf::from(fallback))
}

/// Path to the coderev config file.
///
/// Prefers `$XDG_CONFIG_HOME/coderev/config.toml`; falls back to
/// `~/.config/coderev/config.toml`.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
        .join("coderev")
        .join("config.toml")
}

/// Directory holding the operator log file.
///
/// Prefers `$XDG_STATE_HOME/coderev`; falls back to `~/.local/state/coderev`.
pub fn state_dir() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state").join("coderev")
}
