//! Render options and the places they can be loaded from.
//!
//! Options come from three layers, each overriding the last: [`RenderOptions::default`], an
//! optional YAML options file, and the `GHFLOW_SORT_KEYS` / `GHFLOW_NO_REFS` environment
//! variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding [`RenderOptions::sort_keys`].
pub const SORT_KEYS_ENV: &str = "GHFLOW_SORT_KEYS";

/// Environment variable overriding [`RenderOptions::no_refs`].
pub const NO_REFS_ENV: &str = "GHFLOW_NO_REFS";

/// Error surfaced when render options cannot be loaded.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The options file could not be read.
    #[error("failed to read options file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The options body is not valid YAML for [`RenderOptions`].
    #[error("invalid render options: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// An override variable holds something other than a boolean.
    #[error("{name} must be a boolean (true/false/1/0/yes/no), got '{value}'")]
    InvalidEnv { name: &'static str, value: String },
}

/// Serializer settings applied by [`crate::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Emit every mapping's keys in sorted order instead of generation order.
    #[serde(alias = "sort-keys")]
    pub sort_keys: bool,
    /// Never emit anchors or aliases for repeated substructures.
    ///
    /// The YAML emitter never produces aliases, so this always holds; the flag is accepted so
    /// that option sets written for other emitters still load.
    #[serde(alias = "no-refs")]
    pub no_refs: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sort_keys: false,
            no_refs: true,
        }
    }
}

impl RenderOptions {
    pub fn sorted() -> Self {
        Self {
            sort_keys: true,
            ..Self::default()
        }
    }

    /// Parses options from a YAML document. Missing keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, OptionsError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads options from a YAML file.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let text = fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_yaml_str(&text)?;
        debug!(path = %path.display(), ?options, "loaded render options");
        Ok(options)
    }

    /// Applies `GHFLOW_SORT_KEYS` and `GHFLOW_NO_REFS` when they are set.
    pub fn with_env_overrides(mut self) -> Result<Self, OptionsError> {
        if let Some(sort_keys) = read_flag(SORT_KEYS_ENV)? {
            self.sort_keys = sort_keys;
        }
        if let Some(no_refs) = read_flag(NO_REFS_ENV)? {
            self.no_refs = no_refs;
        }
        Ok(self)
    }
}

fn read_flag(name: &'static str) -> Result<Option<bool>, OptionsError> {
    let Ok(raw) = env::var(name) else {
        return Ok(None);
    };
    let parsed = parse_flag(&raw).ok_or_else(|| OptionsError::InvalidEnv {
        name,
        value: raw.clone(),
    })?;
    debug!(variable = name, value = parsed, "render option overridden from environment");
    Ok(Some(parsed))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
