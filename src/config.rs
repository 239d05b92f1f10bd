use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Decoded `config.toml`: program name to its cleanup entry.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub programs: BTreeMap<String, ProgramEntry>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProgramEntry {
    /// Command and arguments. Announced in the log, never executed.
    #[serde(default)]
    pub run: Vec<String>,

    /// Path patterns, optionally starting with `~/` and containing glob wildcards.
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// `<user config dir>/rmcache/config.toml`, or the relative `rmcache/config.toml`
/// when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        tracing::warn!("could not locate user config dir");
        PathBuf::new()
    });
    base.join("rmcache").join("config.toml")
}
