use std::path::PathBuf;

use thiserror::Error;

/// Failure to load the configuration file. Fatal for the whole run.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode config {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure to expand one path pattern. Scoped to that pattern only.
///
/// This and [`RemovalError`] are logged, never chained, so the cause is part
/// of the message.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("home directory is unavailable")]
    HomeDirectoryUnavailable,

    #[error("malformed pattern: {0}")]
    MalformedPattern(glob::PatternError),

    #[error("glob pattern matches nothing")]
    NoMatches,
}

/// Failure while removing one resolved path. Scoped to that path only.
#[derive(Error, Debug)]
pub enum RemovalError {
    #[error("cannot stat: {0}")]
    Stat(std::io::Error),

    #[error("cannot remove: {0}")]
    Remove(std::io::Error),
}
