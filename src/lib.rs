//! rmcache - remove the cache files of installed programs.
//!
//! A TOML config names programs and the path patterns of their caches. For
//! each program whose executable is on the search path, every pattern is
//! expanded (`~/` and glob wildcards) and each match is removed if it is a
//! regular file. Symlinks and directories are never removed.

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod output;
pub mod resolver;
pub mod run;
pub mod unlink;
pub mod utils;

pub use cleaner::{safe_remove, safe_remove_within, CleanReport, Cleaner, ProgramCleaner, RemovalOutcome};
pub use config::{Config, ProgramEntry};
pub use error::{ConfigError, RemovalError, ResolveError};
pub use locator::{ExecutableLocator, SearchPath};
pub use resolver::Resolver;
pub use run::{run, RunOptions, RunSummary};
