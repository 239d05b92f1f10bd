use std::ffi::OsString;
use std::path::PathBuf;

/// Answers whether a program is installed.
pub trait ExecutableLocator {
    /// Full path of the executable `name`, if it can be found.
    fn locate(&self, name: &str) -> Option<PathBuf>;

    fn is_installed(&self, name: &str) -> bool {
        self.locate(name).is_some()
    }
}

/// Looks executables up in a search path, `$PATH` by default.
#[derive(Debug, Default)]
pub struct SearchPath {
    paths: Option<OsString>,
}

impl SearchPath {
    /// Search the process `$PATH`.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Search an explicit list in `$PATH` syntax.
    pub fn new(paths: impl Into<OsString>) -> Self {
        Self {
            paths: Some(paths.into()),
        }
    }
}

impl ExecutableLocator for SearchPath {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        let found = match &self.paths {
            Some(paths) => {
                let cwd = std::env::current_dir().ok()?;
                which::which_in(name, Some(paths), cwd)
            }
            None => which::which(name),
        };
        found.ok()
    }
}
