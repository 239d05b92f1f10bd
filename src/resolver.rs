//! Expansion of configured path patterns into concrete paths.
//!
//! Supported syntax is that of the `glob` crate: `*`, `?`, `[abc]`, `[!abc]`,
//! `[a-z]` and `**` as a whole path component for recursive matching. Wildcards
//! also match names with a leading dot.

use std::path::{Path, PathBuf};

use crate::error::ResolveError;

const HOME_PREFIX: &str = "~/";

pub struct Resolver {
    home: Option<PathBuf>,
}

impl Resolver {
    /// Resolver expanding `~/` to the current user's home directory.
    pub fn from_env() -> Self {
        Self::with_home(dirs::home_dir())
    }

    pub fn with_home(home: Option<PathBuf>) -> Self {
        Self { home }
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Expand `pattern` into the paths it matches on disk.
    ///
    /// Never touches the filesystem beyond directory listings and metadata
    /// lookups. An empty match set is reported as [`ResolveError::NoMatches`].
    pub fn resolve(&self, pattern: &str) -> Result<Vec<PathBuf>, ResolveError> {
        self.resolve_within(pattern).map(|(_, paths)| paths)
    }

    /// Like [`Resolver::resolve`], also returning the literal base of the
    /// pattern: the leading components written without wildcards, with `~/`
    /// expanded. Every match lies under it.
    pub fn resolve_within(&self, pattern: &str) -> Result<(PathBuf, Vec<PathBuf>), ResolveError> {
        let (base, glob_pattern) = self.expand_home(pattern)?;

        let mut matches = Vec::new();
        for entry in glob::glob(&glob_pattern).map_err(ResolveError::MalformedPattern)? {
            match entry {
                Ok(path) => matches.push(path),
                Err(e) => tracing::debug!(path = %e.path().display(), error = %e.error(), "unreadable entry during glob"),
            }
        }

        if matches.is_empty() {
            return Err(ResolveError::NoMatches);
        }
        Ok((base, matches))
    }

    /// Returns the literal base and the pattern handed to `glob`.
    fn expand_home(&self, pattern: &str) -> Result<(PathBuf, String), ResolveError> {
        let Some(rest) = pattern.strip_prefix(HOME_PREFIX) else {
            return Ok((literal_base(PathBuf::new(), pattern), pattern.to_string()));
        };
        let home = self.home.as_deref().ok_or(ResolveError::HomeDirectoryUnavailable)?;
        let home_str = home.to_str().ok_or(ResolveError::HomeDirectoryUnavailable)?;

        // The home path is literal text; only the user's part of the pattern is a glob.
        let mut expanded = glob::Pattern::escape(home_str);
        if !expanded.ends_with('/') {
            expanded.push('/');
        }
        expanded.push_str(rest);
        Ok((literal_base(home.to_path_buf(), rest), expanded))
    }
}

fn literal_base(mut base: PathBuf, pattern: &str) -> PathBuf {
    for component in Path::new(pattern).components() {
        let is_glob = component
            .as_os_str()
            .to_str()
            .is_some_and(|c| c.contains(['*', '?', '[']));
        if is_glob {
            break;
        }
        base.push(component);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.sort();
        paths
    }

    #[test]
    fn literal_existing_path_resolves_to_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cache.bin");
        fs::write(&file, b"x").unwrap();

        let resolver = Resolver::with_home(None);
        let got = resolver.resolve(file.to_str().unwrap()).unwrap();
        assert_eq!(got, vec![file]);
    }

    #[test]
    fn literal_missing_path_is_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");

        let resolver = Resolver::with_home(None);
        let err = resolver.resolve(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ResolveError::NoMatches));
    }

    #[test]
    fn wildcard_matches_every_candidate() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.tmp", "b.tmp", "keep.log"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let pattern = format!("{}/*.tmp", dir.path().display());
        let got = sorted(Resolver::with_home(None).resolve(&pattern).unwrap());
        assert_eq!(got, vec![dir.path().join("a.tmp"), dir.path().join("b.tmp")]);
    }

    #[test]
    fn character_class_and_question_mark() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["log1", "log2", "log3", "logx"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        let pattern = format!("{}/log[12]", dir.path().display());
        let got = sorted(Resolver::with_home(None).resolve(&pattern).unwrap());
        assert_eq!(got, vec![dir.path().join("log1"), dir.path().join("log2")]);

        let pattern = format!("{}/log?", dir.path().display());
        assert_eq!(Resolver::with_home(None).resolve(&pattern).unwrap().len(), 4);
    }

    #[test]
    fn recursive_wildcard_descends() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/deep.tmp"), b"x").unwrap();
        fs::write(dir.path().join("top.tmp"), b"x").unwrap();

        let pattern = format!("{}/**/*.tmp", dir.path().display());
        let got = sorted(Resolver::with_home(None).resolve(&pattern).unwrap());
        assert_eq!(
            got,
            vec![dir.path().join("a/b/deep.tmp"), dir.path().join("top.tmp")]
        );
    }

    #[test]
    fn home_prefix_matches_explicit_home() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join(".cache/foo")).unwrap();
        fs::write(home.path().join(".cache/foo/1.tmp"), b"x").unwrap();
        fs::write(home.path().join(".cache/foo/2.tmp"), b"x").unwrap();

        let resolver = Resolver::with_home(Some(home.path().to_path_buf()));
        let via_tilde = sorted(resolver.resolve("~/.cache/foo/*.tmp").unwrap());
        let explicit = format!("{}/.cache/foo/*.tmp", home.path().display());
        let via_home = sorted(resolver.resolve(&explicit).unwrap());
        assert_eq!(via_tilde, via_home);
        assert_eq!(via_tilde.len(), 2);
    }

    #[test]
    fn home_with_glob_characters_is_literal() {
        let root = tempfile::tempdir().unwrap();
        let home = root.path().join("user[1]");
        fs::create_dir_all(&home).unwrap();
        fs::write(home.join("x.tmp"), b"x").unwrap();

        let resolver = Resolver::with_home(Some(home.clone()));
        assert_eq!(resolver.resolve("~/*.tmp").unwrap(), vec![home.join("x.tmp")]);
    }

    #[test]
    fn home_prefix_without_home_fails() {
        let resolver = Resolver::with_home(None);
        let err = resolver.resolve("~/.cache/*").unwrap_err();
        assert!(matches!(err, ResolveError::HomeDirectoryUnavailable));
    }

    #[test]
    fn tilde_without_slash_is_not_expanded() {
        let resolver = Resolver::with_home(None);
        let err = resolver.resolve("~nobody-here-xyz/*").unwrap_err();
        assert!(matches!(err, ResolveError::NoMatches));
    }

    #[test]
    fn invalid_syntax_is_malformed() {
        let resolver = Resolver::with_home(None);
        let err = resolver.resolve("/tmp/***").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedPattern(_)));
    }

    #[test]
    fn base_stops_at_first_wildcard() {
        let home = tempfile::tempdir().unwrap();
        fs::create_dir_all(home.path().join(".cache/foo/sub")).unwrap();
        fs::write(home.path().join(".cache/foo/sub/x.tmp"), b"x").unwrap();

        let resolver = Resolver::with_home(Some(home.path().to_path_buf()));
        let (base, paths) = resolver.resolve_within("~/.cache/foo/**/*.tmp").unwrap();
        assert_eq!(base, home.path().join(".cache/foo"));
        assert_eq!(paths, vec![home.path().join(".cache/foo/sub/x.tmp")]);

        let literal = home.path().join(".cache/foo/sub/x.tmp");
        let (base, _) = resolver.resolve_within(literal.to_str().unwrap()).unwrap();
        assert_eq!(base, literal);
    }

    #[test]
    fn nomatch_under_tmp() {
        let resolver = Resolver::with_home(None);
        let err = resolver.resolve("/tmp/nomatch-xyz-*").unwrap_err();
        assert!(matches!(err, ResolveError::NoMatches));
    }
}
