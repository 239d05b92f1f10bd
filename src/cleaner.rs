use std::io;
use std::path::{Path, PathBuf};

use crate::config::ProgramEntry;
use crate::error::{RemovalError, ResolveError};
use crate::resolver::Resolver;
use crate::unlink::{self, Unlinked};

/// Result of attempting to remove one resolved path.
#[derive(Debug)]
pub enum RemovalOutcome {
    Removed(u64),
    SkippedNotFound,
    SkippedNotRegularFile,
    Failed(RemovalError),
    DryRunPlanned(u64),
}

impl RemovalOutcome {
    /// Bytes this outcome counts toward the run total.
    pub fn freed_bytes(&self) -> u64 {
        match self {
            Self::Removed(bytes) | Self::DryRunPlanned(bytes) => *bytes,
            _ => 0,
        }
    }
}

/// Remove `path` if it is a regular file, or only report its size when `dry_run`.
///
/// Symlinks are never followed: a link is rejected as not regular, whatever it
/// points at. At most one unlink happens per call.
pub fn safe_remove(path: &Path, dry_run: bool) -> RemovalOutcome {
    safe_remove_within(path.parent().unwrap_or(Path::new("")), path, dry_run)
}

/// [`safe_remove`] confined to `root`: a path reached through a symlinked
/// directory below `root` is rejected as not regular.
pub fn safe_remove_within(root: &Path, path: &Path, dry_run: bool) -> RemovalOutcome {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return RemovalOutcome::SkippedNotFound,
        Err(e) => return RemovalOutcome::Failed(RemovalError::Stat(e)),
    };

    if !meta.file_type().is_file() {
        return RemovalOutcome::SkippedNotRegularFile;
    }
    match unlink::crosses_symlink(root, path) {
        Ok(false) => {}
        Ok(true) => return RemovalOutcome::SkippedNotRegularFile,
        Err(e) => return RemovalOutcome::Failed(RemovalError::Stat(e)),
    }

    let size = meta.len();
    if dry_run {
        return RemovalOutcome::DryRunPlanned(size);
    }

    match unlink::unlink_regular(root, path) {
        Ok(Unlinked::Removed) => RemovalOutcome::Removed(size),
        Ok(Unlinked::NotRegular) => RemovalOutcome::SkippedNotRegularFile,
        Err(e) => RemovalOutcome::Failed(RemovalError::Remove(e)),
    }
}

/// One resolved path and what happened to it.
#[derive(Debug)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub outcome: RemovalOutcome,
}

/// A pattern that could not be expanded.
#[derive(Debug)]
pub struct SkippedPattern {
    pub pattern: String,
    pub error: ResolveError,
}

/// Result of cleaning a single program.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub entries: Vec<ScanEntry>,
    pub skipped_patterns: Vec<SkippedPattern>,
    pub total_bytes: u64,
}

impl CleanReport {
    pub fn count(&self, pred: impl Fn(&RemovalOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// The trait every cleanup unit implements.
///
/// The run loop only sees this seam. [`ProgramCleaner`] covers config
/// entries; test doubles and embedders plug other units in the same way.
pub trait Cleaner {
    /// Name used in logs and the summary.
    fn name(&self) -> &str;

    /// Delete what this unit covers. When `dry_run` is true nothing is
    /// deleted and the report carries planned sizes instead.
    fn clean(&self, dry_run: bool) -> CleanReport;
}

/// Cleans the path patterns of one configured program.
pub struct ProgramCleaner<'a> {
    name: &'a str,
    entry: &'a ProgramEntry,
    resolver: &'a Resolver,
}

impl<'a> ProgramCleaner<'a> {
    pub fn new(name: &'a str, entry: &'a ProgramEntry, resolver: &'a Resolver) -> Self {
        Self {
            name,
            entry,
            resolver,
        }
    }
}

impl Cleaner for ProgramCleaner<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn clean(&self, dry_run: bool) -> CleanReport {
        let mut report = CleanReport::default();

        for pattern in &self.entry.paths {
            let (base, paths) = match self.resolver.resolve_within(pattern) {
                Ok(resolved) => resolved,
                Err(error) => {
                    // NoMatches stays at info: an emptied cache dir is routine.
                    if matches!(error, ResolveError::NoMatches) {
                        tracing::info!(program = self.name, pattern = %pattern, %error, "skipping pattern");
                    } else {
                        tracing::warn!(program = self.name, pattern = %pattern, %error, "skipping pattern");
                    }
                    report.skipped_patterns.push(SkippedPattern {
                        pattern: pattern.clone(),
                        error,
                    });
                    continue;
                }
            };

            for path in paths {
                let outcome = safe_remove_within(&base, &path, dry_run);
                log_outcome(self.name, &path, &outcome);
                report.total_bytes += outcome.freed_bytes();
                report.entries.push(ScanEntry { path, outcome });
            }
        }

        report
    }
}

fn log_outcome(program: &str, path: &Path, outcome: &RemovalOutcome) {
    let path = path.display();
    match outcome {
        RemovalOutcome::Removed(bytes) => {
            tracing::info!(program, %path, bytes, "removed file");
        }
        RemovalOutcome::DryRunPlanned(bytes) => {
            tracing::info!(program, %path, bytes, "would remove file");
        }
        RemovalOutcome::SkippedNotFound => {
            tracing::warn!(program, %path, "file not found, skipping");
        }
        RemovalOutcome::SkippedNotRegularFile => {
            tracing::warn!(program, %path, "not a regular file, skipping");
        }
        RemovalOutcome::Failed(error) => {
            tracing::warn!(program, %path, %error, "failed to remove path");
        }
    }
}
