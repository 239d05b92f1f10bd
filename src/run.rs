use crate::cleaner::{CleanReport, Cleaner, ProgramCleaner, RemovalOutcome};
use crate::config::{Config, ProgramEntry};
use crate::locator::ExecutableLocator;
use crate::resolver::Resolver;

/// Everything a run needs besides the configuration.
pub struct RunOptions<'a> {
    pub locator: &'a dyn ExecutableLocator,
    pub resolver: &'a Resolver,
    pub dry_run: bool,
}

/// Report of one installed program.
#[derive(Debug)]
pub struct ProgramReport {
    pub name: String,
    pub report: CleanReport,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub dry_run: bool,
    pub programs: Vec<ProgramReport>,
    pub skipped_programs: Vec<String>,
    pub total_bytes: u64,
}

impl RunSummary {
    fn count(&self, pred: impl Fn(&RemovalOutcome) -> bool + Copy) -> usize {
        self.programs.iter().map(|p| p.report.count(pred)).sum()
    }

    /// Files removed, or planned for removal under dry-run.
    pub fn files_cleaned(&self) -> usize {
        self.count(|o| matches!(o, RemovalOutcome::Removed(_) | RemovalOutcome::DryRunPlanned(_)))
    }

    pub fn paths_skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                RemovalOutcome::SkippedNotFound | RemovalOutcome::SkippedNotRegularFile
            )
        })
    }

    pub fn paths_failed(&self) -> usize {
        self.count(|o| matches!(o, RemovalOutcome::Failed(_)))
    }

    pub fn patterns_skipped(&self) -> usize {
        self.programs
            .iter()
            .map(|p| p.report.skipped_patterns.len())
            .sum()
    }
}

/// Cleaners for the configured programs whose executable can be located.
/// Programs that are not installed are logged and returned separately.
pub fn installed_cleaners<'a>(
    config: &'a Config,
    locator: &dyn ExecutableLocator,
    resolver: &'a Resolver,
) -> (Vec<ProgramCleaner<'a>>, Vec<String>) {
    let mut cleaners = Vec::new();
    let mut skipped = Vec::new();

    for (name, entry) in &config.programs {
        if !locator.is_installed(name) {
            tracing::info!(program = %name, "program isn't found, skipping entry");
            skipped.push(name.clone());
            continue;
        }
        tracing::info!(program = %name, "found entry");
        announce_run_command(name, entry);
        cleaners.push(ProgramCleaner::new(name, entry, resolver));
    }

    (cleaners, skipped)
}

fn announce_run_command(name: &str, entry: &ProgramEntry) {
    if let Some((executable, args)) = entry.run.split_first() {
        tracing::info!(
            program = name,
            executable = %executable,
            args = %args.join(" "),
            "run command configured, not executed"
        );
    }
}

/// Clean every installed program in `config`.
///
/// Only per-pattern and per-path failures can occur here; they are logged and
/// recorded in the summary, and never stop the run.
pub fn run(config: &Config, opts: &RunOptions<'_>) -> RunSummary {
    let (cleaners, skipped_programs) = installed_cleaners(config, opts.locator, opts.resolver);

    let mut summary = RunSummary {
        dry_run: opts.dry_run,
        skipped_programs,
        ..RunSummary::default()
    };

    for cleaner in cleaners {
        let report = cleaner.clean(opts.dry_run);
        summary.total_bytes += report.total_bytes;
        summary.programs.push(ProgramReport {
            name: cleaner.name().to_string(),
            report,
        });
    }

    tracing::info!(
        total_bytes = summary.total_bytes,
        dry_run = opts.dry_run,
        "run finished"
    );
    summary
}
