use std::path::Path;

use colored::Colorize;

use crate::cleaner::RemovalOutcome;
use crate::run::RunSummary;
use crate::utils::{display_path, format_size};

pub fn print_summary(summary: &RunSummary, home: Option<&Path>) {
    println!("{}", "=== Summary ===".bold().white());

    for program in &summary.programs {
        let size = format_size(program.report.total_bytes);
        println!("  {:<30} {}", program.name, size.green());
        for entry in &program.report.entries {
            if matches!(entry.outcome, RemovalOutcome::Failed(_)) {
                print_failed_path(&display_path(&entry.path, home));
            }
        }
    }
    for name in &summary.skipped_programs {
        println!("  {:<30} {}", name, "[not installed]".dimmed());
    }

    println!("  {}", "-".repeat(45).dimmed());
    let label = if summary.dry_run {
        "Would remove:"
    } else {
        "Total removed:"
    };
    println!(
        "  {:<30} {}",
        label.bold(),
        format_size(summary.total_bytes).green().bold()
    );
    println!(
        "  {} files, {} paths skipped, {} failed, {} patterns without matches or invalid",
        summary.files_cleaned(),
        summary.paths_skipped(),
        summary.paths_failed(),
        summary.patterns_skipped()
    );
    println!();

    if summary.dry_run {
        print_dry_run_footer();
    }
}

fn print_failed_path(path: &str) {
    println!("    {} {}", "Failed".red().bold(), path.dimmed());
}

fn print_dry_run_footer() {
    println!(
        "{}",
        "This was a dry run. Run `rmcache` without --dryrun to delete."
            .yellow()
            .bold()
    );
}
