//! Human-readable status reporting.
//!
//! Every deleted or failed path gets one line on stdout, printed by the worker
//! that handled it. Each line is written with a single `println!`, so lines
//! from concurrent workers never interleave mid-line.

use std::path::Path;

use colored::Colorize;
use humansize::{DECIMAL, format_size};

use crate::cleaner::{PurgeOutcome, PurgeResult, TargetKind};

/// Plain-text status line for a single job outcome.
#[must_use]
pub fn format_outcome(kind: TargetKind, path: &Path, outcome: &PurgeOutcome) -> String {
    match outcome {
        PurgeOutcome::Removed { bytes } => format!(
            "Deleted {}: {} ({})",
            kind.label(),
            path.display(),
            format_size(*bytes, DECIMAL)
        ),
        PurgeOutcome::Absent => format!("Not present: {}", path.display()),
        PurgeOutcome::Failed { error } => format!(
            "Unable to delete {}: {}, Error: {error}",
            kind.label(),
            path.display()
        ),
    }
}

/// Print the status line for a single job outcome.
pub fn print_outcome(kind: TargetKind, path: &Path, outcome: &PurgeOutcome) {
    let line = format_outcome(kind, path, outcome);

    match outcome {
        PurgeOutcome::Removed { .. } => println!("{}", line.green()),
        PurgeOutcome::Absent => println!("{}", line.dimmed()),
        PurgeOutcome::Failed { .. } => println!("{}", line.red()),
    }
}

/// Announce the start of a phase.
pub fn print_phase(title: &str) {
    println!("\n{}", title.cyan());
}

/// Report a phase that could not run at all.
pub fn print_phase_error(phase: &str, err: &anyhow::Error) {
    eprintln!("{} {err:#}", format!("Error deleting {phase}:").yellow());
}

/// Header followed by one indented line per failed path, or nothing when
/// every path was handled.
#[must_use]
pub fn format_failures(result: &PurgeResult) -> Vec<String> {
    if result.errors.is_empty() {
        return Vec::new();
    }

    std::iter::once("⚠️  Some paths could not be deleted:".to_string())
        .chain(result.errors.iter().map(|error| format!("  {error}")))
        .collect()
}

/// Print the final cleanup summary to stdout.
pub fn print_summary(result: &PurgeResult) {
    if let Some((header, items)) = format_failures(result).split_first() {
        println!("\n{}", header.yellow());
        for item in items {
            println!("{}", item.red());
        }
    }

    println!("\n{}", "📊 Cleanup Summary:".bold());
    println!("  ✅ Deleted: {} paths", result.removed.to_string().green());

    if result.absent > 0 {
        println!("  💤 Not present: {} directories", result.absent.to_string().dimmed());
    }

    if !result.errors.is_empty() {
        println!("  ❌ Failed to delete: {} paths", result.failure_count().to_string().red());
    }

    println!(
        "  💾 Total space freed: {}",
        format_size(result.freed_bytes, DECIMAL)
            .bright_green()
            .bold()
    );
}
