//! # unity-full-clean
//!
//! Wipes the generated state of the Unity project in the current directory:
//! editor caches, build outputs, IDE folders, and the solution/project files
//! Unity regenerates on the next open.
//!
//! ## Usage
//!
//! ```bash
//! # From the project root; waits for Enter when done
//! unity-full-clean
//!
//! # Scripted runs
//! unity-full-clean --no-pause
//! ```

mod cli;

use std::io::{self, BufRead, Write};
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use unity_full_clean::{Cleaner, ExecutionOptions, PurgeTargets, output};

/// Entry point for the unity-full-clean application.
///
/// A failure to resolve the working directory is the only fatal error. It is
/// printed, the exit prompt is still shown, and the process exits with status 1.
/// Failures to delete individual paths are reported but never change the exit status.
fn main() {
    let args = Cli::parse();
    let execution_options = args.execution_options();

    if let Err(err) = inner_main(&execution_options) {
        eprintln!("Error: {err:#}");
        pause(&execution_options);

        exit(1);
    }
}

/// Resolve the project root, run both phases, and report.
///
/// # Errors
///
/// Returns an error only if the current directory cannot be determined, in
/// which case nothing has been deleted.
fn inner_main(execution_options: &ExecutionOptions) -> Result<()> {
    let base_path = std::env::current_dir().context("Unable to get current directory")?;

    println!(
        "{} {}",
        "Cleaning".bold(),
        base_path.display().to_string().bright_white()
    );

    let result = Cleaner::full_clean(&base_path, &PurgeTargets::UNITY, false);

    output::print_summary(&result);
    println!("\n{}", "✨ Operation completed.".green());

    pause(execution_options);

    Ok(())
}

/// Block until the user presses Enter, unless pausing is disabled.
///
/// End of input (for example a closed stdin) also ends the wait.
fn pause(execution_options: &ExecutionOptions) {
    if !execution_options.pause_on_exit {
        return;
    }

    print!("Press Enter to exit...");
    let _ = io::stdout().flush();

    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
