//! Command-line interface definition and argument parsing.
//!
//! The tool takes no positional arguments and always cleans the current
//! directory. The only switch controls the exit prompt.

use clap::Parser;

use unity_full_clean::ExecutionOptions;

/// Command-line arguments for unity-full-clean.
///
/// Output is always on for the binary; `quiet` exists for library callers.
#[derive(Parser)]
#[command(name = "unity-full-clean")]
#[command(version)]
#[command(
    about = "Delete Library/, Temp/, obj/ and other generated folders plus IDE files from the current Unity project"
)]
pub(crate) struct Cli {
    /// Exit right after cleaning instead of waiting for Enter
    #[arg(long)]
    no_pause: bool,
}

impl Cli {
    /// Build execution options from the parsed arguments.
    pub(crate) const fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions {
            pause_on_exit: !self.no_pause,
            quiet: false,
        }
    }
}
