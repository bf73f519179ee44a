//! Execution configuration for a clean run.
//!
//! This module defines the switches that control how a run interacts with the
//! user. They never change which paths are deleted.

/// Configuration for run behavior.
#[derive(Clone, Copy, Debug)]
pub struct ExecutionOptions {
    /// Whether to wait for a line on stdin before exiting
    pub pause_on_exit: bool,

    /// Whether to suppress per-item status lines and the summary
    pub quiet: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            pause_on_exit: true,
            quiet: false,
        }
    }
}
