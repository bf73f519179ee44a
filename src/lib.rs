//! # unity-full-clean
//!
//! Deletes the generated folders and IDE files of a Unity project so it can be
//! reimported from scratch.
//!
//! A run has two phases. The directory phase removes a fixed list of folders
//! (`Library/`, `Temp/`, `obj/`, ...) recursively. The file phase then removes
//! top-level files whose extension is in a fixed list (`.sln`, `.csproj`, ...).
//! Within each phase, deletions run concurrently on a bounded rayon pool.

pub mod cleaner;
pub mod config;
pub mod output;
pub mod utils;

pub use cleaner::{Cleaner, PurgeOutcome, PurgeResult, TargetKind};
pub use config::{ExecutionOptions, PurgeTargets};
