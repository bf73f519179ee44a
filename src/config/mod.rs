//! Configuration types for the application.
//!
//! This module contains the fixed purge targets and the execution switches.
//! Nothing here is read from a file or the environment.

pub mod execution;
pub mod targets;

pub use execution::ExecutionOptions;
pub use targets::PurgeTargets;
