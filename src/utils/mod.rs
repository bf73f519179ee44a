//! Utility functions and helpers.
//!
//! This module contains small filesystem helpers used by the purgers:
//! size measurement and extension extraction.

pub mod extension;
pub mod size;

pub use extension::dotted_extension;
pub use size::path_size;
