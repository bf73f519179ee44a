//! On-disk size measurement.
//!
//! Sizes are taken right before deletion so the summary can report how much
//! space a run reclaimed.

use std::{fs, path::Path};

use walkdir::WalkDir;

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Recursively traverses the directory tree using `walkdir` and sums the sizes
/// of all files found. Symbolic links are not followed. Errors for individual
/// entries (permission denied, entries vanishing mid-walk) are skipped so the
/// function always returns a result.
///
/// Returns `0` if the path does not exist or cannot be traversed at the root level.
#[must_use]
pub fn calculate_dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Size of a single path without following symlinks.
///
/// Directories are measured recursively, anything else reports its own length.
#[must_use]
pub fn path_size(path: &Path) -> u64 {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => calculate_dir_size(path),
        Ok(metadata) => metadata.len(),
        Err(_) => 0,
    }
}
