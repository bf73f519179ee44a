//! Parallel removal of build directories and generated files.
//!
//! This module provides the two purge phases of a full clean. Both follow the
//! same shape: candidates are enumerated synchronously, then handed to a
//! bounded rayon thread pool that deletes them concurrently. The call returns
//! only after every job has finished, successfully or not. A failed deletion
//! is reported and skipped, never retried, and never stops the rest of the
//! batch.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::config::{PurgeTargets, targets::extension_matches};
use crate::output;
use crate::utils::path_size;

/// Smallest worker pool ever built, even on a single-core machine.
pub const MIN_WORKERS: usize = 2;

/// What kind of candidate a purge job deletes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// A named directory under the base path, removed recursively
    Directory,

    /// A top-level file matched by extension
    File,
}

impl TargetKind {
    /// Lowercase noun used in status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

/// Result of deleting a single candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// The path was deleted; `bytes` is its size measured just before removal.
    Removed { bytes: u64 },

    /// The path did not exist. Counts as success.
    Absent,

    /// Deletion failed; the rest of the batch is unaffected.
    Failed { error: String },
}

/// Aggregated result of one or more purge phases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PurgeResult {
    /// Number of paths actually deleted.
    pub removed: usize,

    /// Number of directory targets that were not present.
    pub absent: usize,

    /// Total bytes freed by the deleted paths.
    pub freed_bytes: u64,

    /// One message per path that could not be deleted.
    pub errors: Vec<String>,
}

impl PurgeResult {
    /// Fold a single job outcome into the totals.
    pub fn record(&mut self, path: &Path, outcome: PurgeOutcome) {
        match outcome {
            PurgeOutcome::Removed { bytes } => {
                self.removed += 1;
                self.freed_bytes += bytes;
            }
            PurgeOutcome::Absent => self.absent += 1,
            PurgeOutcome::Failed { error } => {
                self.errors.push(format!("{}: {error}", path.display()));
            }
        }
    }

    /// Combine the totals of another phase into this one.
    pub fn merge(&mut self, other: Self) {
        self.removed += other.removed;
        self.absent += other.absent;
        self.freed_bytes += other.freed_bytes;
        self.errors.extend(other.errors);
    }

    /// Number of paths that could not be deleted.
    #[must_use]
    pub const fn failure_count(&self) -> usize {
        self.errors.len()
    }

    /// Total number of jobs this result accounts for.
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.removed + self.absent + self.errors.len()
    }
}

/// Number of hardware threads, falling back to 1 when it cannot be queried.
#[must_use]
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Size a worker pool.
///
/// The pool never drops below [`MIN_WORKERS`]. When the number of candidates is
/// known up front, the pool is additionally capped to it so no worker starts
/// without a job.
#[must_use]
pub fn worker_count(available: usize, candidates: Option<usize>) -> usize {
    let workers = available.max(MIN_WORKERS);

    candidates.map_or(workers, |count| workers.min(count))
}

/// Handles both purge phases of a full clean.
///
/// The target lists are passed into each call rather than read from global
/// state, so callers (and tests) decide exactly what is eligible.
#[derive(Debug)]
pub struct Cleaner;

impl Cleaner {
    /// Create a new cleaner instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Remove each named directory under `base` recursively.
    ///
    /// Every name is joined onto `base` and deleted on a pool of
    /// [`worker_count`] threads. A path that does not exist is reported as
    /// [`PurgeOutcome::Absent`] rather than as an error, which keeps repeated
    /// runs idempotent. A non-directory entry carrying one of the names is
    /// removed as well.
    ///
    /// # Arguments
    ///
    /// * `base` - The project root
    /// * `names` - Directory names to remove, relative to `base`
    /// * `quiet` - When `true`, suppresses the per-path status lines
    ///
    /// # Errors
    ///
    /// Returns an error only if the worker pool cannot be created. Individual
    /// deletion failures are collected in [`PurgeResult::errors`].
    pub fn purge_directories(base: &Path, names: &[&str], quiet: bool) -> Result<PurgeResult> {
        let candidates: Vec<PathBuf> = names.iter().map(|name| base.join(name)).collect();

        if candidates.is_empty() {
            return Ok(PurgeResult::default());
        }

        let workers = worker_count(available_parallelism(), None);

        run_jobs(candidates, workers, TargetKind::Directory, quiet)
    }

    /// Remove top-level files of `base` whose extension is in `extensions`.
    ///
    /// Only the immediate entries of `base` are considered; subdirectories are
    /// never descended into. When nothing matches, the call returns right away
    /// without building a worker pool.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` cannot be listed or the worker pool cannot be
    /// created. Individual deletion failures are collected in
    /// [`PurgeResult::errors`].
    pub fn purge_files(base: &Path, extensions: &[&str], quiet: bool) -> Result<PurgeResult> {
        let candidates = Self::file_candidates(base, extensions)?;

        if candidates.is_empty() {
            return Ok(PurgeResult::default());
        }

        let workers = worker_count(available_parallelism(), Some(candidates.len()));

        run_jobs(candidates, workers, TargetKind::File, quiet)
    }

    /// Run the directory phase, then the file phase, and combine their totals.
    ///
    /// A phase that cannot run at all (the base path cannot be listed, or its
    /// pool cannot start) is reported on stderr and does not prevent the other
    /// phase from running.
    #[must_use]
    pub fn full_clean(base: &Path, targets: &PurgeTargets, quiet: bool) -> PurgeResult {
        let mut result = PurgeResult::default();

        if !quiet {
            output::print_phase("🧹 Deleting directories...");
        }
        match Self::purge_directories(base, targets.directories, quiet) {
            Ok(dirs) => result.merge(dirs),
            Err(e) => {
                if !quiet {
                    output::print_phase_error("directories", &e);
                }
            }
        }

        if !quiet {
            output::print_phase("🧹 Deleting files...");
        }
        match Self::purge_files(base, targets.extensions, quiet) {
            Ok(files) => result.merge(files),
            Err(e) => {
                if !quiet {
                    output::print_phase_error("files", &e);
                }
            }
        }

        result
    }

    /// List the top-level entries of `base` that the file phase would delete.
    ///
    /// Entries whose file type is a directory are skipped. Names are compared
    /// as raw bytes, so names that are not valid UTF-8 still match.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` cannot be read.
    pub fn file_candidates(base: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(base)
            .with_context(|| format!("Failed to list directory {}", base.display()))?;

        let mut candidates: Vec<PathBuf> = entries
            .flatten()
            .filter(|entry| entry.file_type().is_ok_and(|ft| !ft.is_dir()))
            .filter(|entry| extension_matches(&entry.file_name(), extensions))
            .map(|entry| entry.path())
            .collect();

        candidates.sort();

        Ok(candidates)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a dedicated pool so a phase never exceeds its worker budget.
fn build_pool(workers: usize, kind: TargetKind) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(move |i| format!("purge-{}-{i}", kind.label()))
        .build()
        .with_context(|| format!("Failed to start {workers} {} workers", kind.label()))
}

/// Fan `candidates` out over a pool of `workers` threads and wait for all of them.
fn run_jobs(
    candidates: Vec<PathBuf>,
    workers: usize,
    kind: TargetKind,
    quiet: bool,
) -> Result<PurgeResult> {
    let pool = build_pool(workers, kind)?;

    let outcomes: Vec<(PathBuf, PurgeOutcome)> = pool.install(|| {
        candidates
            .into_par_iter()
            .map(|path| {
                let outcome = match kind {
                    TargetKind::Directory => remove_directory(&path),
                    TargetKind::File => remove_file(&path),
                };

                if !quiet {
                    output::print_outcome(kind, &path, &outcome);
                }

                (path, outcome)
            })
            .collect()
    });

    let mut result = PurgeResult::default();
    for (path, outcome) in outcomes {
        result.record(&path, outcome);
    }

    Ok(result)
}

/// Recursively delete `path`, treating a missing path as success.
fn remove_directory(path: &Path) -> PurgeOutcome {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return PurgeOutcome::Absent,
        Err(e) => {
            return PurgeOutcome::Failed {
                error: e.to_string(),
            };
        }
    };

    let bytes = path_size(path);
    let removal = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removal {
        Ok(()) => PurgeOutcome::Removed { bytes },
        // Gone between the stat and the delete
        Err(e) if e.kind() == ErrorKind::NotFound => PurgeOutcome::Absent,
        Err(e) => PurgeOutcome::Failed {
            error: e.to_string(),
        },
    }
}

/// Delete a single file candidate.
///
/// The file was seen during listing, so a missing file here is a race and is
/// reported as a failure.
fn remove_file(path: &Path) -> PurgeOutcome {
    let bytes = path_size(path);

    match fs::remove_file(path) {
        Ok(()) => PurgeOutcome::Removed { bytes },
        Err(e) => PurgeOutcome::Failed {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path, len: usize) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, vec![b'x'; len]).unwrap();
    }

    #[test]
    fn test_worker_count_minimum() {
        assert_eq!(worker_count(0, None), 2);
        assert_eq!(worker_count(1, None), 2);
        assert_eq!(worker_count(8, None), 8);
    }

    #[test]
    fn test_worker_count_capped_by_candidates() {
        assert_eq!(worker_count(8, Some(3)), 3);
        assert_eq!(worker_count(1, Some(5)), 2);
        assert_eq!(worker_count(1, Some(1)), 1);
        assert_eq!(worker_count(4, Some(100)), 4);
    }

    #[test]
    fn test_available_parallelism_is_positive() {
        assert!(available_parallelism() >= 1);
    }

    #[test]
    fn test_purge_result_record_and_merge() {
        let mut dirs = PurgeResult::default();
        dirs.record(Path::new("/p/obj"), PurgeOutcome::Removed { bytes: 10 });
        dirs.record(Path::new("/p/Temp"), PurgeOutcome::Absent);

        let mut files = PurgeResult::default();
        files.record(Path::new("/p/a.sln"), PurgeOutcome::Removed { bytes: 5 });
        files.record(
            Path::new("/p/b.txt"),
            PurgeOutcome::Failed {
                error: "denied".to_string(),
            },
        );

        dirs.merge(files);

        assert_eq!(dirs.removed, 2);
        assert_eq!(dirs.absent, 1);
        assert_eq!(dirs.freed_bytes, 15);
        assert_eq!(dirs.failure_count(), 1);
        assert_eq!(dirs.processed(), 4);
        assert!(dirs.errors[0].contains("b.txt"));
        assert!(dirs.errors[0].contains("denied"));
    }

    #[test]
    fn test_remove_directory_missing_is_absent() {
        let temp = TempDir::new().unwrap();

        assert_eq!(
            remove_directory(&temp.path().join("Library")),
            PurgeOutcome::Absent
        );
    }

    #[test]
    fn test_remove_directory_reports_size() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("Library");
        touch(&dir.join("a"), 30);
        touch(&dir.join("nested").join("b"), 12);

        assert_eq!(remove_directory(&dir), PurgeOutcome::Removed { bytes: 42 });
        assert!(!dir.exists());
    }

    #[test]
    fn test_remove_directory_handles_plain_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Build");
        touch(&path, 7);

        assert_eq!(remove_directory(&path), PurgeOutcome::Removed { bytes: 7 });
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_directory_does_not_follow_symlinks() {
        let temp = TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        touch(&outside.join("precious.asset"), 3);
        let project = temp.path().join("project");
        fs::create_dir(&project).unwrap();
        std::os::unix::fs::symlink(&outside, project.join("Library")).unwrap();

        let outcome = remove_directory(&project.join("Library"));

        assert!(matches!(outcome, PurgeOutcome::Removed { .. }));
        assert!(!project.join("Library").exists());
        assert!(outside.join("precious.asset").exists());
    }

    #[test]
    fn test_remove_file_reports_size() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("GASSample.sln");
        touch(&path, 19);

        assert_eq!(remove_file(&path), PurgeOutcome::Removed { bytes: 19 });
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_file_missing_is_failure() {
        let temp = TempDir::new().unwrap();

        assert!(matches!(
            remove_file(&temp.path().join("gone.sln")),
            PurgeOutcome::Failed { .. }
        ));
    }

    #[test]
    fn test_file_candidates_top_level_only() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        touch(&base.join("Game.sln"), 1);
        touch(&base.join("Game.csproj"), 1);
        touch(&base.join("keep.json"), 1);
        touch(&base.join("Assets").join("readme.txt"), 1);
        fs::create_dir(base.join("folder.txt")).unwrap();

        let candidates = Cleaner::file_candidates(base, &[".sln", ".csproj", ".txt"]).unwrap();

        assert_eq!(
            candidates,
            vec![base.join("Game.csproj"), base.join("Game.sln")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_file_candidates_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let name = OsStr::from_bytes(b"notes\xff.txt");
        touch(&base.join(name), 3);

        let candidates = Cleaner::file_candidates(base, &[".txt"]).unwrap();

        assert_eq!(candidates, vec![base.join(name)]);
    }

    #[test]
    fn test_file_candidates_unreadable_base() {
        let temp = TempDir::new().unwrap();

        let result = Cleaner::file_candidates(&temp.path().join("missing"), &[".txt"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_purge_directories_empty_name_list() {
        let temp = TempDir::new().unwrap();

        let result = Cleaner::purge_directories(temp.path(), &[], true).unwrap();

        assert_eq!(result, PurgeResult::default());
    }

    #[test]
    fn test_purge_files_no_candidates() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("keep.json"), 4);

        let result = Cleaner::purge_files(temp.path(), &[".sln"], true).unwrap();

        assert_eq!(result.processed(), 0);
        assert!(temp.path().join("keep.json").exists());
    }

    #[test]
    fn test_target_kind_label() {
        assert_eq!(TargetKind::Directory.label(), "directory");
        assert_eq!(TargetKind::File.label(), "file");
    }
}
