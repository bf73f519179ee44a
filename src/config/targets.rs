//! The fixed set of paths a full clean removes.
//!
//! Both lists are compiled into the binary. They are handed to the purgers
//! explicitly so tests can substitute their own lists.

use std::ffi::OsStr;

use crate::utils::dotted_extension;

/// Directory names and file extensions to delete from a project root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurgeTargets {
    /// Directory names joined directly onto the base path and removed recursively
    pub directories: &'static [&'static str],

    /// Dotted extensions (e.g. `.sln`) of top-level files to remove
    pub extensions: &'static [&'static str],
}

impl PurgeTargets {
    /// Generated folders and IDE files of a Unity project, including the
    /// HybridCLR and YooAsset build outputs.
    pub const UNITY: Self = Self {
        directories: &[
            ".vs",
            ".idea",
            ".vscode",
            ".utmp",
            "obj",
            "Logs",
            "Temp",
            "Library",
            "SceneBackups",
            "MemoryCaptures",
            "Build",
            "HybridCLRData",
            "Bundles",
            "yoo",
            "HotUpdateAssetsPreUpload",
        ],
        extensions: &[".csproj", ".sln", ".txt", ".user", ".vsconfig"],
    };

    /// Create a target set from explicit lists.
    #[must_use]
    pub const fn new(
        directories: &'static [&'static str],
        extensions: &'static [&'static str],
    ) -> Self {
        Self {
            directories,
            extensions,
        }
    }

    /// Whether a file with this name should be deleted by the file phase.
    #[must_use]
    pub fn matches_extension(&self, file_name: impl AsRef<OsStr>) -> bool {
        extension_matches(file_name.as_ref(), self.extensions)
    }
}

impl Default for PurgeTargets {
    fn default() -> Self {
        Self::UNITY
    }
}

/// Exact, case-sensitive comparison of the file's dotted extension against `extensions`.
///
/// `project.sln` matches `.sln`, `.vsconfig` matches `.vsconfig`, and
/// `NOTES.TXT` does not match `.txt`.
#[must_use]
pub fn extension_matches(file_name: &OsStr, extensions: &[&str]) -> bool {
    dotted_extension(file_name)
        .is_some_and(|ext| extensions.iter().any(|listed| listed.as_bytes() == ext))
}
