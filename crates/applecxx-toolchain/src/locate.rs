//! Executable lookup over an ordered list of candidate directories.
//!
//! The existence check sits behind [`ExecutableChecker`] so tests can
//! declare a fixed set of tool paths instead of laying out a fake SDK on
//! disk. Lookup never falls back to the system `PATH`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, ToolchainError};

/// Answers whether a candidate path names an executable file.
pub trait ExecutableChecker: Send + Sync {
    fn is_executable(&self, path: &Path) -> bool;
}

/// Checks the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsExecutableChecker;

impl ExecutableChecker for FsExecutableChecker {
    fn is_executable(&self, path: &Path) -> bool {
        let Ok(metadata) = std::fs::metadata(path) else {
            return false;
        };
        if !metadata.is_file() {
            return false;
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            metadata.permissions().mode() & 0o111 != 0
        }
        #[cfg(not(unix))]
        {
            true
        }
    }
}

/// Reports existence from a fixed set of declared paths.
#[derive(Debug, Default, Clone)]
pub struct FixedExecutableChecker {
    paths: HashSet<PathBuf>,
}

impl FixedExecutableChecker {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExecutableChecker for FixedExecutableChecker {
    fn is_executable(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}

/// Finds tools by name in caller-ordered directories.
#[derive(Clone, Copy)]
pub struct ExecutableLocator<'a> {
    checker: &'a dyn ExecutableChecker,
}

impl<'a> ExecutableLocator<'a> {
    pub fn new(checker: &'a dyn ExecutableChecker) -> Self {
        Self { checker }
    }

    /// Return `<dir>/<tool>` for the first directory that holds it.
    ///
    /// Fails with [`ToolchainError::ToolNotFound`] listing every searched
    /// directory.
    pub fn locate(&self, tool: &str, dirs: &[PathBuf]) -> Result<PathBuf> {
        self.locate_optional(tool, dirs)
            .ok_or_else(|| ToolchainError::ToolNotFound {
                tool: tool.to_string(),
                searched: dirs.to_vec(),
            })
    }

    /// Like [`locate`](Self::locate), for tools the toolchain can do without.
    pub fn locate_optional(&self, tool: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
        for dir in dirs {
            let candidate = dir.join(tool);
            trace!(tool, candidate = %candidate.display(), "probing");
            if self.checker.is_executable(&candidate) {
                debug!(tool, path = %candidate.display(), "found tool");
                return Some(candidate);
            }
        }
        debug!(tool, searched = dirs.len(), "tool not found");
        None
    }
}

impl std::fmt::Debug for ExecutableLocator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutableLocator").finish_non_exhaustive()
    }
}
