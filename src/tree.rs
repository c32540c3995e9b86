use crate::classify::FileKind;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a placed file's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "origin", content = "kind")]
pub enum FileOrigin {
    /// Taken from a pasted chunk of the given kind
    Pasted(FileKind),
    /// Synthesized boilerplate
    Default,
}

/// A file destined for the generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedFile {
    /// Path relative to the project directory
    pub relative_path: PathBuf,

    /// Complete file contents
    pub content: String,

    /// Source of the content
    pub origin: FileOrigin,
}

impl PlacedFile {
    /// Creates a file placed from a pasted chunk.
    #[must_use]
    pub fn pasted(relative_path: impl Into<PathBuf>, content: String, kind: FileKind) -> Self {
        Self {
            relative_path: relative_path.into(),
            content,
            origin: FileOrigin::Pasted(kind),
        }
    }

    /// Creates a synthesized default file.
    #[must_use]
    pub fn default_file(relative_path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            relative_path: relative_path.into(),
            content,
            origin: FileOrigin::Default,
        }
    }

    /// Returns true if the file was synthesized rather than pasted.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self.origin, FileOrigin::Default)
    }
}

/// In-memory plan of the generated project.
///
/// Pasted files are inserted first; defaults only fill paths that are still
/// empty, so a default can never replace pasted content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTree {
    files: BTreeMap<PathBuf, PlacedFile>,
    directories: BTreeSet<PathBuf>,
}

impl ProjectTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a directory that must exist even when empty.
    pub fn add_directory(&mut self, dir: impl Into<PathBuf>) {
        self.directories.insert(dir.into());
    }

    /// Inserts a pasted file. A later pasted file at the same path replaces
    /// the earlier one; returns the replaced file, if any.
    pub fn insert_pasted(&mut self, file: PlacedFile) -> Option<PlacedFile> {
        let replaced = self.files.insert(file.relative_path.clone(), file);
        if let Some(old) = &replaced {
            debug!(
                "Pasted content for {} replaced an earlier chunk",
                old.relative_path.display()
            );
        }
        replaced
    }

    /// Inserts a default file unless the path is already taken.
    ///
    /// Returns true if the file was inserted.
    pub fn insert_default(&mut self, file: PlacedFile) -> bool {
        if self.files.contains_key(&file.relative_path) {
            debug!(
                "Keeping existing {}, default skipped",
                file.relative_path.display()
            );
            return false;
        }
        self.files.insert(file.relative_path.clone(), file);
        true
    }

    /// Returns true if a file is planned at `path`.
    #[must_use]
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Returns the file planned at `path`.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&PlacedFile> {
        self.files.get(path.as_ref())
    }

    /// Iterates planned files in path order.
    pub fn files(&self) -> impl Iterator<Item = &PlacedFile> {
        self.files.values()
    }

    /// Iterates registered directories in path order.
    pub fn directories(&self) -> impl Iterator<Item = &Path> {
        self.directories.iter().map(PathBuf::as_path)
    }

    /// Number of planned files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of registered directories.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Number of planned files that are synthesized defaults.
    #[must_use]
    pub fn default_count(&self) -> usize {
        self.files.values().filter(|f| f.is_default()).count()
    }
}
