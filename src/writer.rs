use crate::{
    error::{Error, Result},
    tree::ProjectTree,
};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::SystemTime,
};
use tracing::{debug, info};

/// Persists a planned project tree under a project directory.
pub(crate) struct Writer {
    project_dir: PathBuf,
    backup_existing: bool,
}

impl Writer {
    /// Creates a writer rooted at `project_dir`.
    pub(crate) fn new(project_dir: impl Into<PathBuf>, backup_existing: bool) -> Self {
        Self {
            project_dir: project_dir.into(),
            backup_existing,
        }
    }

    /// Creates every directory and writes every file of the tree.
    ///
    /// Stops at the first failure; files written before it stay on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or a file cannot be
    /// written.
    pub(crate) fn write_tree(&self, tree: &ProjectTree) -> Result<usize> {
        fs::create_dir_all(&self.project_dir).map_err(|e| Error::io(&self.project_dir, e))?;

        for dir in tree.directories() {
            let path = self.project_dir.join(dir);
            fs::create_dir_all(&path).map_err(|e| Error::io(&path, e))?;
        }

        info!(
            "Writing {} files to {}",
            tree.file_count(),
            self.project_dir.display()
        );

        let mut written = 0;
        for file in tree.files() {
            let path = self.project_dir.join(&file.relative_path);
            self.write_file(&path, &file.content)?;
            written += 1;
            debug!("Wrote {} ({} bytes)", file.relative_path.display(), file.content.len());
        }

        Ok(written)
    }

    /// Writes `content` as the complete contents of `path`, creating parent
    /// directories first.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub(crate) fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        if path.exists() && self.backup_existing {
            self.backup_file(path)?;
        }

        write_file_atomic(path, content)
    }

    /// Creates a timestamped backup of an existing file.
    fn backup_file(&self, path: &Path) -> Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)?
            .as_nanos();

        let filename = path
            .file_name()
            .ok_or_else(|| Error::config(format!("Invalid file path: {}", path.display())))?
            .to_string_lossy();

        let backup_path = path.with_file_name(format!("{filename}.backup.{timestamp}"));

        fs::copy(path, &backup_path).map_err(|e| Error::io(&backup_path, e))?;

        debug!(
            "Backed up {} under {}",
            path.strip_prefix(&self.project_dir).unwrap_or(path).display(),
            backup_path.display()
        );
        Ok(())
    }
}

/// Writes through a sibling temporary file and renames it over the target.
///
/// The temporary file is removed if any step fails.
fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = (|| {
        let mut temp_file = fs::File::create(&temp_path).map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| Error::io(&temp_path, e))?;

        temp_file
            .sync_all()
            .map_err(|e| Error::io(&temp_path, e))?;

        drop(temp_file);

        fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
