//! # Quick API
//!
//! One-call entry point for the common case. Start here if you just want a
//! project on disk from a block of pasted text.
//!
//! ## Examples
//!
//! ```no_run
//! use paste_scaffold::api::Generate;
//!
//! let pasted = std::fs::read_to_string("pasted.txt")?;
//!
//! let report = Generate::project("Demo", "com.example.demo")
//!     .from_text(pasted)
//!     .into_dir("/tmp/projects")
//!     .on_progress(|event| println!("{event}"))
//!     .run()?;
//!
//! assert!(report.is_success());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{Config, GenerationReport, Pipeline, ProgressEvent, Result};
use std::{fmt, path::PathBuf};

type ProgressCallback = Box<dyn Fn(&ProgressEvent) + Send>;

/// Fluent builder for a single generation run.
#[must_use = "call .run() to generate the project"]
pub struct Generate {
    project_name: String,
    package_id: String,
    input: String,
    base_dir: PathBuf,
    dry_run: bool,
    backup_existing: bool,
    on_progress: Option<ProgressCallback>,
}

impl fmt::Debug for Generate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generate")
            .field("project_name", &self.project_name)
            .field("package_id", &self.package_id)
            .field("input_len", &self.input.len())
            .field("base_dir", &self.base_dir)
            .field("dry_run", &self.dry_run)
            .field("backup_existing", &self.backup_existing)
            .finish_non_exhaustive()
    }
}

impl Generate {
    /// Starts a run for the given project name and package identifier.
    pub fn project(name: impl Into<String>, package_id: impl Into<String>) -> Self {
        Self {
            project_name: name.into(),
            package_id: package_id.into(),
            input: String::new(),
            base_dir: PathBuf::from("."),
            dry_run: false,
            backup_existing: false,
            on_progress: None,
        }
    }

    /// Sets the pasted text.
    pub fn from_text(mut self, text: impl Into<String>) -> Self {
        self.input = text.into();
        self
    }

    /// Sets the directory the project directory is created in.
    ///
    /// Default: current directory
    pub fn into_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = path.into();
        self
    }

    /// Plans the project without writing files.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Backs up files that already exist before replacing them.
    pub fn with_backups(mut self) -> Self {
        self.backup_existing = true;
        self
    }

    /// Registers a progress callback.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProgressEvent) + Send + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Validates the inputs and runs the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error only for invalid input (an empty text, project name
    /// or package). Failures during generation are reported through the
    /// returned [`GenerationReport`].
    pub fn run(self) -> Result<GenerationReport> {
        let config = Config::builder()
            .input(self.input)
            .project_name(self.project_name)
            .package_id(self.package_id)
            .base_dir(self.base_dir)
            .dry_run(self.dry_run)
            .backup_existing(self.backup_existing)
            .build()?;

        let pipeline = Pipeline::new(config)?;
        let report = match &self.on_progress {
            Some(callback) => pipeline.execute(&|event: &ProgressEvent| callback(event)),
            None => pipeline.execute(&()),
        };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn generate_builder_has_sensible_defaults() {
        let generate = Generate::project("Demo", "com.x");
        assert_eq!(generate.base_dir, PathBuf::from("."));
        assert!(!generate.dry_run);
        assert!(!generate.backup_existing);
        assert!(generate.on_progress.is_none());
    }

    #[test]
    fn generate_builder_is_fluent() {
        let generate = Generate::project("Demo", "com.x")
            .from_text("package a;\nclass B {}")
            .into_dir("./projects")
            .dry_run()
            .with_backups();

        assert_eq!(generate.input, "package a;\nclass B {}");
        assert_eq!(generate.base_dir, PathBuf::from("./projects"));
        assert!(generate.dry_run);
        assert!(generate.backup_existing);
    }

    #[test]
    fn empty_input_is_rejected_before_work() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = Generate::project("Demo", "com.x")
            .from_text("   ")
            .into_dir(temp.path())
            .run()
            .unwrap_err();

        assert!(err.is_config());
        assert!(!temp.path().join("Demo").exists());
    }

    #[test]
    fn progress_callback_sees_every_event() {
        let temp = assert_fs::TempDir::new().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let report = Generate::project("Demo", "com.x")
            .from_text("package a;\nclass Hello {}")
            .into_dir(temp.path())
            .on_progress(move |event| sink.lock().unwrap().push(event.clone()))
            .run()
            .unwrap();

        assert!(report.is_success());
        assert_eq!(*seen.lock().unwrap(), report.events);
        assert!(temp
            .path()
            .join("Demo/app/src/main/java/com/x/Hello.java")
            .exists());
    }
}
