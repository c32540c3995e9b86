use crate::{
    error::{Error, Result},
    layout,
};
use std::path::PathBuf;

const DEFAULT_BASE_DIR: &str = ".";

/// Configuration for one project generation run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Pasted multi-file text
    pub input: String,

    /// Display name; also the name of the project directory
    pub project_name: String,

    /// Dot-separated package identifier, e.g. `com.example.app`
    pub package_id: String,

    /// Directory the project directory is created in
    pub base_dir: PathBuf,

    /// Plan the project without writing anything
    pub dry_run: bool,

    /// Back up files that already exist on disk before replacing them
    pub backup_existing: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use paste_scaffold::Config;
    ///
    /// let config = Config::builder()
    ///     .input("package a;\nclass Main {}")
    ///     .project_name("Demo")
    ///     .package_id("com.example.demo")
    ///     .base_dir("/tmp/projects")
    ///     .build()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.project_dir().to_str(), Some("/tmp/projects/Demo"));
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the input text, project name or package
    /// identifier is empty, if the project name is not a single directory
    /// name, or if a package segment holds a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Err(Error::config("input text must not be empty"));
        }

        if self.project_name.trim().is_empty() {
            return Err(Error::config("project name must not be empty"));
        }

        if !layout::is_plain_name(&self.project_name) {
            return Err(Error::config(format!(
                "project name '{}' must be a plain directory name",
                self.project_name
            )));
        }

        if self.package_id.trim().is_empty() {
            return Err(Error::config("package identifier must not be empty"));
        }

        if let Some(segment) = self
            .package_id
            .split('.')
            .find(|segment| !segment.is_empty() && !layout::is_plain_name(segment))
        {
            return Err(Error::config(format!(
                "package identifier segment '{segment}' must be a plain name"
            )));
        }

        Ok(())
    }

    /// Returns the directory the project is generated into.
    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.base_dir.join(&self.project_name)
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    input: Option<String>,
    project_name: Option<String>,
    package_id: Option<String>,
    base_dir: Option<PathBuf>,
    dry_run: bool,
    backup_existing: bool,
}

impl ConfigBuilder {
    /// Sets the pasted text to split.
    #[must_use]
    pub fn input(mut self, text: impl Into<String>) -> Self {
        self.input = Some(text.into());
        self
    }

    /// Sets the project name.
    #[must_use]
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Sets the package identifier.
    #[must_use]
    pub fn package_id(mut self, id: impl Into<String>) -> Self {
        self.package_id = Some(id.into());
        self
    }

    /// Sets the directory the project directory is created in.
    ///
    /// Default: current directory
    #[must_use]
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    /// Enables dry run mode (no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Enables or disables backups of files that already exist.
    #[must_use]
    pub fn backup_existing(mut self, enabled: bool) -> Self {
        self.backup_existing = enabled;
        self
    }

    /// Builds the configuration. All three text inputs are trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let trimmed = |value: Option<String>| value.map(|v| v.trim().to_string()).unwrap_or_default();

        let config = Config {
            input: trimmed(self.input),
            project_name: trimmed(self.project_name),
            package_id: trimmed(self.package_id),
            base_dir: self.base_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR)),
            dry_run: self.dry_run,
            backup_existing: self.backup_existing,
        };

        config.validate()?;
        Ok(config)
    }
}
