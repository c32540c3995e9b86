use crate::{
    error::Result,
    layout,
    template::{DefaultTemplate, TemplateEngine},
    tree::{PlacedFile, ProjectTree},
};
use std::path::PathBuf;
use tracing::debug;

/// Adds the conventional structure and default boilerplate to a project tree.
///
/// Defaults are only inserted at paths the tree does not already hold.
pub(crate) struct Scaffolder {
    project_name: String,
    package_id: String,
    templates: TemplateEngine,
}

impl Scaffolder {
    /// Creates a scaffolder for one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to load.
    pub(crate) fn new(project_name: &str, package_id: &str) -> Result<Self> {
        Ok(Self {
            project_name: project_name.to_string(),
            package_id: package_id.to_string(),
            templates: TemplateEngine::new()?,
        })
    }

    /// Registers every conventional directory, used or not.
    pub(crate) fn add_structure(&self, tree: &mut ProjectTree) {
        tree.add_directory(layout::source_dir(&self.package_id));
        for dir in layout::CONVENTIONAL_DIRS {
            tree.add_directory(*dir);
        }
    }

    /// Adds default Gradle files unless the app module build file is present.
    ///
    /// Returns the number of files added.
    pub(crate) fn add_build_files(&self, tree: &mut ProjectTree) -> Result<usize> {
        if tree.contains(layout::APP_BUILD_FILE) {
            debug!("App build file provided, skipping default Gradle files");
            return Ok(0);
        }

        self.add_defaults(
            tree,
            [
                (layout::ROOT_BUILD_FILE, DefaultTemplate::RootBuild),
                (layout::APP_BUILD_FILE, DefaultTemplate::AppBuild),
                (layout::SETTINGS_FILE, DefaultTemplate::Settings),
                (layout::GRADLE_PROPERTIES_FILE, DefaultTemplate::GradleProperties),
            ],
        )
    }

    /// Adds the default manifest if none was provided.
    pub(crate) fn add_manifest(&self, tree: &mut ProjectTree) -> Result<usize> {
        self.add_defaults(tree, [(layout::MANIFEST_FILE, DefaultTemplate::Manifest)])
    }

    /// Adds default `strings.xml` and `styles.xml` where missing.
    pub(crate) fn add_resources(&self, tree: &mut ProjectTree) -> Result<usize> {
        self.add_defaults(
            tree,
            [
                (layout::values_file(layout::STRINGS_FILE), DefaultTemplate::Strings),
                (layout::values_file(layout::STYLES_FILE), DefaultTemplate::Styles),
            ],
        )
    }

    fn add_defaults<P>(
        &self,
        tree: &mut ProjectTree,
        defaults: impl IntoIterator<Item = (P, DefaultTemplate)>,
    ) -> Result<usize>
    where
        P: Into<PathBuf>,
    {
        let mut added = 0;
        for (path, template) in defaults {
            let path = path.into();
            if tree.contains(&path) {
                continue;
            }
            let content = self.render(template)?;
            if tree.insert_default(PlacedFile::default_file(path, content)) {
                added += 1;
            }
        }
        Ok(added)
    }

    fn render(&self, template: DefaultTemplate) -> Result<String> {
        self.templates
            .render(template, &self.project_name, &self.package_id)
    }
}
