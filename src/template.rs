use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

const GRADLE_PLUGIN_VERSION: &str = "7.4.0";
const COMPILE_SDK: u32 = 33;
const MIN_SDK: u32 = 21;
const TARGET_SDK: u32 = 33;

/// App name written into the default `strings.xml`.
pub(crate) const FALLBACK_APP_NAME: &str = "MyApp";

/// Built-in boilerplate templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DefaultTemplate {
    RootBuild,
    AppBuild,
    Settings,
    GradleProperties,
    Manifest,
    Strings,
    Styles,
}

impl DefaultTemplate {
    const ALL: [Self; 7] = [
        Self::RootBuild,
        Self::AppBuild,
        Self::Settings,
        Self::GradleProperties,
        Self::Manifest,
        Self::Strings,
        Self::Styles,
    ];

    const fn name(self) -> &'static str {
        match self {
            Self::RootBuild => "root_build",
            Self::AppBuild => "app_build",
            Self::Settings => "settings",
            Self::GradleProperties => "gradle_properties",
            Self::Manifest => "manifest",
            Self::Strings => "strings",
            Self::Styles => "styles",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::RootBuild => include_str!("../templates/root_build.gradle.tera"),
            Self::AppBuild => include_str!("../templates/app_build.gradle.tera"),
            Self::Settings => include_str!("../templates/settings.gradle.tera"),
            Self::GradleProperties => include_str!("../templates/gradle.properties.tera"),
            Self::Manifest => include_str!("../templates/manifest.tera"),
            Self::Strings => include_str!("../templates/strings.tera"),
            Self::Styles => include_str!("../templates/styles.tera"),
        }
    }
}

#[derive(Serialize)]
struct TemplateContext<'a> {
    project_name: &'a str,
    package_id: &'a str,
    fallback_app_name: &'a str,
    gradle_plugin_version: &'a str,
    compile_sdk: u32,
    min_sdk: u32,
    target_sdk: u32,
}

/// Renders default project files from the embedded templates.
pub(crate) struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Creates a new template engine with all built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub(crate) fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // Output is Gradle and XML; escaping is applied per value with filters.
        tera.autoescape_on(Vec::new());

        for template in DefaultTemplate::ALL {
            tera.add_raw_template(template.name(), template.source())
                .map_err(|e| Error::template(template.name(), &e))?;
        }

        tera.register_filter("xml_escape", Self::xml_escape_filter);
        tera.register_filter("groovy_escape", Self::groovy_escape_filter);
        tera.register_filter("groovy_gstring_escape", Self::groovy_gstring_escape_filter);

        Ok(Self { tera })
    }

    /// XML escape filter implementation.
    fn xml_escape_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        if let Some(s) = value.as_str() {
            let escaped = s
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
                .replace('"', "&quot;")
                .replace('\'', "&apos;");
            Ok(Value::String(escaped))
        } else {
            Ok(value.clone())
        }
    }

    /// Escapes a value for a single-quoted Groovy string.
    fn groovy_escape_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        if let Some(s) = value.as_str() {
            let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
            Ok(Value::String(escaped))
        } else {
            Ok(value.clone())
        }
    }

    /// Escapes a value for a double-quoted Groovy string, where `$` starts
    /// an interpolation.
    fn groovy_gstring_escape_filter(
        value: &Value,
        _args: &HashMap<String, Value>,
    ) -> tera::Result<Value> {
        if let Some(s) = value.as_str() {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('$', "\\$");
            Ok(Value::String(escaped))
        } else {
            Ok(value.clone())
        }
    }

    /// Renders one default file for the given project.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub(crate) fn render(
        &self,
        template: DefaultTemplate,
        project_name: &str,
        package_id: &str,
    ) -> Result<String> {
        let context = TemplateContext {
            project_name,
            package_id,
            fallback_app_name: FALLBACK_APP_NAME,
            gradle_plugin_version: GRADLE_PLUGIN_VERSION,
            compile_sdk: COMPILE_SDK,
            min_sdk: MIN_SDK,
            target_sdk: TARGET_SDK,
        };

        let mut tera_context = Context::new();
        tera_context.insert("ctx", &context);

        self.tera
            .render(template.name(), &tera_context)
            .map_err(|e| Error::template(template.name(), &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: DefaultTemplate) -> String {
        TemplateEngine::new()
            .unwrap()
            .render(template, "Demo App", "com.example.demo")
            .unwrap()
    }

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_render_app_build() {
        let rendered = render(DefaultTemplate::AppBuild);
        assert!(rendered.contains("id 'com.android.application'"));
        assert!(rendered.contains("namespace 'com.example.demo'"));
        assert!(rendered.contains("applicationId \"com.example.demo\""));
        assert!(rendered.contains("compileSdk 33"));
        assert!(rendered.contains("minSdk 21"));
    }

    #[test]
    fn test_render_root_build() {
        let rendered = render(DefaultTemplate::RootBuild);
        assert!(rendered.starts_with("buildscript {"));
        assert!(rendered.contains("com.android.tools.build:gradle:7.4.0"));
    }

    #[test]
    fn test_render_settings_escapes_quotes() {
        let rendered = TemplateEngine::new()
            .unwrap()
            .render(DefaultTemplate::Settings, "Bob's App", "com.x")
            .unwrap();
        assert!(rendered.contains(r"rootProject.name = 'Bob\'s App'"));
        assert!(rendered.contains("include ':app'"));
    }

    #[test]
    fn test_render_manifest() {
        let rendered = TemplateEngine::new()
            .unwrap()
            .render(DefaultTemplate::Manifest, "Fish & Chips", "com.x")
            .unwrap();
        assert!(rendered.starts_with("<?xml"));
        assert!(rendered.contains("package=\"com.x\""));
        assert!(rendered.contains("android:label=\"Fish &amp; Chips\""));
        assert_eq!(rendered.matches("android.intent.category.LAUNCHER").count(), 1);
    }

    #[test]
    fn test_strings_ignore_project_name() {
        let rendered = render(DefaultTemplate::Strings);
        assert!(rendered.contains("<string name=\"app_name\">MyApp</string>"));
        assert!(!rendered.contains("Demo App"));
        assert_eq!(rendered.matches("<string ").count(), 1);
    }

    #[test]
    fn test_styles_have_no_items() {
        let rendered = render(DefaultTemplate::Styles);
        assert!(rendered.contains("<style name=\"AppTheme\" parent=\"android:Theme.Material.Light\">"));
        assert!(!rendered.contains("<item"));
    }

    #[test]
    fn test_render_app_build_escapes_package() {
        let rendered = TemplateEngine::new()
            .unwrap()
            .render(DefaultTemplate::AppBuild, "Demo", "com.it's.$x")
            .unwrap();
        assert!(rendered.contains(r"namespace 'com.it\'s.$x'"));
        assert!(rendered.contains(r#"applicationId "com.it's.\$x""#));
    }

    #[test]
    fn test_groovy_gstring_escape_filter() {
        let value = Value::String(r#"a"b\c${d}"#.to_string());
        let result =
            TemplateEngine::groovy_gstring_escape_filter(&value, &HashMap::new()).unwrap();

        assert_eq!(result.as_str().unwrap(), r#"a\"b\\c\${d}"#);
    }

    #[test]
    fn test_xml_escape_filter() {
        let value = Value::String("<test & \"quotes\">".to_string());
        let result = TemplateEngine::xml_escape_filter(&value, &HashMap::new()).unwrap();

        assert_eq!(result.as_str().unwrap(), "&lt;test &amp; &quot;quotes&quot;&gt;");
    }
}
