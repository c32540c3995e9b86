//! Conventional Android/Gradle project locations.
//!
//! Every path here is relative to the project directory
//! (`<base_dir>/<project_name>`).

use std::path::{Component, Path, PathBuf};

/// Root build script.
pub const ROOT_BUILD_FILE: &str = "build.gradle";
/// App module build script.
pub const APP_BUILD_FILE: &str = "app/build.gradle";
/// Gradle settings script.
pub const SETTINGS_FILE: &str = "settings.gradle";
/// Gradle properties.
pub const GRADLE_PROPERTIES_FILE: &str = "gradle.properties";
/// Application manifest.
pub const MANIFEST_FILE: &str = "app/src/main/AndroidManifest.xml";

/// Root of the Java source set.
pub const SOURCE_ROOT: &str = "app/src/main/java";
/// Layout resources.
pub const LAYOUT_DIR: &str = "app/src/main/res/layout";
/// Value resources (strings, colors, styles).
pub const VALUES_DIR: &str = "app/src/main/res/values";

/// Extension given to pasted source files.
pub const SOURCE_EXTENSION: &str = "java";

/// Value resource file names.
pub const STRINGS_FILE: &str = "strings.xml";
/// Colors resource file name.
pub const COLORS_FILE: &str = "colors.xml";
/// Styles resource file name.
pub const STYLES_FILE: &str = "styles.xml";

/// Directories created for every project, besides the package source directory.
pub const CONVENTIONAL_DIRS: &[&str] = &[
    LAYOUT_DIR,
    VALUES_DIR,
    "app/src/main/res/drawable",
    "app/src/main/res/mipmap-hdpi",
    "app/src/main/res/mipmap-mdpi",
    "app/src/main/res/mipmap-xhdpi",
    "app/src/main/res/mipmap-xxhdpi",
    "app/src/main/assets",
    "app/build",
    "app/libs",
    "gradle/wrapper",
];

/// Returns the source directory for a dot-separated package identifier.
///
/// Empty segments (`com..example`, trailing dots) are skipped, as is any
/// segment that is not a plain file name, so the result always stays under
/// [`SOURCE_ROOT`].
#[must_use]
pub fn source_dir(package_id: &str) -> PathBuf {
    package_id
        .split('.')
        .filter(|segment| is_plain_name(segment))
        .fold(PathBuf::from(SOURCE_ROOT), |dir, segment| dir.join(segment))
}

/// Returns true if `name` is exactly one normal path component: not empty,
/// not absolute, no separators, no `.` or `..`.
#[must_use]
pub fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

/// Returns the path of a value resource file.
#[must_use]
pub fn values_file(name: &str) -> PathBuf {
    PathBuf::from(VALUES_DIR).join(name)
}
