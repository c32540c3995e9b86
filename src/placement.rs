//! Destination paths and content rewrites for classified chunks.

use crate::{
    classify::FileKind,
    layout,
    tree::PlacedFile,
};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::path::PathBuf;
use tracing::debug;

/// Class name used when a source chunk declares none the pattern can find.
pub(crate) const FALLBACK_CLASS_NAME: &str = "MainActivity";

/// Layout file name used when a layout chunk carries no name comment.
pub(crate) const FALLBACK_LAYOUT_NAME: &str = "activity_main.xml";

static CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class\s+(\w+)").expect("valid class pattern"));

static PACKAGE_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"package\s+[^;]+;").expect("valid package pattern"));

static LAYOUT_NAME_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--\s*([\w_]+\.xml)").expect("valid layout name pattern"));

/// Resolves the destination of a classified chunk and adjusts its content.
///
/// Returns `None` for [`FileKind::Unrecognized`].
///
/// # Examples
///
/// ```
/// use paste_scaffold::{place, FileKind};
/// use std::path::Path;
///
/// let chunk = "package com.other;\npublic class Foo {}";
/// let file = place(chunk, FileKind::SourceCode, "com.x").unwrap();
///
/// assert_eq!(file.relative_path, Path::new("app/src/main/java/com/x/Foo.java"));
/// assert!(file.content.starts_with("package com.x;"));
/// ```
#[must_use]
pub fn place(chunk: &str, kind: FileKind, package_id: &str) -> Option<PlacedFile> {
    let placed = match kind {
        FileKind::SourceCode => place_source(chunk, package_id),
        FileKind::ManifestDescriptor => {
            PlacedFile::pasted(layout::MANIFEST_FILE, chunk.to_string(), kind)
        }
        FileKind::LayoutDescriptor => PlacedFile::pasted(
            PathBuf::from(layout::LAYOUT_DIR).join(layout_file_name(chunk)),
            chunk.to_string(),
            kind,
        ),
        FileKind::ResourceDescriptor => PlacedFile::pasted(
            layout::values_file(resource_file_name(chunk)),
            chunk.to_string(),
            kind,
        ),
        FileKind::BuildDescriptor => {
            PlacedFile::pasted(build_file_path(chunk), chunk.to_string(), kind)
        }
        FileKind::Unrecognized => return None,
    };

    debug!("Placed {} chunk at {}", kind, placed.relative_path.display());
    Some(placed)
}

fn place_source(chunk: &str, package_id: &str) -> PlacedFile {
    let class_name = class_name(chunk);
    let file_name = format!("{class_name}.{}", layout::SOURCE_EXTENSION);
    let content = rewrite_package(chunk, package_id);

    PlacedFile::pasted(
        layout::source_dir(package_id).join(file_name),
        content,
        FileKind::SourceCode,
    )
}

/// Returns the first declared class name, or [`FALLBACK_CLASS_NAME`].
#[must_use]
pub(crate) fn class_name(chunk: &str) -> &str {
    CLASS_NAME
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map_or(FALLBACK_CLASS_NAME, |m| m.as_str())
}

/// Rewrites every package declaration to declare `package_id`.
#[must_use]
pub(crate) fn rewrite_package(chunk: &str, package_id: &str) -> String {
    let declaration = format!("package {package_id};");
    PACKAGE_DECLARATION
        .replace_all(chunk, NoExpand(&declaration))
        .into_owned()
}

/// Returns the layout file name named in a leading `<!-- name.xml` comment,
/// or [`FALLBACK_LAYOUT_NAME`].
#[must_use]
pub(crate) fn layout_file_name(chunk: &str) -> &str {
    if !(chunk.contains("<!-- ") && chunk.contains(".xml")) {
        return FALLBACK_LAYOUT_NAME;
    }

    LAYOUT_NAME_COMMENT
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map_or(FALLBACK_LAYOUT_NAME, |m| m.as_str())
}

/// Picks the value resource file: strings, then colors, then styles.
#[must_use]
pub(crate) fn resource_file_name(chunk: &str) -> &'static str {
    if chunk.contains("<string") {
        layout::STRINGS_FILE
    } else if chunk.contains("<color") {
        layout::COLORS_FILE
    } else {
        layout::STYLES_FILE
    }
}

/// Root build script when the chunk has a `buildscript` block, app module
/// script otherwise.
#[must_use]
pub(crate) fn build_file_path(chunk: &str) -> &'static str {
    if chunk.contains("buildscript") {
        layout::ROOT_BUILD_FILE
    } else {
        layout::APP_BUILD_FILE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::FileOrigin;
    use std::path::Path;

    #[test]
    fn test_source_is_placed_under_target_package() {
        let chunk = "package com.x;\n\npublic class Foo extends Activity {\n}";
        let file = place(chunk, FileKind::SourceCode, "com.x").unwrap();

        assert_eq!(
            file.relative_path,
            Path::new("app/src/main/java/com/x/Foo.java")
        );
        assert_eq!(file.origin, FileOrigin::Pasted(FileKind::SourceCode));
    }

    #[test]
    fn test_source_package_is_rewritten() {
        let chunk = "package com.old.place;\n\nclass Foo {}";
        let file = place(chunk, FileKind::SourceCode, "org.new.app").unwrap();

        assert_eq!(file.content, "package org.new.app;\n\nclass Foo {}");
        assert_eq!(
            file.relative_path,
            Path::new("app/src/main/java/org/new/app/Foo.java")
        );
    }

    #[test]
    fn test_rewrite_is_literal() {
        let rewritten = rewrite_package("package a.b;", "com.$1.x");
        assert_eq!(rewritten, "package com.$1.x;");
    }

    #[test]
    fn test_class_name_fallback() {
        assert_eq!(class_name("package a; interface Thing {}"), FALLBACK_CLASS_NAME);
        assert_eq!(class_name("public final class  Widget<T> {}"), "Widget");
    }

    #[test]
    fn test_first_class_wins() {
        let chunk = "package a;\nclass Outer {\n  static class Inner {}\n}";
        assert_eq!(class_name(chunk), "Outer");
    }

    #[test]
    fn test_manifest_is_verbatim() {
        let chunk = "<?xml version=\"1.0\"?>\n<manifest package=\"zzz\"/>";
        let file = place(chunk, FileKind::ManifestDescriptor, "com.x").unwrap();

        assert_eq!(file.relative_path, Path::new(layout::MANIFEST_FILE));
        assert_eq!(file.content, chunk);
    }

    #[test]
    fn test_layout_name_from_comment() {
        let chunk = "<!-- activity_detail.xml -->\n<?xml version=\"1.0\"?>\n<LinearLayout/>";
        let file = place(chunk, FileKind::LayoutDescriptor, "com.x").unwrap();

        assert_eq!(
            file.relative_path,
            Path::new("app/src/main/res/layout/activity_detail.xml")
        );
    }

    #[test]
    fn test_layout_name_needs_comment_with_space() {
        assert_eq!(layout_file_name("<!--row.xml-->"), FALLBACK_LAYOUT_NAME);
        assert_eq!(layout_file_name("<!-- row.xml -->"), "row.xml");
        assert_eq!(layout_file_name("<RelativeLayout/>"), FALLBACK_LAYOUT_NAME);
    }

    #[test]
    fn test_resource_file_priority() {
        assert_eq!(
            resource_file_name("<resources>\n<string name=\"a\">A</string>\n<color name=\"c\"/>"),
            "strings.xml"
        );
        assert_eq!(resource_file_name("<resources><color name=\"c\"/>"), "colors.xml");
        assert_eq!(resource_file_name("<resources><style name=\"s\"/>"), "styles.xml");
        assert_eq!(resource_file_name("<resources><dimen/>"), "styles.xml");
    }

    #[test]
    fn test_build_file_selection() {
        assert_eq!(build_file_path("buildscript {\n}\nplugins {}"), "build.gradle");
        assert_eq!(build_file_path("plugins {\n}\nandroid {}"), "app/build.gradle");
    }

    #[test]
    fn test_unrecognized_is_not_placed() {
        assert!(place("notes", FileKind::Unrecognized, "com.x").is_none());
    }
}
