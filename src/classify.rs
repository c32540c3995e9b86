//! Content-pattern classification of pasted chunks.
//!
//! Classification is keyword based, not a parser: each rule looks for a few
//! discriminating substrings and the first matching rule decides the kind.

use serde::Serialize;
use std::fmt;

/// Kind of project file a chunk represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Java source with a package and a class declaration
    SourceCode,
    /// `AndroidManifest.xml`
    ManifestDescriptor,
    /// Layout resource under `res/layout`
    LayoutDescriptor,
    /// Value resource under `res/values`
    ResourceDescriptor,
    /// Gradle build script
    BuildDescriptor,
    /// Anything else; such chunks are dropped
    Unrecognized,
}

impl FileKind {
    /// Returns a short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SourceCode => "source",
            Self::ManifestDescriptor => "manifest",
            Self::LayoutDescriptor => "layout",
            Self::ResourceDescriptor => "resource",
            Self::BuildDescriptor => "build",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Returns true unless the kind is [`FileKind::Unrecognized`].
    #[must_use]
    pub const fn is_recognized(self) -> bool {
        !matches!(self, Self::Unrecognized)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const XML_PROLOG: &str = "<?xml";

type Rule = (FileKind, fn(&str) -> bool);

/// Rules in priority order.
const RULES: &[Rule] = &[
    (FileKind::SourceCode, is_source),
    (FileKind::ManifestDescriptor, is_manifest),
    (FileKind::LayoutDescriptor, is_layout),
    (FileKind::ResourceDescriptor, is_resource),
    (FileKind::BuildDescriptor, is_build),
];

fn is_source(chunk: &str) -> bool {
    chunk.contains("package ") && chunk.contains("class ")
}

fn is_manifest(chunk: &str) -> bool {
    chunk.contains(XML_PROLOG) && chunk.contains("<manifest")
}

// The prolog is only required alongside LinearLayout; the other two
// containers match on their own.
fn is_layout(chunk: &str) -> bool {
    (chunk.contains(XML_PROLOG) && chunk.contains("<LinearLayout"))
        || chunk.contains("<RelativeLayout")
        || chunk.contains("<ConstraintLayout")
}

fn is_resource(chunk: &str) -> bool {
    chunk.contains(XML_PROLOG) && chunk.contains("<resources>")
}

fn is_build(chunk: &str) -> bool {
    chunk.contains("plugins {") || chunk.contains("android {")
}

/// Classifies a chunk by the first matching content rule.
///
/// # Examples
///
/// ```
/// use paste_scaffold::{classify, FileKind};
///
/// let kind = classify("package com.x;\npublic class Foo {}");
/// assert_eq!(kind, FileKind::SourceCode);
/// assert_eq!(classify("just some notes"), FileKind::Unrecognized);
/// ```
#[must_use]
pub fn classify(chunk: &str) -> FileKind {
    RULES
        .iter()
        .find(|(_, matches)| matches(chunk))
        .map_or(FileKind::Unrecognized, |(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_requires_package_and_class() {
        assert_eq!(
            classify("package com.x;\n\npublic class Foo {\n}"),
            FileKind::SourceCode
        );
        assert_eq!(classify("public class Foo {}"), FileKind::Unrecognized);
        assert_eq!(classify("package com.x;"), FileKind::Unrecognized);
    }

    #[test]
    fn test_manifest() {
        let chunk = "<?xml version=\"1.0\"?>\n<manifest package=\"a.b\"></manifest>";
        assert_eq!(classify(chunk), FileKind::ManifestDescriptor);
    }

    #[test]
    fn test_manifest_without_prolog_is_unrecognized() {
        assert_eq!(classify("<manifest></manifest>"), FileKind::Unrecognized);
    }

    #[test]
    fn test_linear_layout_requires_prolog() {
        assert_eq!(
            classify("<?xml version=\"1.0\"?>\n<LinearLayout/>"),
            FileKind::LayoutDescriptor
        );
        assert_eq!(classify("<LinearLayout/>"), FileKind::Unrecognized);
    }

    #[test]
    fn test_other_layouts_match_without_prolog() {
        assert_eq!(classify("<RelativeLayout/>"), FileKind::LayoutDescriptor);
        assert_eq!(classify("<ConstraintLayout/>"), FileKind::LayoutDescriptor);
    }

    #[test]
    fn test_layout_wins_over_resources() {
        let chunk = "<?xml version=\"1.0\"?>\n<resources>\n<RelativeLayout/>\n</resources>";
        assert_eq!(classify(chunk), FileKind::LayoutDescriptor);
    }

    #[test]
    fn test_resources() {
        let chunk = "<?xml version=\"1.0\"?>\n<resources>\n<color name=\"a\">#fff</color>\n</resources>";
        assert_eq!(classify(chunk), FileKind::ResourceDescriptor);
    }

    #[test]
    fn test_resources_with_attributes_are_not_matched() {
        let chunk = "<?xml version=\"1.0\"?>\n<resources xmlns:tools=\"t\">\n</resources>";
        assert_eq!(classify(chunk), FileKind::Unrecognized);
    }

    #[test]
    fn test_build_scripts() {
        assert_eq!(
            classify("plugins {\n    id 'com.android.application'\n}"),
            FileKind::BuildDescriptor
        );
        assert_eq!(classify("android {\n compileSdk 33\n}"), FileKind::BuildDescriptor);
    }

    #[test]
    fn test_source_wins_over_everything() {
        let chunk = "package a;\nclass B {\n String xml = \"<?xml <manifest\";\n}";
        assert_eq!(classify(chunk), FileKind::SourceCode);
    }

    #[test]
    fn test_manifest_wins_over_layout() {
        let chunk = "<?xml version=\"1.0\"?>\n<manifest>\n<!-- <RelativeLayout -->\n</manifest>";
        assert_eq!(classify(chunk), FileKind::ManifestDescriptor);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FileKind::SourceCode.to_string(), "source");
        assert!(FileKind::BuildDescriptor.is_recognized());
        assert!(!FileKind::Unrecognized.is_recognized());
    }
}
