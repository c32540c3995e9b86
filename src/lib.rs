//! # paste-scaffold
//!
//! Turns one block of pasted multi-file Android code into a project skeleton
//! that opens in Android Studio.
//!
//! ## Features
//!
//! - Divider-based splitting of pasted text into per-file chunks
//! - Keyword classification into source, manifest, layout, resource and
//!   Gradle files
//! - Conventional placement with package declarations rewritten to the
//!   target package
//! - Default build files, manifest and resources for whatever is missing,
//!   never replacing pasted content
//! - Atomic file writes with optional backups
//!
//! ## Quick Start
//!
//! ```no_run
//! use paste_scaffold::{Config, Pipeline, ProgressEvent};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .input(std::fs::read_to_string("pasted.txt")?)
//!     .project_name("Demo")
//!     .package_id("com.example.demo")
//!     .base_dir("./projects")
//!     .build()?;
//!
//! let report = Pipeline::new(config)?.execute(&|event: &ProgressEvent| println!("{event}"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library follows a pipeline architecture:
//! 1. **Segmenter**: Splits the text on `=====` / `-----` dividers
//! 2. **Classifier**: Assigns each chunk a [`FileKind`]
//! 3. **Placement**: Resolves paths and rewrites package declarations
//! 4. **Scaffolder**: Adds conventional directories and default files
//! 5. **Writer**: Persists the merged [`ProjectTree`]

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod classify;
mod config;
mod error;
mod pipeline;
mod placement;
mod progress;
mod scaffold;
mod segment;
mod template;
mod tree;
mod writer;

pub mod api;
pub mod layout;

pub use classify::{classify, FileKind};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use pipeline::{GenerationReport, GenerationStats, Outcome, Pipeline};
pub use placement::place;
pub use progress::{ProgressEvent, ProgressSink};
pub use segment::segment;
pub use tree::{FileOrigin, PlacedFile, ProjectTree};

/// Runs the complete generation pipeline with the given configuration.
///
/// This is the main entry point for the library. Progress events are only
/// collected into the returned report.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the built-in
/// templates fail to load. Failures during generation are reported through
/// [`GenerationReport::outcome`].
///
/// # Examples
///
/// ```no_run
/// use paste_scaffold::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .input("package a;\nclass Main {}")
///     .project_name("Demo")
///     .package_id("com.example.demo")
///     .build()?;
///
/// let report = run(config)?;
/// println!("{:?}", report.outcome);
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<GenerationReport> {
    Ok(Pipeline::new(config)?.execute(&()))
}
