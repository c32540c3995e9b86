use crate::{
    classify::{classify, FileKind},
    config::Config,
    error::Result,
    placement::place,
    progress::{ProgressEvent, ProgressSink},
    scaffold::Scaffolder,
    segment::segment,
    tree::ProjectTree,
    writer::Writer,
};
use serde::Serialize;
use std::{
    cell::RefCell,
    collections::BTreeMap,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};
use tracing::{debug, error, info, instrument, warn};

/// Statistics collected during one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationStats {
    /// Chunks produced by segmentation
    pub total_chunks: usize,

    /// Chunks that matched a file kind
    pub recognized_chunks: usize,

    /// Chunks dropped as unrecognized
    pub discarded_chunks: usize,

    /// Recognized chunks per kind
    pub chunks_by_kind: BTreeMap<FileKind, usize>,

    /// Distinct files planned from pasted chunks
    pub pasted_files: usize,

    /// Default files added by the scaffolder
    pub default_files: usize,

    /// Conventional directories created
    pub directories: usize,

    /// Files written to disk (0 in dry run mode)
    pub files_written: usize,

    /// Total execution time
    pub duration: Duration,

    /// Time spent segmenting, classifying and placing
    pub analyze_duration: Duration,

    /// Time spent adding structure and defaults
    pub scaffold_duration: Duration,

    /// Time spent writing
    pub write_duration: Duration,

    /// Generated project directory
    pub project_directory: String,

    /// Generation timestamp
    pub generated_at: String,
}

impl GenerationStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║            Project Generation Summary                 ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Chunks Found:         {:>8}                        ║",
            self.total_chunks
        );
        println!(
            "║   - Recognized:       {:>8}                        ║",
            self.recognized_chunks
        );
        println!(
            "║   - Discarded:        {:>8}                        ║",
            self.discarded_chunks
        );
        for (kind, count) in &self.chunks_by_kind {
            println!("║     {:<17}{:>8}                        ║", kind.label(), count);
        }
        println!("║                                                       ║");
        println!(
            "║ Pasted Files:         {:>8}                        ║",
            self.pasted_files
        );
        println!(
            "║ Default Files:        {:>8}                        ║",
            self.default_files
        );
        println!(
            "║ Directories:          {:>8}                        ║",
            self.directories
        );
        println!(
            "║ Files Written:        {:>8}                        ║",
            self.files_written
        );
        println!("║ Project Directory:                                    ║");
        println!(
            "║   {}                                              ║",
            self.project_directory
        );
        println!("║                                                       ║");
        println!("║ Timing Breakdown:                                     ║");
        println!(
            "║   - Analyzing:        {:>8.2}s                     ║",
            self.analyze_duration.as_secs_f64()
        );
        println!(
            "║   - Scaffolding:      {:>8.2}s                     ║",
            self.scaffold_duration.as_secs_f64()
        );
        println!(
            "║   - Writing:          {:>8.2}s                     ║",
            self.write_duration.as_secs_f64()
        );
        println!(
            "║   - Total:            {:>8.2}s                     ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }
}

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Outcome {
    /// The project was generated
    Success {
        /// Generated project directory
        project_dir: PathBuf,
    },
    /// The run stopped on an error; files written before it stay on disk
    Failure {
        /// Description of the error
        message: String,
    },
}

/// Everything a caller needs after a run: the outcome, the ordered progress
/// log and, on success, statistics.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Terminal outcome
    pub outcome: Outcome,

    /// Progress events in emission order, ending with a terminal event
    pub events: Vec<ProgressEvent>,

    /// Run statistics (success only)
    pub stats: Option<GenerationStats>,
}

impl GenerationReport {
    /// Returns true if the project was generated.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Records every event and forwards it to the caller's sink.
struct Recorder<'a> {
    sink: &'a dyn ProgressSink,
    events: RefCell<Vec<ProgressEvent>>,
}

impl<'a> Recorder<'a> {
    fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            events: RefCell::new(Vec::new()),
        }
    }

    fn into_events(self) -> Vec<ProgressEvent> {
        self.events.into_inner()
    }
}

impl ProgressSink for Recorder<'_> {
    fn report(&self, event: &ProgressEvent) {
        info!("{event}");
        self.events.borrow_mut().push(event.clone());
        self.sink.report(event);
    }
}

/// Main pipeline orchestrator: segment, classify, place, scaffold, write.
pub struct Pipeline {
    config: Config,
    scaffolder: Scaffolder,
    writer: Writer,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - Built-in templates fail to load
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let scaffolder = Scaffolder::new(&config.project_name, &config.package_id)?;
        let writer = Writer::new(config.project_dir(), config.backup_existing);

        Ok(Self {
            config,
            scaffolder,
            writer,
        })
    }

    /// Runs the pipeline and converts any failure into a terminal outcome.
    ///
    /// Never returns an error: failures become [`Outcome::Failure`] and a
    /// final [`ProgressEvent::Failed`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use paste_scaffold::{Config, Pipeline, ProgressEvent};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .input(std::fs::read_to_string("pasted.txt")?)
    ///     .project_name("Demo")
    ///     .package_id("com.example.demo")
    ///     .build()?;
    ///
    /// let report = Pipeline::new(config)?.execute(&|event: &ProgressEvent| println!("{event}"));
    /// assert!(report.is_success());
    /// # Ok(())
    /// # }
    /// ```
    pub fn execute(self, sink: &dyn ProgressSink) -> GenerationReport {
        let recorder = Recorder::new(sink);
        let project_dir = self.config.project_dir();

        let (outcome, stats) = match self.run(&recorder) {
            Ok(stats) => {
                recorder.report(&ProgressEvent::Completed {
                    project_dir: project_dir.clone(),
                });
                (Outcome::Success { project_dir }, Some(stats))
            }
            Err(e) => {
                error!("Project generation failed: {e}");
                let message = e.to_string();
                recorder.report(&ProgressEvent::Failed {
                    message: message.clone(),
                });
                (Outcome::Failure { message }, None)
            }
        };

        GenerationReport {
            outcome,
            events: recorder.into_events(),
            stats,
        }
    }

    /// Runs [`Pipeline::execute`] on a new thread.
    #[must_use]
    pub fn spawn<S>(self, sink: S) -> thread::JoinHandle<GenerationReport>
    where
        S: ProgressSink + Send + 'static,
    {
        thread::spawn(move || self.execute(&sink))
    }

    /// Runs the pipeline on tokio's blocking pool, streaming progress events
    /// through an unbounded channel.
    ///
    /// Must be called from within a tokio runtime.
    #[cfg(feature = "async")]
    #[must_use]
    pub fn spawn_async(
        self,
    ) -> (
        tokio::sync::mpsc::UnboundedReceiver<ProgressEvent>,
        tokio::task::JoinHandle<GenerationReport>,
    ) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = tokio::task::spawn_blocking(move || self.execute(&tx));
        (rx, handle)
    }

    /// Plans the project without touching the filesystem.
    ///
    /// Returns the merged tree of pasted and default files.
    ///
    /// # Errors
    ///
    /// Returns an error if a default template fails to render.
    pub fn plan(&self) -> Result<ProjectTree> {
        let mut tree = ProjectTree::new();
        self.analyze(&mut tree);
        self.scaffolder.add_structure(&mut tree);
        self.scaffolder.add_build_files(&mut tree)?;
        self.scaffolder.add_manifest(&mut tree)?;
        self.scaffolder.add_resources(&mut tree)?;
        Ok(tree)
    }

    /// Executes the complete pipeline and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Structure**: registers the conventional directories
    /// 2. **Analyze**: segments the input, classifies and places each chunk
    /// 3. **Defaults**: fills missing build files, manifest and resources
    /// 4. **Write**: persists the tree (skipped in dry run mode)
    ///
    /// # Errors
    ///
    /// Returns the first error; nothing after it is attempted.
    #[instrument(skip(self, progress), fields(project = %self.config.project_name))]
    pub fn run(&self, progress: &dyn ProgressSink) -> Result<GenerationStats> {
        let start_time = Instant::now();
        let mut tree = ProjectTree::new();

        progress.report(&ProgressEvent::CreatingStructure);
        self.scaffolder.add_structure(&mut tree);

        progress.report(&ProgressEvent::AnalyzingCode);
        let analyze_start = Instant::now();
        let analysis = self.analyze(&mut tree);
        let analyze_duration = analyze_start.elapsed();
        let pasted_files = tree.file_count();

        info!(
            "✓ Placed {} files from {} chunks ({} discarded)",
            pasted_files, analysis.total, analysis.discarded
        );

        let scaffold_start = Instant::now();
        progress.report(&ProgressEvent::CreatingBuildFiles);
        let mut default_files = self.scaffolder.add_build_files(&mut tree)?;

        progress.report(&ProgressEvent::CreatingManifest);
        default_files += self.scaffolder.add_manifest(&mut tree)?;

        progress.report(&ProgressEvent::CreatingResources);
        default_files += self.scaffolder.add_resources(&mut tree)?;
        let scaffold_duration = scaffold_start.elapsed();

        let write_start = Instant::now();
        let files_written = if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file writes");
            self.log_plan(&tree);
            0
        } else {
            progress.report(&ProgressEvent::WritingFiles);
            self.writer.write_tree(&tree)?
        };
        let write_duration = write_start.elapsed();

        let duration = start_time.elapsed();
        info!(
            "✓ Pipeline completed successfully in {:.2}s",
            duration.as_secs_f64()
        );

        Ok(GenerationStats {
            total_chunks: analysis.total,
            recognized_chunks: analysis.total - analysis.discarded,
            discarded_chunks: analysis.discarded,
            chunks_by_kind: analysis.by_kind,
            pasted_files,
            default_files,
            directories: tree.directory_count(),
            files_written,
            duration,
            analyze_duration,
            scaffold_duration,
            write_duration,
            project_directory: self.config.project_dir().display().to_string(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Segments the input and places every recognized chunk in the tree.
    fn analyze(&self, tree: &mut ProjectTree) -> Analysis {
        let mut analysis = Analysis::default();

        for (index, chunk) in segment(&self.config.input).into_iter().enumerate() {
            analysis.total += 1;
            let kind = classify(chunk);

            match place(chunk, kind, &self.config.package_id) {
                Some(file) => {
                    *analysis.by_kind.entry(kind).or_default() += 1;
                    tree.insert_pasted(file);
                }
                None => {
                    analysis.discarded += 1;
                    debug!("Chunk {} matched no file kind, skipping", index + 1);
                }
            }
        }

        analysis
    }

    fn log_plan(&self, tree: &ProjectTree) {
        let project_dir = self.config.project_dir();
        for file in tree.files() {
            let origin = if file.is_default() { "default" } else { "pasted" };
            info!(
                "  would write {} ({origin})",
                project_dir.join(&file.relative_path).display()
            );
        }
    }
}

#[derive(Debug, Default)]
struct Analysis {
    total: usize,
    discarded: usize,
    by_kind: BTreeMap<FileKind, usize>,
}
