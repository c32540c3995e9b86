use serde::Serialize;
use std::{fmt, path::PathBuf};

/// A milestone reported while a project is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum ProgressEvent {
    /// Conventional directories are being laid out
    CreatingStructure,
    /// Pasted chunks are being classified and placed
    AnalyzingCode,
    /// Default Gradle files are being added
    CreatingBuildFiles,
    /// The default manifest is being added
    CreatingManifest,
    /// Default value resources are being added
    CreatingResources,
    /// The planned tree is being written to disk
    WritingFiles,
    /// Terminal success
    Completed {
        /// Generated project directory
        project_dir: PathBuf,
    },
    /// Terminal failure
    Failed {
        /// Description of the error that stopped the run
        message: String,
    },
}

impl ProgressEvent {
    /// Returns true for [`ProgressEvent::Completed`] and [`ProgressEvent::Failed`].
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::Failed { .. })
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatingStructure => f.write_str("Creating project structure..."),
            Self::AnalyzingCode => f.write_str("Analyzing code..."),
            Self::CreatingBuildFiles => f.write_str("Creating Gradle files..."),
            Self::CreatingManifest => f.write_str("Creating AndroidManifest.xml..."),
            Self::CreatingResources => f.write_str("Creating default resources..."),
            Self::WritingFiles => f.write_str("Writing project files..."),
            Self::Completed { project_dir } => {
                write!(f, "Project created successfully at {}", project_dir.display())
            }
            Self::Failed { message } => write!(f, "Error: {message}"),
        }
    }
}

/// Receives progress events in the order they occur.
///
/// Delivery is fire-and-forget: a sink must not block the pipeline and has
/// no way to report failure back to it.
pub trait ProgressSink {
    /// Handles one event.
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent),
{
    fn report(&self, event: &ProgressEvent) {
        self(event);
    }
}

/// Discards every event.
impl ProgressSink for () {
    fn report(&self, _event: &ProgressEvent) {}
}

#[cfg(feature = "async")]
impl ProgressSink for tokio::sync::mpsc::UnboundedSender<ProgressEvent> {
    fn report(&self, event: &ProgressEvent) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_messages() {
        assert_eq!(
            ProgressEvent::CreatingStructure.to_string(),
            "Creating project structure..."
        );
        assert_eq!(
            ProgressEvent::Failed {
                message: "disk full".to_string()
            }
            .to_string(),
            "Error: disk full"
        );
        assert!(ProgressEvent::Completed {
            project_dir: PathBuf::from("/out/Demo")
        }
        .to_string()
        .contains("/out/Demo"));
    }

    #[test]
    fn test_terminal_events() {
        assert!(!ProgressEvent::AnalyzingCode.is_terminal());
        assert!(ProgressEvent::Failed {
            message: String::new()
        }
        .is_terminal());
    }

    #[test]
    fn test_closure_sink_keeps_order() {
        let seen = RefCell::new(Vec::new());
        let sink = |event: &ProgressEvent| seen.borrow_mut().push(event.clone());

        sink.report(&ProgressEvent::CreatingStructure);
        sink.report(&ProgressEvent::AnalyzingCode);

        assert_eq!(
            *seen.borrow(),
            vec![ProgressEvent::CreatingStructure, ProgressEvent::AnalyzingCode]
        );
    }

    #[test]
    fn test_serializes_with_tag() {
        let json = serde_json::to_value(ProgressEvent::Failed {
            message: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json["event"], "failed");
        assert_eq!(json["message"], "boom");
    }
}
