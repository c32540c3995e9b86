use anyhow::{bail, Context};
use clap::Parser;
use paste_scaffold::{Config, Outcome, Pipeline, ProgressEvent};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "paste-scaffold",
    version,
    author,
    about = "Split pasted Android code into a project skeleton",
    long_about = "Split a block of pasted multi-file Android code into a project skeleton.\n\n\
    Files in the pasted text are separated by lines of ===== or -----. Each part is \
    recognised by its content (Java source, AndroidManifest.xml, layouts, value \
    resources, Gradle scripts) and written to its conventional location. Build files, \
    manifest and resources that were not pasted are filled in with defaults.\n\n\
    USAGE EXAMPLES:\n  \
      # Read pasted code from a file\n  \
      paste-scaffold --input pasted.txt --name MyApp --package com.example.myapp\n\n  \
      # Read from stdin into a projects directory\n  \
      pbpaste | paste-scaffold --name MyApp --package com.example.myapp --base-dir ~/projects\n\n  \
      # Show what would be written\n  \
      paste-scaffold -i pasted.txt -n MyApp -p com.example.myapp --dry-run -v"
)]
struct Cli {
    /// File containing the pasted code; reads stdin when omitted or "-"
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Project name, also used as the project directory name
    #[arg(short, long, env = "PASTE_SCAFFOLD_NAME")]
    name: String,

    /// Package identifier, e.g. com.example.myapp
    #[arg(short, long, env = "PASTE_SCAFFOLD_PACKAGE")]
    package: String,

    /// Directory the project directory is created in
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    base_dir: PathBuf,

    /// Dry run (don't write files)
    #[arg(long)]
    dry_run: bool,

    /// Back up files that already exist before replacing them
    #[arg(long)]
    backup: bool,

    /// Print the full generation report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let input = read_input(cli.input.as_ref())?;

    let config = Config::builder()
        .input(input)
        .project_name(cli.name)
        .package_id(cli.package)
        .base_dir(cli.base_dir)
        .dry_run(cli.dry_run)
        .backup_existing(cli.backup)
        .build()
        .context("Failed to build configuration")?;

    let pipeline = Pipeline::new(config).context("Failed to create pipeline")?;

    let report = if cli.json {
        pipeline.execute(&())
    } else {
        pipeline.execute(&|event: &ProgressEvent| println!("{event}"))
    };

    if cli.json {
        println!("{}", report.to_json().context("Failed to encode report")?);
    } else if let Some(stats) = &report.stats {
        stats.print_summary();
    }

    match report.outcome {
        Outcome::Success { .. } => Ok(()),
        Outcome::Failure { message } => bail!("Project generation failed: {message}"),
    }
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("paste_scaffold=warn"),
        1 => EnvFilter::new("paste_scaffold=info"),
        2 => EnvFilter::new("paste_scaffold=debug"),
        _ => EnvFilter::new("paste_scaffold=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false).with_writer(std::io::stderr))
        .init();
}
