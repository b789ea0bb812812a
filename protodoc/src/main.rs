//! protodoc: regenerate the configuration reference from `.proto` comments.
//!
//! Every `message XOptions { ... }` found below the root becomes a section of
//! the output document, with one entry per `optional` field:
//!
//! ```text
//! protodoc -r cartographer -o docs/source/configuration.rst
//! ```
//!
//! The destination must already exist. It is only rewritten once every input
//! file parsed cleanly; any failure leaves it untouched.

mod aggregate;
mod discover;
mod error;
mod logging;
mod model;
mod parser;
mod render;

use aggregate::Aggregation;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "protodoc",
    about = "Generate the configuration reference from comments in .proto option messages"
)]
struct Cli {
    /// Directory searched recursively for .proto files
    #[arg(short = 'r', long, default_value = "cartographer")]
    root: PathBuf,

    /// Document to regenerate (must already exist)
    #[arg(short = 'o', long, default_value = "docs/source/configuration.rst")]
    output: PathBuf,

    /// File whose contents replace the built-in preamble
    #[arg(short = 'p', long)]
    prefix: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init()?;
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    discover::require_file(&cli.output).context("invalid output document")?;
    discover::require_dir(&cli.root).context("invalid source root")?;

    let preamble = resolve_prefix(cli.prefix.as_deref())?;
    let aggregation = collect(&cli.root)?;

    if aggregation.is_empty() {
        warn!(root = %cli.root.display(), "no option messages found");
    }

    let document = render::assemble(&preamble, aggregation.blocks());
    fs::write(&cli.output, &document)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    info!(
        output = %cli.output.display(),
        groups = aggregation.len(),
        fields = aggregation.field_count(),
        undocumented = aggregation.undocumented_count(),
        "wrote configuration reference"
    );
    Ok(())
}

/// Parse every definition file below `root` into one aggregation.
fn collect(root: &Path) -> Result<Aggregation> {
    let mut aggregation = Aggregation::new();

    for path in discover::find_definitions(root)? {
        info!(path = %path.display(), "found definition file");
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = parser::parse_file(&path, &content)?;
        aggregation.insert(&path, parsed)?;
    }

    Ok(aggregation)
}

/// Load the preamble from `--prefix`, or fall back to the built-in one.
fn resolve_prefix(prefix: Option<&Path>) -> Result<String> {
    match prefix {
        Some(path) => {
            discover::require_file(path).context("invalid prefix file")?;
            fs::read_to_string(path)
                .with_context(|| format!("failed to read prefix file: {}", path.display()))
        }
        None => Ok(render::PREAMBLE.to_string()),
    }
}
