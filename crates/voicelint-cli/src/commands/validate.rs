//! Validate command implementation.

use anyhow::Result;
use std::path::{Path, PathBuf};
use voicelint_core::{ContentType, Validator};

use super::{content_context, read_input, Workspace};
use crate::OutputFormat;

/// Arguments of `voicelint validate`.
#[derive(clap::Args)]
pub struct Args {
    /// Text to check (reads --file or stdin when omitted)
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Pack name (selected from the text's context when omitted)
    #[arg(short, long)]
    pack: Option<String>,

    /// Content type: ui-copy, marketing, docs, support, general
    #[arg(long = "type")]
    content_type: Option<ContentType>,

    /// UI component, e.g. button
    #[arg(long)]
    component: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Treat any violation as a failure
    #[arg(long)]
    strict: bool,
}

/// Runs the validate command.
pub fn run(args: Args, config: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(config)?;
    let text = read_input(args.text, args.file.as_deref())?;
    let name = workspace.pack_name(args.pack.as_deref(), Some(&text));
    let pack = workspace.load(&name)?;
    let context = content_context(args.content_type, args.component);

    let validator = Validator::new(&pack)
        .config(workspace.config.clone())
        .strict(args.strict);

    tracing::debug!("Validating with {} rules", validator.rule_count());

    let result = validator.validate(&text, context.as_ref());
    let source_name = args
        .file
        .as_ref()
        .map_or_else(|| "input".to_string(), |p| p.display().to_string());

    super::output::print_validation(&result, &text, &source_name, args.format)?;

    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}
