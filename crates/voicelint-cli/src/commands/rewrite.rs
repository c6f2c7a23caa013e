//! Rewrite command implementation.

use anyhow::Result;
use std::path::{Path, PathBuf};
use voicelint_core::{format_changes, generate_diff, ContentType, RewriteMode, Rewriter, Validator};

use super::{content_context, read_input, Workspace};
use crate::ReportFormat;

/// Arguments of `voicelint rewrite`.
#[derive(clap::Args)]
pub struct Args {
    /// Text to rewrite (reads --file or stdin when omitted)
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Pack name (selected from the text's context when omitted)
    #[arg(short, long)]
    pack: Option<String>,

    /// Which severities to fix: minimal, normal, aggressive
    #[arg(short, long)]
    mode: Option<RewriteMode>,

    /// Content type: ui-copy, marketing, docs, support, general
    #[arg(long = "type")]
    content_type: Option<ContentType>,

    /// UI component, e.g. button
    #[arg(long)]
    component: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: ReportFormat,

    /// Show a line diff instead of the rewritten text
    #[arg(long)]
    diff: bool,

    /// Only list the applied changes
    #[arg(long, conflicts_with = "diff")]
    changes_only: bool,
}

/// Runs the rewrite command.
pub fn run(args: Args, config: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(config)?;
    let text = read_input(args.text, args.file.as_deref())?;
    let name = workspace.pack_name(args.pack.as_deref(), Some(&text));
    let pack = workspace.load(&name)?;
    let context = content_context(args.content_type, args.component);
    let mode = args.mode.unwrap_or(workspace.config.rewrite.mode);

    tracing::debug!("Rewriting in {mode} mode with pack {name}");

    let validator = Validator::new(&pack).config(workspace.config.clone());
    let result = Rewriter::with_validator(validator)
        .mode(mode)
        .rewrite(&text, context.as_ref());

    if args.format == ReportFormat::Json {
        return super::output::print_json(&result);
    }

    if args.changes_only {
        print!("{}", format_changes(&result));
    } else if args.diff {
        print!("{}", generate_diff(&result));
        eprint!("{}", format_changes(&result));
    } else {
        println!("{}", result.rewritten);
        eprint!("{}", format_changes(&result));
    }

    Ok(())
}
