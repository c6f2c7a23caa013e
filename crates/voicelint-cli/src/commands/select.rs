//! Select command implementation.

use anyhow::Result;
use std::path::{Path, PathBuf};
use voicelint_core::{contextual_tips, VoiceMetadata};

use super::{read_input, Workspace};
use crate::ReportFormat;

/// Arguments of `voicelint select`.
#[derive(clap::Args)]
pub struct Args {
    /// Text to classify (reads --file or stdin when omitted)
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Delivery channel, e.g. email, twitter, blog
    #[arg(long)]
    channel: Option<String>,

    /// Subject line or title
    #[arg(long)]
    subject: Option<String>,

    /// Intended audience
    #[arg(long)]
    audience: Option<String>,

    /// Free-form content type, e.g. article
    #[arg(long)]
    content_type: Option<String>,

    /// Pack to use if it exists
    #[arg(long)]
    prefer: Option<String>,

    /// Output format
    #[arg(long, default_value = "text")]
    format: ReportFormat,
}

/// Runs the select command.
pub fn run(args: Args, config: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(config)?;
    let text = read_input(args.text, args.file.as_deref())?;
    let metadata = VoiceMetadata {
        channel: args.channel,
        subject: args.subject,
        audience: args.audience,
        content_type: args.content_type,
        preferred_pack: args.prefer,
    };

    let selection = workspace.voices().select_voice(&text, Some(&metadata));

    if args.format == ReportFormat::Json {
        return super::output::print_json(&selection);
    }

    println!("Pack:       {}", selection.pack_name);
    println!("Context:    {}", selection.context);
    println!("Confidence: {:.1}", selection.confidence);
    println!("Reason:     {}", selection.reason);
    println!("\nTips for {} content:", selection.context);
    for tip in contextual_tips(selection.context) {
        println!("  - {tip}");
    }

    Ok(())
}
