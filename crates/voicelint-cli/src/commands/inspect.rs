//! Inspect command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use voicelint_core::{Pack, PackSection};

use super::Workspace;

/// Arguments of `voicelint inspect`.
#[derive(clap::Args)]
pub struct Args {
    /// Pack name (configured default when omitted)
    #[arg(short, long)]
    pack: Option<String>,

    /// Section to print as JSON: manifest, voice, patterns, ctas, tokens, tests
    #[arg(short, long)]
    section: Option<PackSection>,
}

/// Runs the inspect command.
pub fn run(args: &Args, config: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(config)?;
    let name = workspace.pack_name(args.pack.as_deref(), None);
    let pack = workspace.load(&name)?;

    match args.section {
        Some(section) => {
            let json = pack
                .section_json(section)
                .with_context(|| format!("Failed to serialize section {section}"))?;
            super::output::print_json(&json)
        }
        None => {
            print_summary(&pack);
            Ok(())
        }
    }
}

fn print_summary(pack: &Pack) {
    let voice = &pack.voice;
    println!("{} v{}", pack.name(), pack.version());
    if let Some(description) = &pack.manifest.description {
        println!("{description}");
    }
    println!();

    println!("Voice: {}", voice.name);
    if let Some(summary) = &voice.tone.summary {
        println!("  tone:              {summary}");
    }
    println!("  vocabulary rules:  {}", voice.vocabulary.rules.len());
    println!("  forbidden terms:   {}", voice.vocabulary.forbidden.len());
    println!("  do-not patterns:   {}", voice.do_not.len());
    println!("  contractions:      {:?}", voice.constraints.contractions);
    println!("CTA rules: {}", pack.cta_rules.name);
    println!("  categories:        {}", pack.cta_rules.categories.len());
    println!("  anti-patterns:     {}", pack.cta_rules.anti_patterns.len());
    println!("  contextual rules:  {}", pack.cta_rules.contextual_rules.len());
    println!("Copy patterns:       {}", pack.copy_patterns.patterns.len());
    println!("Test cases:          {}", pack.tests.tests.len());
    println!(
        "Policy:              minScore {}, strict {}",
        pack.manifest.config.min_score, pack.manifest.config.strict_mode
    );

    let warnings: Vec<String> = voice
        .compiled()
        .warnings
        .iter()
        .chain(&pack.cta_rules.compiled().warnings)
        .map(ToString::to_string)
        .collect();
    if !warnings.is_empty() {
        println!("\nSkipped rules:");
        for warning in warnings {
            println!("  {warning}");
        }
    }
}
