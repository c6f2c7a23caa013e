//! Packs command implementation.

use anyhow::Result;
use std::path::Path;
use voicelint_core::pack::loader::load_manifest;

use super::Workspace;

/// Runs the packs command.
pub fn run(config: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(config)?;
    let names = workspace.store.list_available_packs();

    println!("Packs in {}:\n", workspace.store.root().display());
    println!("{:<16} {:<10} Description", "Name", "Version");
    println!("{}", "-".repeat(72));

    for name in &names {
        match load_manifest(&workspace.store.root().join(name)) {
            Ok(manifest) => println!(
                "{:<16} {:<10} {}",
                name,
                manifest.version,
                manifest.description.as_deref().unwrap_or("")
            ),
            Err(e) => println!("{name:<16} {:<10} ({e})", "?"),
        }
    }
    if names.is_empty() {
        println!("(none)");
    }

    println!("\nContext routing:");
    for mapping in workspace.voices().list_context_mappings() {
        let origin = if mapping.is_default { "default" } else { "mapped" };
        println!(
            "  {:<10} -> {:<16} [{origin}] {}",
            mapping.context.as_str(),
            mapping.pack_name,
            mapping.description.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
