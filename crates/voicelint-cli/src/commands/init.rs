//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# voicelint configuration

[packs]
# Directory holding one subdirectory per pack
root = "packs"
# Pack used when nothing else selects one
# default = "saas"

[cache]
# Seconds a loaded pack stays cached
ttl_secs = 60
# Maximum number of cached packs
capacity = 20

[voices]
# Pack for contexts without an explicit mapping
# default_pack = "saas"
# fallback_pack = "saas"

# Route a content context to its own pack.
# Contexts: email, blog, social, marketing, support, legal, internal, product, sales
# [[voices.contexts]]
# context = "legal"
# pack = "legal"
# description = "Contracts and policy pages"

[rewrite]
# minimal | normal | aggressive
mode = "normal"

# Rule overrides, keyed by rule name or emitted id
# [rules."constraints.contractions"]
# enabled = false
#
# [rules."vocabulary.preferred"]
# severity = "warning"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("voicelint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created voicelint.toml");
    println!("\nNext steps:");
    println!("  1. Point [packs] root at your packs directory");
    println!("  2. Run: voicelint validate \"Your copy here\"");

    Ok(())
}
