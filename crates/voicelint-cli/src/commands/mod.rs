//! Subcommand implementations.

pub mod init;
pub mod inspect;
pub mod output;
pub mod packs;
pub mod rewrite;
pub mod rules;
pub mod select;
pub mod validate;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use voicelint_core::{
    Config, ContentContext, ContentType, LoadOptions, Pack, PackStore, VoiceContextManager,
};

use crate::config_resolver;

/// Configuration and pack store shared by the subcommands.
pub struct Workspace {
    /// Resolved configuration.
    pub config: Config,
    /// Packs under `[packs] root`.
    pub store: PackStore,
}

impl Workspace {
    /// Resolves the configuration relative to the current directory.
    pub fn open(explicit_config: Option<&Path>) -> Result<Self> {
        let resolved = config_resolver::load(Path::new("."), explicit_config)?;
        tracing::debug!("Config source: {:?}", resolved.source);
        let config = resolved.config;
        let store = PackStore::with_settings(config.packs.root.clone(), config.cache_settings());
        tracing::debug!("Packs root: {}", store.root().display());
        Ok(Self { config, store })
    }

    /// Voice routing over the available packs.
    pub fn voices(&self) -> VoiceContextManager<&PackStore> {
        VoiceContextManager::new(self.config.multi_voice(), &self.store)
    }

    /// Picks a pack name: the explicit one, else the pack selected for
    /// `text`, else the configured default.
    pub fn pack_name(&self, explicit: Option<&str>, text: Option<&str>) -> String {
        if let Some(name) = explicit {
            return name.to_string();
        }
        match text {
            Some(text) => {
                let selection = self.voices().select_voice(text, None);
                tracing::info!(
                    "Selected pack {} for {} content ({})",
                    selection.pack_name,
                    selection.context,
                    selection.reason
                );
                selection.pack_name
            }
            None => self.config.multi_voice().default_pack,
        }
    }

    /// Loads a pack by name, logging component warnings.
    pub fn load(&self, name: &str) -> Result<Arc<Pack>> {
        let loaded = self
            .store
            .load_named(name, LoadOptions::default())
            .with_context(|| {
                format!(
                    "Failed to load pack `{name}` from {}",
                    self.store.root().display()
                )
            })?;
        for warning in &loaded.errors {
            tracing::warn!("{warning}");
        }
        Ok(loaded.pack)
    }
}

/// Reads the input text from the argument, a file, or stdin.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}

/// Builds a content context when either part is given.
pub fn content_context(
    content_type: Option<ContentType>,
    component: Option<String>,
) -> Option<ContentContext> {
    if content_type.is_none() && component.is_none() {
        return None;
    }
    Some(ContentContext {
        content_type,
        component,
    })
}
