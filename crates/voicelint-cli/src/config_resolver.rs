//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/voicelint.toml` or `.voicelint.toml`
//! 3. `$VOICELINT_CONFIG_DIR/config.toml` or `~/.voicelint/config.toml`
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use voicelint_core::Config;

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.voicelint/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// A configuration together with where it was found.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The parsed configuration, packs root already rebased.
    pub config: Config,
    /// Where it came from.
    pub source: ConfigSource,
}

/// Resolves and parses the configuration.
///
/// A relative `[packs] root` is taken relative to the directory holding
/// the config file, so a global config works from any directory.
///
/// # Errors
///
/// Fails if a resolved config file cannot be read or parsed.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let source = resolve(project_dir, explicit);
    let mut config = match source.path() {
        None => Config::default(),
        Some(p) => {
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };
    rebase_packs_root(&mut config, &source);
    Ok(ResolvedConfig { config, source })
}

fn rebase_packs_root(config: &mut Config, source: &ConfigSource) {
    if config.packs.root.is_absolute() {
        return;
    }
    if let Some(dir) = source.path().and_then(Path::parent) {
        if !dir.as_os_str().is_empty() {
            config.packs.root = dir.join(&config.packs.root);
        }
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["voicelint.toml", ".voicelint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    // 1. Explicit path from --config flag
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    // 2. Project-level config
    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    // 3. Global fallback
    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Returns the global config directory path.
///
/// Resolution: `$VOICELINT_CONFIG_DIR` > `~/.voicelint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("VOICELINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".voicelint"))
}
