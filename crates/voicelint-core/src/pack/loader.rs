//! Pack directory → [`Pack`] loading.
//!
//! The manifest is loaded first and any failure there is fatal. Each of the
//! five components is then loaded on its own; a component that cannot be
//! read, parsed, or validated is replaced with an empty default and reported
//! as a [`PackComponentWarning`], so a partially broken pack stays usable.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::model::{CopyPatterns, CtaRules, Manifest, TestSuite, Tokens, Voice};
use super::schema::{self, SchemaError};
use super::Pack;

/// File name of a pack manifest.
pub const MANIFEST_FILE: &str = "manifest.yaml";

/// Fatal pack loading errors.
#[derive(Debug, thiserror::Error)]
pub enum PackLoadError {
    /// The manifest could not be read.
    #[error("failed to read manifest {path}: {source}")]
    ManifestIo {
        /// Manifest path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The manifest is not valid YAML for the manifest model.
    #[error("failed to parse manifest {path}: {message}")]
    ManifestParse {
        /// Manifest path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The manifest parsed but violates the schema.
    #[error("invalid manifest {path}: {source}")]
    ManifestSchema {
        /// Manifest path.
        path: PathBuf,
        /// The violation.
        source: SchemaError,
    },

    /// A pack name was not found under the packs root.
    #[error("unknown pack `{name}` (available: {})", format_names(.available))]
    UnknownPack {
        /// Requested name.
        name: String,
        /// Names that exist.
        available: Vec<String>,
    },
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}

/// One of the five component files of a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PackComponent {
    /// `voice.yaml`.
    Voice,
    /// `copy_patterns.yaml`.
    CopyPatterns,
    /// `cta_rules.yaml`.
    CtaRules,
    /// `tokens.json`.
    Tokens,
    /// `tests.yaml`.
    Tests,
}

impl fmt::Display for PackComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Voice => "voice",
            Self::CopyPatterns => "copy patterns",
            Self::CtaRules => "CTA rules",
            Self::Tokens => "tokens",
            Self::Tests => "tests",
        })
    }
}

/// A component that failed to load and was replaced with a default.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, thiserror::Error)]
#[error("Failed to load {component}: {message}")]
pub struct PackComponentWarning {
    /// Which component failed.
    pub component: PackComponent,
    /// What went wrong.
    pub message: String,
}

/// A pack together with the component warnings raised while loading it.
#[derive(Debug, Clone)]
pub struct LoadedPack {
    /// The pack, with defaults substituted for failed components.
    pub pack: Pack,
    /// Non-fatal component failures.
    pub errors: Vec<PackComponentWarning>,
}

/// Loads a pack directory without caching.
///
/// # Errors
///
/// Returns [`PackLoadError`] if the manifest is missing, unparsable, or
/// invalid. Component failures are reported in [`LoadedPack::errors`].
pub fn load_pack(dir: &Path) -> Result<LoadedPack, PackLoadError> {
    let manifest = load_manifest(dir)?;
    let mut errors = Vec::new();

    let files = &manifest.files;
    let voice = load_or_default(
        dir,
        &files.voice,
        PackComponent::Voice,
        schema::validate_voice,
        default_voice,
        &mut errors,
    );
    let copy_patterns = load_or_default(
        dir,
        &files.copy_patterns,
        PackComponent::CopyPatterns,
        schema::validate_copy_patterns,
        default_copy_patterns,
        &mut errors,
    );
    let cta_rules = load_or_default(
        dir,
        &files.cta_rules,
        PackComponent::CtaRules,
        schema::validate_cta_rules,
        default_cta_rules,
        &mut errors,
    );
    let tokens = load_or_default(
        dir,
        &files.tokens,
        PackComponent::Tokens,
        |_: &Tokens| Ok(()),
        default_tokens,
        &mut errors,
    );
    let tests = load_or_default(
        dir,
        &files.tests,
        PackComponent::Tests,
        schema::validate_tests,
        default_tests,
        &mut errors,
    );

    info!(
        pack = %manifest.name,
        version = %manifest.version,
        warnings = errors.len(),
        "loaded pack from {}",
        dir.display()
    );

    Ok(LoadedPack {
        pack: Pack {
            manifest,
            voice,
            copy_patterns,
            cta_rules,
            tokens,
            tests,
        },
        errors,
    })
}

/// Reads and validates `manifest.yaml` in `dir`.
///
/// # Errors
///
/// Returns [`PackLoadError`] on any manifest failure.
pub fn load_manifest(dir: &Path) -> Result<Manifest, PackLoadError> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| PackLoadError::ManifestIo {
        path: path.clone(),
        source: e,
    })?;
    let manifest: Manifest =
        serde_yaml::from_str(&content).map_err(|e| PackLoadError::ManifestParse {
            path: path.clone(),
            message: e.to_string(),
        })?;
    schema::validate_manifest(&manifest)
        .map_err(|e| PackLoadError::ManifestSchema { path, source: e })?;
    Ok(manifest)
}

fn load_or_default<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
    component: PackComponent,
    validate: impl FnOnce(&T) -> Result<(), SchemaError>,
    fallback: fn() -> T,
    errors: &mut Vec<PackComponentWarning>,
) -> T {
    match load_component(&dir.join(file), validate) {
        Ok(value) => value,
        Err(message) => {
            let warning = PackComponentWarning { component, message };
            warn!("{warning}");
            errors.push(warning);
            fallback()
        }
    }
}

fn load_component<T: DeserializeOwned>(
    path: &Path,
    validate: impl FnOnce(&T) -> Result<(), SchemaError>,
) -> Result<T, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value: T = if is_json {
        serde_json::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?
    } else {
        serde_yaml::from_str(&content).map_err(|e| format!("{}: {e}", path.display()))?
    };

    validate(&value).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(value)
}

pub(crate) fn default_voice() -> Voice {
    Voice::named("default")
}

pub(crate) fn default_copy_patterns() -> CopyPatterns {
    CopyPatterns {
        name: "default".to_string(),
        ..CopyPatterns::default()
    }
}

pub(crate) fn default_cta_rules() -> CtaRules {
    CtaRules::named("default")
}

pub(crate) fn default_tokens() -> Tokens {
    Tokens {
        name: Some("default".to_string()),
        ..Tokens::default()
    }
}

pub(crate) fn default_tests() -> TestSuite {
    TestSuite {
        name: "default".to_string(),
        ..TestSuite::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_pack(dir: &Path, files: &[(&str, &str)]) {
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = load_pack(tmp.path()).unwrap_err();
        assert!(matches!(err, PackLoadError::ManifestIo { .. }));
    }

    #[test]
    fn invalid_manifest_yaml_is_fatal() {
        let tmp = TempDir::new().unwrap();
        write_pack(tmp.path(), &[(MANIFEST_FILE, "name: [unclosed")]);
        let err = load_pack(tmp.path()).unwrap_err();
        assert!(matches!(err, PackLoadError::ManifestParse { .. }));
    }

    #[test]
    fn missing_components_fall_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        write_pack(tmp.path(), &[(MANIFEST_FILE, "name: bare\nversion: 0.1.0\n")]);

        let loaded = load_pack(tmp.path()).unwrap();
        assert_eq!(loaded.errors.len(), 5);
        assert_eq!(loaded.pack.voice.name, "default");
        assert_eq!(loaded.pack.cta_rules.name, "default");
        assert_eq!(loaded.pack.tokens.name.as_deref(), Some("default"));
        assert!(loaded.errors[0].to_string().starts_with("Failed to load voice:"));
    }

    #[test]
    fn schema_failure_in_one_component_keeps_the_rest() {
        let tmp = TempDir::new().unwrap();
        write_pack(
            tmp.path(),
            &[
                (MANIFEST_FILE, "name: partial\nversion: 1.0.0\n"),
                (
                    "voice.yaml",
                    "name: v\nvocabulary:\n  rules:\n    - preferred: use\n      avoid: []\n",
                ),
                ("copy_patterns.yaml", "name: patterns\npatterns: []\n"),
                ("cta_rules.yaml", "name: ctas\nguidelines:\n  maxWords: 4\n"),
                ("tokens.json", r##"{"colors": {"primary": "#000"}}"##),
                ("tests.yaml", "name: suite\ntests: []\n"),
            ],
        );

        let loaded = load_pack(tmp.path()).unwrap();
        assert_eq!(loaded.errors.len(), 1);
        assert_eq!(loaded.errors[0].component, PackComponent::Voice);
        assert!(loaded.errors[0].message.contains("vocabulary.rules[0].avoid"));
        assert_eq!(loaded.pack.voice.name, "default");
        assert_eq!(loaded.pack.cta_rules.guidelines.max_words, Some(4));
        assert_eq!(loaded.pack.tokens.colors.len(), 1);
    }

    #[test]
    fn manifest_file_map_is_respected() {
        let tmp = TempDir::new().unwrap();
        write_pack(
            tmp.path(),
            &[
                (
                    MANIFEST_FILE,
                    "name: custom\nversion: 1.0.0\nfiles:\n  voice: brand.yml\n",
                ),
                ("brand.yml", "name: Brand\n"),
            ],
        );
        let loaded = load_pack(tmp.path()).unwrap();
        assert_eq!(loaded.pack.voice.name, "Brand");
        assert!(loaded
            .errors
            .iter()
            .all(|e| e.component != PackComponent::Voice));
    }
}
