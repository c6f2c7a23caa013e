//! Path-keyed pack cache.
//!
//! An entry is served while it is younger than the TTL **and** the pack's
//! manifest still has the modification time recorded when it was cached.
//! The cache holds at most `capacity` entries; inserting beyond that evicts
//! the oldest insertion first.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::loader::{load_pack, PackComponentWarning, PackLoadError, MANIFEST_FILE};
use super::Pack;

/// Default time-to-live of a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Default maximum number of cached packs.
pub const DEFAULT_CAPACITY: usize = 20;

/// Cache bounds for a [`PackStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// How long an entry stays valid.
    pub ttl: Duration,
    /// Maximum number of entries.
    pub capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Per-call load options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip both reading and writing the cache.
    pub no_cache: bool,
}

impl LoadOptions {
    /// Options that bypass the cache.
    #[must_use]
    pub fn fresh() -> Self {
        Self { no_cache: true }
    }
}

/// Result of [`PackStore::load`].
#[derive(Debug, Clone)]
pub struct PackLoadResult {
    /// The shared pack.
    pub pack: Arc<Pack>,
    /// Component warnings raised when the pack was loaded.
    pub errors: Vec<PackComponentWarning>,
    /// Whether the pack came from the cache.
    pub cached: bool,
}

/// Source of the pack names a caller may select.
///
/// Untrusted pack names are only ever resolved through this whitelist.
pub trait PackCatalog {
    /// Names of the packs that can be loaded.
    fn available_packs(&self) -> Vec<String>;

    /// Returns true if `name` is one of [`Self::available_packs`].
    fn contains_pack(&self, name: &str) -> bool {
        self.available_packs().iter().any(|p| p == name)
    }
}

impl PackCatalog for Vec<String> {
    fn available_packs(&self) -> Vec<String> {
        self.clone()
    }

    fn contains_pack(&self, name: &str) -> bool {
        self.iter().any(|p| p == name)
    }
}

impl<T: PackCatalog + ?Sized> PackCatalog for &T {
    fn available_packs(&self) -> Vec<String> {
        (**self).available_packs()
    }

    fn contains_pack(&self, name: &str) -> bool {
        (**self).contains_pack(name)
    }
}

impl<T: PackCatalog + ?Sized> PackCatalog for Arc<T> {
    fn available_packs(&self) -> Vec<String> {
        (**self).available_packs()
    }

    fn contains_pack(&self, name: &str) -> bool {
        (**self).contains_pack(name)
    }
}

impl PackCatalog for [&str] {
    fn available_packs(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }

    fn contains_pack(&self, name: &str) -> bool {
        self.contains(&name)
    }
}

struct CacheEntry {
    pack: Arc<Pack>,
    errors: Vec<PackComponentWarning>,
    cached_at: Instant,
    manifest_mtime: Option<SystemTime>,
}

#[derive(Default)]
struct PackCache {
    entries: HashMap<PathBuf, CacheEntry>,
    order: VecDeque<PathBuf>,
}

impl PackCache {
    fn remove(&mut self, key: &Path) -> bool {
        self.order.retain(|k| k != key);
        self.entries.remove(key).is_some()
    }

    fn insert(&mut self, key: PathBuf, entry: CacheEntry, capacity: usize) {
        self.remove(&key);
        self.order.push_back(key.clone());
        self.entries.insert(key, entry);
        while self.entries.len() > capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            debug!("evicting cached pack {}", oldest.display());
            self.entries.remove(&oldest);
        }
    }
}

/// Loads packs from a packs root and caches them by path.
///
/// Safe to share between threads; the cache lock is never held across
/// file IO.
pub struct PackStore {
    root: PathBuf,
    settings: CacheSettings,
    cache: Mutex<PackCache>,
}

impl std::fmt::Debug for PackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackStore")
            .field("root", &self.root)
            .field("settings", &self.settings)
            .field("cached", &self.len())
            .finish()
    }
}

impl PackStore {
    /// Creates a store over `root` with default cache settings.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_settings(root, CacheSettings::default())
    }

    /// Creates a store with explicit cache settings.
    #[must_use]
    pub fn with_settings(root: impl Into<PathBuf>, settings: CacheSettings) -> Self {
        Self {
            root: root.into(),
            settings,
            cache: Mutex::new(PackCache::default()),
        }
    }

    /// The packs root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Cache settings in effect.
    #[must_use]
    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Loads the pack in `dir`, serving it from the cache when still valid.
    ///
    /// # Errors
    ///
    /// Returns [`PackLoadError`] if the manifest cannot be loaded.
    pub fn load(&self, dir: &Path, options: LoadOptions) -> Result<PackLoadResult, PackLoadError> {
        let key = cache_key(dir);

        if !options.no_cache {
            if let Some(hit) = self.lookup(&key) {
                return Ok(hit);
            }
        }

        let mtime = manifest_mtime(&key);
        let loaded = load_pack(&key)?;
        let pack = Arc::new(loaded.pack);

        if !options.no_cache {
            let entry = CacheEntry {
                pack: Arc::clone(&pack),
                errors: loaded.errors.clone(),
                cached_at: Instant::now(),
                manifest_mtime: mtime,
            };
            self.cache.lock().insert(key, entry, self.settings.capacity);
        }

        Ok(PackLoadResult {
            pack,
            errors: loaded.errors,
            cached: false,
        })
    }

    /// Loads a pack by name, accepting only names under the packs root.
    ///
    /// # Errors
    ///
    /// Returns [`PackLoadError::UnknownPack`] for names that are not
    /// immediate subdirectories of the root, or any manifest error.
    pub fn load_named(&self, name: &str, options: LoadOptions) -> Result<PackLoadResult, PackLoadError> {
        let available = self.list_available_packs();
        if !available.iter().any(|p| p == name) {
            return Err(PackLoadError::UnknownPack {
                name: name.to_string(),
                available,
            });
        }
        self.load(&self.root.join(name), options)
    }

    /// Names of the immediate subdirectories of the packs root, sorted.
    #[must_use]
    pub fn list_available_packs(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("cannot list packs in {}: {e}", self.root.display());
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();
        names
    }

    /// Drops the cache entry for `dir`. Returns true if one existed.
    pub fn invalidate(&self, dir: &Path) -> bool {
        self.cache.lock().remove(&cache_key(dir))
    }

    /// Drops every cache entry.
    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.entries.clear();
        cache.order.clear();
    }

    /// Number of cached packs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &Path) -> Option<PackLoadResult> {
        let current_mtime = manifest_mtime(key);
        let mut cache = self.cache.lock();

        let entry = cache.entries.get(key)?;
        let fresh = entry.cached_at.elapsed() < self.settings.ttl;
        let unchanged = entry.manifest_mtime == current_mtime;

        if fresh && unchanged {
            debug!("pack cache hit: {}", key.display());
            return Some(PackLoadResult {
                pack: Arc::clone(&entry.pack),
                errors: entry.errors.clone(),
                cached: true,
            });
        }

        debug!(
            expired = !fresh,
            modified = !unchanged,
            "pack cache stale: {}",
            key.display()
        );
        cache.remove(key);
        None
    }
}

impl PackCatalog for PackStore {
    fn available_packs(&self) -> Vec<String> {
        self.list_available_packs()
    }
}

fn cache_key(dir: &Path) -> PathBuf {
    std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}

fn manifest_mtime(dir: &Path) -> Option<SystemTime> {
    std::fs::metadata(dir.join(MANIFEST_FILE))
        .and_then(|m| m.modified())
        .ok()
}
