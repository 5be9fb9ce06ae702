use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::Preferences;

/// Key the display preference is stored under.
pub const STATE_KEY: &str = "state";

/// String key/value persistence for small display preferences.
pub trait PreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Returns the path to the preferences file (`preferences.json`).
///
/// The path is determined in the following order:
/// 1. `TASKLIST_PREFS` environment variable.
/// 2. `~/.local/share/tasklist/preferences.json` (on Linux).
/// 3. `./preferences.json` (fallback).
pub fn prefs_path() -> PathBuf {
    std::env::var("TASKLIST_PREFS").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = data_dir();
        p.push("preferences.json");
        p
    })
}

/// Directory holding the preferences file and the log.
pub fn data_dir() -> PathBuf {
    let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("tasklist");
    p
}

/// Preferences kept as a JSON object of key → string in a single file.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads every stored item. A missing or unreadable file is an empty store.
    fn load_items(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }
        let mut f = match OpenOptions::new().read(true).open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot open preferences");
                return BTreeMap::new();
            }
        };
        let mut s = String::new();
        if f.read_to_string(&mut s).is_err() {
            return BTreeMap::new();
        }
        serde_json::from_str(&s).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "ignoring malformed preferences file");
            BTreeMap::new()
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_items().remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load_items();
        items.insert(key.to_string(), value.to_string());
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let s = serde_json::to_string_pretty(&items)?;
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        f.write_all(s.as_bytes())?;
        debug!(key, "preference saved");
        Ok(())
    }
}

/// Store that lives only as long as the process.
#[derive(Default, Debug, Clone)]
pub struct MemoryPreferenceStore {
    items: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the display preference, falling back to the default on any failure.
pub fn load_preferences(store: &dyn PreferenceStore, key: &str) -> Preferences {
    match store.get_item(key) {
        Ok(raw) => Preferences::parse(raw.as_deref()),
        Err(e) => {
            warn!(key, error = %e, "cannot read preferences, using defaults");
            Preferences::default()
        }
    }
}

pub fn save_preferences(store: &mut dyn PreferenceStore, key: &str, prefs: Preferences) -> Result<()> {
    let value = serde_json::to_string(&prefs)?;
    store.set_item(key, &value)
}
