//! Key-value state storage backing the selection store.
//!
//! [`FileStorage`] keeps a flat string map in `~/.config/fontpair/state.yaml`
//! and writes through on every change, so a crash never loses a selection.
//! [`MemoryStorage`] is the in-process equivalent used by tests and one-shot
//! CLI invocations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String key-value store with local-storage semantics.
pub trait StateStorage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// Non-persistent storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `pairs`.
    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl StateStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// YAML wrapper for serialization
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

/// Write-through storage in a YAML file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the state file at `path`. A missing or unreadable file yields empty state.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::read(&path);
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> BTreeMap<String, String> {
        if !path.exists() {
            return BTreeMap::new();
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_yaml_ng::from_str::<StateFile>(&contents) {
                Ok(file) => {
                    log::info!("Loaded {} saved state entries", file.values.len());
                    file.values
                }
                Err(e) => {
                    log::error!("Failed to parse state file {:?}: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                log::error!("Failed to read state file {:?}: {}", path, e);
                BTreeMap::new()
            }
        }
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = fs::create_dir_all(parent)
        {
            log::error!("Failed to create state directory: {}", e);
            return;
        }
        let file = StateFile {
            values: self.values.clone(),
        };
        match serde_yaml_ng::to_string(&file) {
            Ok(yaml) => {
                let temp_path = self.path.with_extension("yaml.tmp");
                if let Err(e) =
                    fs::write(&temp_path, yaml).and_then(|()| fs::rename(&temp_path, &self.path))
                {
                    log::error!("Failed to write state file {:?}: {}", self.path, e);
                } else {
                    log::debug!("Saved {} state entries", self.values.len());
                }
            }
            Err(e) => {
                log::error!("Failed to serialize state: {}", e);
            }
        }
    }
}

impl StateStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) == Some(value) {
            return;
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.flush();
        }
    }
}
