//! The single persisted visit counter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::consts::VISIT_COUNT_KEY;
use crate::error::{LightboxError, Result};

/// Persistent string store: the only state that survives a session.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat string table kept in a TOML file and rewritten on every `set`.
#[derive(Clone, Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl TomlFileStore {
    /// Open the store. A missing file reads as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let table: toml::Table = toml::from_str(&contents).map_err(|e| {
                LightboxError::Store(format!("failed to parse {}: {e}", path.display()))
            })?;
            string_entries(table)
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for TomlFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        let contents = toml::to_string(&self.entries)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents).map_err(|e| {
            LightboxError::Store(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

/// Keep scalar values as strings. Arrays and tables are dropped, so a key
/// holding one reads as missing.
fn string_entries(table: toml::Table) -> BTreeMap<String, String> {
    table
        .into_iter()
        .filter_map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                toml::Value::Array(_) | toml::Value::Table(_) => return None,
            };
            Some((key, value))
        })
        .collect()
}

/// Current count without recording a visit. Missing or garbage values read as 0.
pub fn visit_count(store: &dyn KeyValueStore) -> u64 {
    store
        .get(VISIT_COUNT_KEY)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Read, increment and write back the visit counter. Returns the new count.
pub fn record_visit(store: &mut dyn KeyValueStore) -> Result<u64> {
    let count = visit_count(store).saturating_add(1);
    store.set(VISIT_COUNT_KEY, &count.to_string())?;
    debug!(count, "visit recorded");
    Ok(count)
}
