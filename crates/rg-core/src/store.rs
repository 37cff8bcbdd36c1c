//! Durable storage for per-group misfire switches.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::id::GroupId;

/// Misfire switch values by group.
pub type SwitchMap = BTreeMap<GroupId, bool>;

/// Loads and saves the misfire switch map.
pub trait SwitchStore {
    /// Read every stored switch.
    fn load(&mut self) -> Result<SwitchMap, StoreError>;

    /// Replace the stored switches with `switches`.
    fn save(&mut self, switches: &SwitchMap) -> Result<(), StoreError>;
}

/// Keeps switches in memory only. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: SwitchMap,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `switches`.
    pub fn with_switches(switches: SwitchMap) -> Self {
        Self {
            saved: switches,
            saves: 0,
        }
    }

    /// The most recently saved switches.
    pub fn saved(&self) -> &SwitchMap {
        &self.saved
    }

    /// Number of saves performed.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SwitchStore for MemoryStore {
    fn load(&mut self) -> Result<SwitchMap, StoreError> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, switches: &SwitchMap) -> Result<(), StoreError> {
        self.saved = switches.clone();
        self.saves += 1;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RuntimeData {
    #[serde(default)]
    group_misfire_switches: SwitchMap,
}

/// Stores switches in a pretty-printed JSON file:
/// `{"group_misfire_switches": {"<group>": true}}`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use the file at `path`. It need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SwitchStore for JsonFileStore {
    fn load(&mut self) -> Result<SwitchMap, StoreError> {
        if !self.path.exists() {
            return Ok(SwitchMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        let data: RuntimeData = serde_json::from_str(&text)?;
        Ok(data.group_misfire_switches)
    }

    fn save(&mut self, switches: &SwitchMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let data = RuntimeData {
            group_misfire_switches: switches.clone(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn switches(entries: &[(&str, bool)]) -> SwitchMap {
        entries
            .iter()
            .map(|(g, on)| (GroupId::from(*g), *on))
            .collect()
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("data.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let mut store = JsonFileStore::new(&path);
        store
            .save(&switches(&[("100", true), ("200", false)]))
            .unwrap();

        let mut reopened = JsonFileStore::new(&path);
        assert_eq!(
            reopened.load().unwrap(),
            switches(&[("100", true), ("200", false)])
        );
    }

    #[test]
    fn file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        JsonFileStore::new(&path)
            .save(&switches(&[("42", true)]))
            .unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["group_misfire_switches"]["42"], true);
    }

    #[test]
    fn file_without_switch_key_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{}").unwrap();
        assert!(JsonFileStore::new(&path).load().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryStore::with_switches(switches(&[("1", true)]));
        assert_eq!(store.load().unwrap(), switches(&[("1", true)]));
        store.save(&switches(&[("1", false)])).unwrap();
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.saved(), &switches(&[("1", false)]));
    }
}
